//! Select command implementation

use crate::cli::SelectArgs;
use crate::config::BrowserConfig;
use crate::error::Result;
use crate::selection::{
    apply_all, format_count, format_json, format_tree, load_tree, FormatOptions, TracingObserver,
};

/// Run the select command
pub fn run(args: SelectArgs, config: &BrowserConfig) -> Result<()> {
    let mut tree = load_tree(&args.tree)?;
    tree.subscribe(Box::new(TracingObserver));

    tracing::info!(
        path = %args.tree.display(),
        steps = args.apply.len(),
        "Applying selection steps"
    );

    apply_all(&mut tree, &args.apply)?;

    if args.json {
        println!("{}", format_json(&tree, true)?);
        return Ok(());
    }

    let mut options = FormatOptions::new()
        .with_ids(!args.no_ids)
        .with_folding(args.folded);
    if args.folded {
        tree.expand_to_depth(config.expand_depth);
    }
    if let Some(depth) = args.max_depth {
        options = options.with_max_depth(depth);
    }

    print!("{}", format_tree(&tree, &options));
    println!();
    println!("{}", format_count(tree.selected_count()));

    Ok(())
}
