//! Browse command implementation

use serde::Serialize;

use crate::cli::BrowseArgs;
use crate::config::Config;
use crate::error::{BrowserError, Result};
use crate::selection::{load_tree, NodeId};
use crate::tui::{self, ui::Palette, App};

#[derive(Serialize)]
struct AcceptedSelection {
    count: usize,
    selected: Vec<NodeId>,
}

/// Run the browse command
pub fn run(args: BrowseArgs, config: &Config) -> Result<()> {
    let tree = load_tree(&args.tree)?;

    tracing::info!(path = %args.tree.display(), nodes = tree.len(), "Opening browser");

    let palette = if args.no_color {
        Palette::none()
    } else {
        Palette::from_scheme(&config.tui.color_scheme)
    };
    let mut app = App::new(tree, &config.browser)
        .with_root(args.show_root || config.browser.show_root)
        .with_palette(palette);

    tui::run(&mut app)?;

    if !app.accepted {
        tracing::info!("Selection discarded");
        return Ok(());
    }

    print!("{}", format_selection(&app.selection(), args.json)?);
    Ok(())
}

/// Accepted documents, one id per line or as JSON.
fn format_selection(selected: &[NodeId], json: bool) -> Result<String> {
    if json {
        let accepted = AcceptedSelection {
            count: selected.len(),
            selected: selected.to_vec(),
        };
        let mut out = serde_json::to_string_pretty(&accepted)
            .map_err(|e| BrowserError::Other(format!("Failed to serialize selection: {}", e)))?;
        out.push('\n');
        return Ok(out);
    }

    Ok(selected.iter().map(|id| format!("{}\n", id)).collect())
}
