use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::selection::SelectionOp;

/// Doc Browser - Browse a document tree and select documents with tri-state folders
#[derive(Parser, Debug)]
#[command(name = "doc-browser")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Browse a document tree interactively and pick documents
    Browse(BrowseArgs),

    /// Apply selection steps to a document tree and print the result
    Select(SelectArgs),

    /// Follow the progress of a background task
    Status(StatusArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Tree file (JSON list of nodes)
    pub tree: PathBuf,

    /// Print the accepted selection as JSON
    #[arg(long)]
    pub json: bool,

    /// Show the root node as a selectable row
    #[arg(long)]
    pub show_root: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Args, Debug)]
pub struct SelectArgs {
    /// Tree file (JSON list of nodes)
    pub tree: PathBuf,

    /// Selection step: check:ID, uncheck:ID, only:ID, all, none (repeatable, applied in order)
    #[arg(short, long = "apply", value_name = "OP")]
    pub apply: Vec<SelectionOp>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Maximum depth to display
    #[arg(short = 'd', long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Hide node ids in the tree drawing
    #[arg(long)]
    pub no_ids: bool,

    /// Draw only folders opened by browser.expand_depth
    #[arg(long)]
    pub folded: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Task identifier
    pub task_id: String,

    /// Task API endpoint (overrides poller.api_url)
    #[arg(short, long, value_name = "URL")]
    pub url: Option<String>,

    /// Poll interval in milliseconds (overrides poller.interval_ms)
    #[arg(short, long, value_name = "MS")]
    pub interval: Option<u64>,

    /// CSRF token sent as X-CSRFToken
    #[arg(long, env = "DOC_BROWSER_CSRF_TOKEN", value_name = "TOKEN", hide_env_values = true)]
    pub csrf_token: Option<String>,

    /// Ask the server to stop the task before polling
    #[arg(long)]
    pub stop: bool,

    /// Announce the end of the task (auto, desktop, stderr)
    #[arg(long, value_name = "BACKEND", num_args = 0..=1, default_missing_value = "auto")]
    pub notify: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::NodeId;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_select_with_ops() {
        let cli = Cli::parse_from([
            "doc-browser",
            "select",
            "tree.json",
            "--apply",
            "check:2",
            "-a",
            "only:4",
            "--max-depth",
            "2",
        ]);
        match cli.command {
            Command::Select(args) => {
                assert_eq!(args.tree, PathBuf::from("tree.json"));
                assert_eq!(
                    args.apply,
                    vec![SelectionOp::Check(NodeId(2)), SelectionOp::Only(NodeId(4))]
                );
                assert_eq!(args.max_depth, Some(2));
                assert!(!args.folded);
            }
            _ => panic!("Expected Select command"),
        }
    }

    #[test]
    fn parse_select_rejects_bad_op() {
        let result = Cli::try_parse_from(["doc-browser", "select", "tree.json", "-a", "flip:2"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_status_notify_default() {
        let cli = Cli::parse_from(["doc-browser", "status", "abc", "--notify"]);
        match cli.command {
            Command::Status(args) => {
                assert_eq!(args.task_id, "abc");
                assert_eq!(args.notify.as_deref(), Some("auto"));
                assert!(!args.stop);
            }
            _ => panic!("Expected Status command"),
        }
    }

    #[test]
    fn global_verbose_flag() {
        let cli = Cli::parse_from(["doc-browser", "-vv", "browse", "tree.json"]);
        assert_eq!(cli.verbose, 2);
    }
}
