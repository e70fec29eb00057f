use serde::Serialize;

use super::node::{CheckState, Node, NodeId};
use super::tree::SelectionTree;
use crate::error::{BrowserError, Result};

/// Format options for tree output
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Maximum depth to display
    pub max_depth: Option<usize>,
    /// Append `#id` to every line
    pub show_ids: bool,
    /// Only descend into expanded folders
    pub respect_folding: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            show_ids: true,
            respect_folding: false,
        }
    }
}

impl FormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn with_ids(mut self, show: bool) -> Self {
        self.show_ids = show;
        self
    }

    pub fn with_folding(mut self, respect: bool) -> Self {
        self.respect_folding = respect;
        self
    }
}

/// Draw the tree with checkbox glyphs, one node per line.
pub fn format_tree(tree: &SelectionTree, options: &FormatOptions) -> String {
    let mut output = String::new();
    format_tree_recursive(tree, tree.root(), &mut output, "", true, 0, options);
    output
}

fn format_tree_recursive(
    tree: &SelectionTree,
    node: &Node,
    output: &mut String,
    prefix: &str,
    is_last: bool,
    depth: usize,
    options: &FormatOptions,
) {
    if let Some(max_depth) = options.max_depth {
        if depth > max_depth {
            return;
        }
    }

    let connector = if depth == 0 {
        ""
    } else if is_last {
        "└── "
    } else {
        "├── "
    };

    let name = if node.is_folder() {
        format!("{}/", node.name())
    } else {
        node.name().to_string()
    };

    let id_str = if options.show_ids {
        format!(" #{}", node.id())
    } else {
        String::new()
    };

    output.push_str(&format!(
        "{}{}{} {}{}\n",
        prefix,
        connector,
        node.check_state().glyph(),
        name,
        id_str
    ));

    if !node.has_children() || (options.respect_folding && !node.is_expanded()) {
        return;
    }

    let new_prefix = if depth == 0 {
        String::new()
    } else if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    };

    let total = node.child_count();
    for (i, child) in tree.children(node.id()).enumerate() {
        format_tree_recursive(tree, child, output, &new_prefix, i + 1 == total, depth + 1, options);
    }
}

/// One line of the JSON summary
#[derive(Debug, Clone, Serialize)]
pub struct NodeSummary {
    pub id: NodeId,
    pub name: String,
    pub is_leaf: bool,
    pub state: CheckState,
}

/// Machine-readable view of a tree's selection
#[derive(Debug, Clone, Serialize)]
pub struct SelectionSummary {
    pub count: usize,
    pub selected: Vec<NodeId>,
    pub nodes: Vec<NodeSummary>,
}

impl SelectionSummary {
    pub fn from_tree(tree: &SelectionTree) -> Self {
        Self {
            count: tree.selected_count(),
            selected: tree.selected_documents(),
            nodes: tree
                .iter()
                .map(|node| NodeSummary {
                    id: node.id(),
                    name: node.name().to_string(),
                    is_leaf: node.is_leaf(),
                    state: node.check_state(),
                })
                .collect(),
        }
    }
}

/// Format the selection as JSON
pub fn format_json(tree: &SelectionTree, pretty: bool) -> Result<String> {
    let summary = SelectionSummary::from_tree(tree);
    let json = if pretty {
        serde_json::to_string_pretty(&summary)
    } else {
        serde_json::to_string(&summary)
    };
    json.map_err(|e| BrowserError::Other(format!("Failed to serialize selection: {}", e)))
}

/// One-line summary, e.g. `Selected: 2 documents`.
pub fn format_count(count: usize) -> String {
    let noun = if count == 1 { "document" } else { "documents" };
    format!("Selected: {} {}", count, noun)
}
