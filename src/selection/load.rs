use std::fs;
use std::path::Path;

use super::node::NodeDescriptor;
use super::tree::SelectionTree;
use crate::error::{BrowserError, Result};

/// Parse a JSON array of node descriptors.
pub fn parse_descriptors(json: &str, path: &Path) -> Result<Vec<NodeDescriptor>> {
    serde_json::from_str(json).map_err(|source| BrowserError::TreeFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a tree file and build the selection tree from it.
pub fn load_tree(path: &Path) -> Result<SelectionTree> {
    let content = fs::read_to_string(path).map_err(|source| BrowserError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let descriptors = parse_descriptors(&content, path)?;
    tracing::debug!(path = %path.display(), nodes = descriptors.len(), "Loaded tree file");

    Ok(SelectionTree::from_descriptors(descriptors)?)
}
