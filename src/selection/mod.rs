//! Tri-state selection over a tree of folders and documents.
//!
//! This module provides:
//! - The `SelectionTree` model with check propagation and document counting
//! - Change notifications for views that mirror the tree
//! - Text and JSON output, tree file loading, scripted selection steps

mod format;
mod load;
mod node;
mod observer;
mod ops;
mod tree;

pub use format::{format_count, format_json, format_tree, FormatOptions, NodeSummary, SelectionSummary};
pub use load::{load_tree, parse_descriptors};
pub use node::{CheckState, Node, NodeDescriptor, NodeId};
pub use observer::{ChangeKind, SelectionChange, SelectionObserver, TracingObserver};
pub use ops::{apply_all, SelectionOp};
pub use tree::SelectionTree;
