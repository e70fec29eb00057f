use std::str::FromStr;

use super::node::NodeId;
use super::observer::SelectionChange;
use super::tree::SelectionTree;
use crate::error::{BrowserError, Result};

/// A scripted selection step, as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOp {
    Check(NodeId),
    Uncheck(NodeId),
    /// The exclusive gesture
    Only(NodeId),
    All,
    None,
}

impl SelectionOp {
    /// Apply this step, rejecting ids the tree does not know.
    pub fn apply(&self, tree: &mut SelectionTree) -> Result<SelectionChange> {
        if let Some(id) = self.target() {
            if !tree.contains(id) {
                return Err(BrowserError::UnknownNode(id));
            }
        }

        let change = match *self {
            SelectionOp::Check(id) => tree.on_selection(id, true, false),
            SelectionOp::Uncheck(id) => tree.on_selection(id, false, false),
            SelectionOp::Only(id) => tree.on_selection(id, true, true),
            SelectionOp::All => tree.select_all(),
            SelectionOp::None => tree.select_none(),
        };
        Ok(change)
    }

    pub fn target(&self) -> Option<NodeId> {
        match *self {
            SelectionOp::Check(id) | SelectionOp::Uncheck(id) | SelectionOp::Only(id) => Some(id),
            SelectionOp::All | SelectionOp::None => None,
        }
    }
}

impl FromStr for SelectionOp {
    type Err = BrowserError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || BrowserError::InvalidOperation(s.to_string());
        let lowered = s.trim().to_lowercase();

        match lowered.split_once(':') {
            None => match lowered.as_str() {
                "all" => Ok(SelectionOp::All),
                "none" => Ok(SelectionOp::None),
                _ => Err(invalid()),
            },
            Some((verb, id)) => {
                let id = NodeId(id.trim().parse().map_err(|_| invalid())?);
                match verb {
                    "check" => Ok(SelectionOp::Check(id)),
                    "uncheck" => Ok(SelectionOp::Uncheck(id)),
                    "only" => Ok(SelectionOp::Only(id)),
                    _ => Err(invalid()),
                }
            }
        }
    }
}

/// Apply steps in order, stopping at the first invalid one.
pub fn apply_all(tree: &mut SelectionTree, ops: &[SelectionOp]) -> Result<()> {
    for op in ops {
        let change = op.apply(tree)?;
        tracing::debug!(?op, count = change.count, "Applied selection step");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{CheckState, NodeDescriptor};

    fn tree() -> SelectionTree {
        SelectionTree::from_descriptors(vec![
            NodeDescriptor::root("root"),
            NodeDescriptor::folder(1, "a", 0),
            NodeDescriptor::document(2, "a1", 1),
            NodeDescriptor::document(3, "b", 0),
        ])
        .unwrap()
    }

    #[test]
    fn test_parse_ops() {
        assert_eq!("check:2".parse::<SelectionOp>().unwrap(), SelectionOp::Check(NodeId(2)));
        assert_eq!("UNCHECK:7".parse::<SelectionOp>().unwrap(), SelectionOp::Uncheck(NodeId(7)));
        assert_eq!("only: 3".parse::<SelectionOp>().unwrap(), SelectionOp::Only(NodeId(3)));
        assert_eq!("all".parse::<SelectionOp>().unwrap(), SelectionOp::All);
        assert_eq!("None".parse::<SelectionOp>().unwrap(), SelectionOp::None);
    }

    #[test]
    fn test_parse_invalid_ops() {
        for input in ["", "flip:2", "check:", "check:x", "check:-1", "some"] {
            let err = input.parse::<SelectionOp>().unwrap_err();
            assert!(matches!(err, BrowserError::InvalidOperation(_)), "{input}");
        }
    }

    #[test]
    fn test_apply_sequence() {
        let mut tree = tree();
        apply_all(
            &mut tree,
            &[SelectionOp::All, SelectionOp::Uncheck(NodeId(3)), SelectionOp::Only(NodeId(3))],
        )
        .unwrap();
        assert_eq!(tree.selected_documents(), vec![NodeId(3)]);
        assert_eq!(tree.check_state(NodeId(1)), CheckState::Unchecked);
    }

    #[test]
    fn test_apply_unknown_id() {
        let mut tree = tree();
        let err = SelectionOp::Check(NodeId(42)).apply(&mut tree).unwrap_err();
        assert!(matches!(err, BrowserError::UnknownNode(NodeId(42))));
    }
}
