use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a node in a selection tree. `0` is the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The implicit root of every tree.
    pub const ROOT: NodeId = NodeId(0);

    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(value: u32) -> Self {
        NodeId(value)
    }
}

/// Ternary selection state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    #[default]
    Unchecked,
    Checked,
    Indeterminate,
}

impl CheckState {
    pub fn from_checked(checked: bool) -> Self {
        if checked {
            CheckState::Checked
        } else {
            CheckState::Unchecked
        }
    }

    pub fn is_checked(self) -> bool {
        self == CheckState::Checked
    }

    /// Checkbox glyph used by the text and terminal views.
    pub fn glyph(self) -> &'static str {
        match self {
            CheckState::Checked => "[x]",
            CheckState::Indeterminate => "[-]",
            CheckState::Unchecked => "[ ]",
        }
    }

    /// Reduce the states of a node's children to the node's own state.
    ///
    /// Any indeterminate child makes the result indeterminate, uniform
    /// children give their common state, and a mix gives indeterminate.
    /// An empty set reduces to `Unchecked`.
    pub fn reduce<I>(states: I) -> CheckState
    where
        I: IntoIterator<Item = CheckState>,
    {
        let mut has_checked = false;
        let mut has_unchecked = false;

        for state in states {
            match state {
                CheckState::Indeterminate => return CheckState::Indeterminate,
                CheckState::Checked => has_checked = true,
                CheckState::Unchecked => has_unchecked = true,
            }
            if has_checked && has_unchecked {
                return CheckState::Indeterminate;
            }
        }

        CheckState::from_checked(has_checked)
    }
}

/// Flat description of one node, as supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    pub id: NodeId,
    pub name: String,
    /// Owning node; ignored for the root.
    #[serde(default)]
    pub parent_id: Option<NodeId>,
    /// True for selectable documents, false for folders.
    pub is_leaf: bool,
}

impl NodeDescriptor {
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            id: NodeId::ROOT,
            name: name.into(),
            parent_id: None,
            is_leaf: false,
        }
    }

    pub fn folder(id: u32, name: impl Into<String>, parent_id: u32) -> Self {
        Self {
            id: NodeId(id),
            name: name.into(),
            parent_id: Some(NodeId(parent_id)),
            is_leaf: false,
        }
    }

    pub fn document(id: u32, name: impl Into<String>, parent_id: u32) -> Self {
        Self {
            id: NodeId(id),
            name: name.into(),
            parent_id: Some(NodeId(parent_id)),
            is_leaf: true,
        }
    }
}

/// A folder or document inside a [`SelectionTree`](super::SelectionTree).
///
/// Links are slot indices into the tree's node table and never change
/// after construction.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) name: String,
    pub(crate) parent_id: Option<NodeId>,
    pub(crate) is_leaf: bool,
    pub(crate) parent: Option<usize>,
    pub(crate) children: Vec<usize>,
    pub(crate) state: CheckState,
    pub(crate) expanded: bool,
}

impl Node {
    pub(crate) fn from_descriptor(descriptor: NodeDescriptor) -> Self {
        Self {
            id: descriptor.id,
            name: descriptor.name,
            parent_id: if descriptor.id.is_root() {
                None
            } else {
                descriptor.parent_id
            },
            is_leaf: descriptor.is_leaf,
            parent: None,
            children: Vec::new(),
            state: CheckState::Unchecked,
            expanded: false,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent_id
    }

    pub fn is_leaf(&self) -> bool {
        self.is_leaf
    }

    pub fn is_folder(&self) -> bool {
        !self.is_leaf
    }

    pub fn check_state(&self) -> CheckState {
        self.state
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}
