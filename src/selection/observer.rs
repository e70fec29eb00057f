use super::node::{CheckState, NodeId};

/// What kind of operation produced a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A plain check/uncheck of one node (or a whole-tree select all/none).
    Selection,
    /// The exclusive gesture: everything cleared, one subtree checked.
    Exclusive,
}

/// Notification published once per selection operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub kind: ChangeKind,
    /// Nodes whose state differs from before the operation, in tree input order.
    pub changed: Vec<(NodeId, CheckState)>,
    /// Number of checked documents after the operation.
    pub count: usize,
}

impl SelectionChange {
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }

    /// New state of `id` if this change touched it.
    pub fn state_of(&self, id: NodeId) -> Option<CheckState> {
        self.changed
            .iter()
            .find(|(changed_id, _)| *changed_id == id)
            .map(|(_, state)| *state)
    }
}

/// Trait for views that mirror a selection tree
pub trait SelectionObserver {
    /// Called once after every selection operation.
    fn on_selection(&mut self, change: &SelectionChange);

    /// Called when a folder is folded or unfolded.
    fn on_expansion(&mut self, _id: NodeId, _expanded: bool) {}
}

/// Observer that only logs, useful when no view is attached.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl SelectionObserver for TracingObserver {
    fn on_selection(&mut self, change: &SelectionChange) {
        tracing::debug!(
            kind = ?change.kind,
            changed = change.changed.len(),
            count = change.count,
            "Selection updated"
        );
    }

    fn on_expansion(&mut self, id: NodeId, expanded: bool) {
        tracing::trace!(node = %id, expanded, "Fold state updated");
    }
}
