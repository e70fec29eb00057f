//! The selection tree: folders and documents with tri-state checkboxes.

use std::collections::HashMap;
use std::fmt;

use super::node::{CheckState, Node, NodeDescriptor, NodeId};
use super::observer::{ChangeKind, SelectionChange, SelectionObserver};
use crate::error::TreeError;

/// A rooted tree of selectable folders and documents.
///
/// Nodes live in a single table addressed by slot index; public ids map to
/// slots through `index`. Only check state and fold state change after
/// construction.
///
/// Operations taking a [`NodeId`] panic when the id is unknown. Use
/// [`SelectionTree::contains`] first when the id comes from user input.
pub struct SelectionTree {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    root: usize,
    count: usize,
    observers: Vec<Box<dyn SelectionObserver>>,
}

impl SelectionTree {
    /// Build a tree from a flat list of descriptors.
    ///
    /// Parents may appear before or after their children. Children keep the
    /// input order.
    pub fn from_descriptors<I>(descriptors: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = NodeDescriptor>,
    {
        let mut nodes: Vec<Node> = Vec::new();
        let mut index = HashMap::new();
        let mut root = None;

        for descriptor in descriptors {
            let slot = nodes.len();
            if descriptor.id.is_root() {
                if root.is_some() {
                    return Err(TreeError::DuplicateRoot);
                }
                root = Some(slot);
            } else if index.contains_key(&descriptor.id) {
                return Err(TreeError::DuplicateId(descriptor.id));
            }
            index.insert(descriptor.id, slot);
            nodes.push(Node::from_descriptor(descriptor));
        }

        let root = root.ok_or(TreeError::MissingRoot)?;

        for slot in 0..nodes.len() {
            if slot == root {
                continue;
            }
            let id = nodes[slot].id;
            let parent_id = nodes[slot].parent_id.ok_or(TreeError::MissingParent(id))?;
            let parent = *index
                .get(&parent_id)
                .ok_or(TreeError::UnresolvedParent { id, parent_id })?;
            nodes[slot].parent = Some(parent);
            nodes[parent].children.push(slot);
        }

        // Parent links that loop back on themselves never reach the root.
        let mut reached = vec![false; nodes.len()];
        let mut stack = vec![root];
        while let Some(slot) = stack.pop() {
            reached[slot] = true;
            stack.extend(nodes[slot].children.iter().copied());
        }
        if let Some(slot) = reached.iter().position(|r| !r) {
            return Err(TreeError::Unreachable(nodes[slot].id));
        }

        tracing::debug!(
            nodes = nodes.len(),
            documents = nodes.iter().filter(|n| n.is_leaf).count(),
            "Built selection tree"
        );

        Ok(Self {
            nodes,
            index,
            root,
            count: 0,
            observers: Vec::new(),
        })
    }

    /// Register a view that is told about every change.
    pub fn subscribe(&mut self, observer: Box<dyn SelectionObserver>) {
        self.observers.push(observer);
    }

    /// Set a node and its whole subtree to checked or unchecked.
    ///
    /// Ancestors are left alone; use [`SelectionTree::on_selection_changed`]
    /// when they must follow.
    pub fn set_subtree_checked(&mut self, id: NodeId, checked: bool) -> SelectionChange {
        let slot = self.slot(id);
        let before = self.snapshot();

        self.fill_subtree(slot, CheckState::from_checked(checked));
        self.count = self.count_checked_documents();

        self.publish(ChangeKind::Selection, &before)
    }

    /// Handle a checkbox toggle on `id`.
    ///
    /// Updates the subtree, then every ancestor up to the root, then the
    /// document count, and publishes a single change.
    pub fn on_selection_changed(&mut self, id: NodeId, checked: bool) -> SelectionChange {
        let slot = self.slot(id);
        let before = self.snapshot();

        self.fill_subtree(slot, CheckState::from_checked(checked));
        self.update_ancestors(slot);
        self.count = self.count_checked_documents();

        tracing::debug!(node = %id, checked, count = self.count, "Selection changed");
        self.publish(ChangeKind::Selection, &before)
    }

    /// Clear the whole tree and select only the subtree of `id`.
    pub fn select_exclusive(&mut self, id: NodeId) -> SelectionChange {
        let slot = self.slot(id);
        let before = self.snapshot();

        self.fill_subtree(self.root, CheckState::Unchecked);
        self.fill_subtree(slot, CheckState::Checked);
        self.update_ancestors(slot);
        self.count = self.count_checked_documents();

        tracing::debug!(node = %id, count = self.count, "Exclusive selection");
        self.publish(ChangeKind::Exclusive, &before)
    }

    /// Entry point for a checkbox click; `exclusive` is the modifier key.
    pub fn on_selection(&mut self, id: NodeId, checked: bool, exclusive: bool) -> SelectionChange {
        if exclusive {
            self.select_exclusive(id)
        } else {
            self.on_selection_changed(id, checked)
        }
    }

    pub fn select_all(&mut self) -> SelectionChange {
        self.on_selection_changed(NodeId::ROOT, true)
    }

    pub fn select_none(&mut self) -> SelectionChange {
        self.on_selection_changed(NodeId::ROOT, false)
    }

    /// Fold or unfold a node. Returns true if the state changed.
    pub fn set_expanded(&mut self, id: NodeId, expanded: bool) -> bool {
        let slot = self.slot(id);
        if self.nodes[slot].expanded == expanded {
            return false;
        }
        self.nodes[slot].expanded = expanded;
        for observer in &mut self.observers {
            observer.on_expansion(id, expanded);
        }
        true
    }

    pub fn toggle_expanded(&mut self, id: NodeId) -> bool {
        let expanded = !self.node(id).expanded;
        self.set_expanded(id, expanded);
        expanded
    }

    /// Expand every folder shallower than `depth` (the root has depth 0).
    pub fn expand_to_depth(&mut self, depth: usize) {
        let targets: Vec<NodeId> = self
            .descendants(NodeId::ROOT)
            .filter(|node| node.is_folder() && self.depth(node.id) < depth)
            .map(|node| node.id)
            .collect();
        for id in targets {
            self.set_expanded(id, true);
        }
    }

    pub fn root(&self) -> &Node {
        &self.nodes[self.root]
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).map(|&slot| &self.nodes[slot])
    }

    /// Like [`SelectionTree::get`], but panics on an unknown id.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[self.slot(id)]
    }

    pub fn check_state(&self, id: NodeId) -> CheckState {
        self.node(id).state
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.node(id).expanded
    }

    /// Number of checked documents; folders never count.
    pub fn selected_count(&self) -> usize {
        self.count
    }

    /// Checked documents, in input order.
    pub fn selected_documents(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|node| node.is_leaf && node.state.is_checked())
            .map(|node| node.id)
            .collect()
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        let slot = self.slot(id);
        self.nodes[slot]
            .children
            .iter()
            .map(move |&child| &self.nodes[child])
    }

    pub fn parent(&self, id: NodeId) -> Option<&Node> {
        self.node(id).parent.map(|slot| &self.nodes[slot])
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        let start = self.node(id).parent;
        std::iter::successors(start, move |&slot| self.nodes[slot].parent)
            .map(move |slot| &self.nodes[slot])
    }

    /// The node and its subtree, pre-order.
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        let mut stack = vec![self.slot(id)];
        std::iter::from_fn(move || {
            let slot = stack.pop()?;
            stack.extend(self.nodes[slot].children.iter().rev().copied());
            Some(&self.nodes[slot])
        })
    }

    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    /// All nodes in input order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Recompute a node's state from its children, ignoring what is stored.
    ///
    /// Returns `None` for nodes without children.
    pub fn reduce_children(&self, id: NodeId) -> Option<CheckState> {
        let node = self.node(id);
        if node.children.is_empty() {
            return None;
        }
        Some(self.reduce_slot(self.slot(id)))
    }

    /// True if every node with children matches the reduction of its children.
    pub fn is_consistent(&self) -> bool {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| !node.children.is_empty())
            .all(|(slot, node)| node.state == self.reduce_slot(slot))
    }

    fn slot(&self, id: NodeId) -> usize {
        match self.index.get(&id) {
            Some(&slot) => slot,
            None => panic!("node id {id} is not part of this selection tree"),
        }
    }

    fn fill_subtree(&mut self, slot: usize, state: CheckState) {
        let mut stack = vec![slot];
        while let Some(slot) = stack.pop() {
            let node = &mut self.nodes[slot];
            node.state = state;
            stack.extend(node.children.iter().copied());
        }
    }

    fn update_ancestors(&mut self, slot: usize) {
        let mut parent = self.nodes[slot].parent;
        while let Some(slot) = parent {
            self.nodes[slot].state = self.reduce_slot(slot);
            parent = self.nodes[slot].parent;
        }
    }

    fn reduce_slot(&self, slot: usize) -> CheckState {
        CheckState::reduce(
            self.nodes[slot]
                .children
                .iter()
                .map(|&child| self.nodes[child].state),
        )
    }

    fn count_checked_documents(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.is_leaf && node.state.is_checked())
            .count()
    }

    fn snapshot(&self) -> Vec<CheckState> {
        self.nodes.iter().map(|node| node.state).collect()
    }

    fn publish(&mut self, kind: ChangeKind, before: &[CheckState]) -> SelectionChange {
        let changed = self
            .nodes
            .iter()
            .zip(before)
            .filter(|(node, old)| node.state != **old)
            .map(|(node, _)| (node.id, node.state))
            .collect();

        let change = SelectionChange {
            kind,
            changed,
            count: self.count,
        };
        for observer in &mut self.observers {
            observer.on_selection(&change);
        }
        change
    }
}

impl fmt::Debug for SelectionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionTree")
            .field("nodes", &self.nodes.len())
            .field("root", &self.root().name)
            .field("count", &self.count)
            .field("observers", &self.observers.len())
            .finish()
    }
}
