//! Application state for the TUI.

use std::cell::Cell;
use std::rc::Rc;

use super::ui::Palette;
use crate::config::BrowserConfig;
use crate::selection::{CheckState, Node, NodeId, SelectionChange, SelectionObserver, SelectionTree};

/// The current UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal navigation mode.
    Normal,
    /// Help overlay mode.
    Help,
}

/// A row in the flattened tree view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRow {
    /// The node shown on this row.
    pub id: NodeId,
    /// Indentation level (0 = outermost row).
    pub depth: usize,
}

/// Keeps the header count in step with the tree's notifications.
struct CountLabel {
    count: Rc<Cell<usize>>,
}

impl SelectionObserver for CountLabel {
    fn on_selection(&mut self, change: &SelectionChange) {
        self.count.set(change.count);
    }
}

/// Main application state for the TUI.
pub struct App {
    /// The tree being browsed.
    pub tree: SelectionTree,

    /// Flattened visible rows (for rendering).
    pub visible_rows: Vec<VisibleRow>,

    /// Currently selected index in visible_rows.
    pub selected: usize,

    /// Current UI mode.
    pub mode: Mode,

    /// Application should quit.
    pub should_quit: bool,

    /// The user confirmed the selection before quitting.
    pub accepted: bool,

    /// Status message to display.
    pub status_message: Option<String>,

    /// Bind the root node as a row.
    pub show_root: bool,

    /// Text after the selection count in the header.
    pub count_label: String,

    /// Colors used when drawing.
    pub palette: Palette,

    count: Rc<Cell<usize>>,
}

impl App {
    /// Create a new App instance.
    pub fn new(mut tree: SelectionTree, config: &BrowserConfig) -> Self {
        let count = Rc::new(Cell::new(tree.selected_count()));
        tree.subscribe(Box::new(CountLabel {
            count: Rc::clone(&count),
        }));
        tree.expand_to_depth(config.expand_depth);

        let mut app = Self {
            tree,
            visible_rows: Vec::new(),
            selected: 0,
            mode: Mode::Normal,
            should_quit: false,
            accepted: false,
            status_message: None,
            show_root: config.show_root,
            count_label: config.count_label.clone(),
            palette: Palette::default(),
            count,
        };
        app.rebuild_visible_rows();
        app
    }

    /// Show or hide the root row.
    pub fn with_root(mut self, show_root: bool) -> Self {
        self.show_root = show_root;
        self.rebuild_visible_rows();
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Selection count as last announced by the tree.
    pub fn selected_count(&self) -> usize {
        self.count.get()
    }

    /// Header text, e.g. `3 documents selected`.
    pub fn count_text(&self) -> String {
        format!("{} {}", self.selected_count(), self.count_label)
    }

    /// Get the currently selected row, if any.
    pub fn selected_row(&self) -> Option<&VisibleRow> {
        self.visible_rows.get(self.selected)
    }

    /// Get the node under the cursor, if any.
    pub fn selected_node(&self) -> Option<&Node> {
        self.selected_row().map(|row| self.tree.node(row.id))
    }

    /// Documents picked so far, in tree file order.
    pub fn selection(&self) -> Vec<NodeId> {
        self.tree.selected_documents()
    }

    /// Recompute the visible rows from the fold state.
    ///
    /// The cursor stays on the same node when it is still visible.
    pub fn rebuild_visible_rows(&mut self) {
        let current = self.selected_row().map(|row| row.id);

        let mut rows = Vec::new();
        let root = self.tree.root().id();
        if self.show_root {
            self.push_rows(root, 0, &mut rows);
        } else {
            let children: Vec<NodeId> = self.tree.children(root).map(|node| node.id()).collect();
            for child in children {
                self.push_rows(child, 0, &mut rows);
            }
        }
        self.visible_rows = rows;

        if let Some(id) = current {
            if let Some(index) = self.visible_rows.iter().position(|row| row.id == id) {
                self.selected = index;
                return;
            }
        }
        self.selected = self.selected.min(self.visible_rows.len().saturating_sub(1));
    }

    fn push_rows(&self, id: NodeId, depth: usize, rows: &mut Vec<VisibleRow>) {
        rows.push(VisibleRow { id, depth });
        if !self.tree.is_expanded(id) {
            return;
        }
        for child in self.tree.children(id) {
            self.push_rows(child.id(), depth + 1, rows);
        }
    }

    /// Move the cursor by `delta` rows, clamped to the list.
    pub fn move_selection(&mut self, delta: isize) {
        if self.visible_rows.is_empty() {
            return;
        }
        let last = self.visible_rows.len() - 1;
        let target = self.selected as isize + delta;
        self.selected = target.clamp(0, last as isize) as usize;
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.visible_rows.len().saturating_sub(1);
    }

    pub fn expand_selected(&mut self) {
        let Some(node) = self.selected_node() else {
            return;
        };
        if node.is_folder() && !node.is_expanded() {
            let id = node.id();
            self.tree.set_expanded(id, true);
            self.rebuild_visible_rows();
        }
    }

    /// Collapse an open folder, or jump to the parent row.
    pub fn collapse_selected(&mut self) {
        let Some(node) = self.selected_node() else {
            return;
        };
        let id = node.id();

        if node.is_folder() && node.is_expanded() {
            self.tree.set_expanded(id, false);
            self.rebuild_visible_rows();
            return;
        }

        if let Some(parent) = self.tree.parent(id).map(|p| p.id()) {
            if let Some(index) = self.visible_rows.iter().position(|row| row.id == parent) {
                self.selected = index;
            }
        }
    }

    pub fn toggle_fold_selected(&mut self) {
        let Some(node) = self.selected_node() else {
            return;
        };
        if node.is_folder() {
            let id = node.id();
            self.tree.toggle_expanded(id);
            self.rebuild_visible_rows();
        }
    }

    /// Flip the checkbox under the cursor; a partial folder becomes checked.
    pub fn toggle_check_selected(&mut self) {
        let Some(node) = self.selected_node() else {
            return;
        };
        let id = node.id();
        let checked = node.check_state() != CheckState::Checked;
        self.tree.on_selection(id, checked, false);
    }

    /// Check only the node under the cursor, clearing everything else.
    pub fn select_only_selected(&mut self) {
        let Some(node) = self.selected_node() else {
            return;
        };
        let id = node.id();
        let name = node.name().to_string();
        self.tree.on_selection(id, true, true);
        self.status_message = Some(format!("Selected only {}", name));
    }

    pub fn select_all(&mut self) {
        self.tree.select_all();
        self.status_message = Some("Selected all documents".to_string());
    }

    pub fn select_none(&mut self) {
        self.tree.select_none();
        self.status_message = Some("Cleared selection".to_string());
    }

    /// Confirm the selection and leave.
    pub fn accept(&mut self) {
        self.accepted = true;
        self.should_quit = true;
    }
}
