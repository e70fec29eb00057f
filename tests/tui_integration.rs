//! Integration tests for the TUI module.
//!
//! These tests exercise the TUI with simulated input, verifying correct
//! behavior without requiring an actual terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use doc_browser::config::BrowserConfig;
use doc_browser::selection::{CheckState, NodeDescriptor, NodeId, SelectionTree};
use doc_browser::tui::app::Mode;
use doc_browser::tui::event::handle_key_event;
use doc_browser::tui::ui::render;
use doc_browser::tui::App;
use ratatui::{backend::TestBackend, Terminal};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

fn tree() -> SelectionTree {
    SelectionTree::from_descriptors(vec![
        NodeDescriptor::root("Project"),
        NodeDescriptor::folder(1, "Chapter 1", 0),
        NodeDescriptor::document(2, "intro.md", 1),
        NodeDescriptor::document(3, "body.md", 1),
        NodeDescriptor::folder(5, "Chapter 2", 0),
        NodeDescriptor::document(6, "outro.md", 5),
        NodeDescriptor::document(4, "notes.md", 0),
    ])
    .unwrap()
}

fn app() -> App {
    App::new(tree(), &BrowserConfig::default())
}

fn row_ids(app: &App) -> Vec<u32> {
    app.visible_rows.iter().map(|row| row.id.0).collect()
}

fn render_to_string(app: &App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| render(app, frame)).unwrap();

    let buffer = terminal.backend().buffer();
    let mut output = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            output.push_str(buffer[(x, y)].symbol());
        }
        output.push('\n');
    }
    output
}

#[test]
fn test_tui_initial_rows() {
    let app = app();
    assert_eq!(row_ids(&app), vec![1, 5, 4]);
    assert_eq!(app.selected, 0);
}

#[test]
fn test_tui_navigation() {
    let mut app = app();

    handle_key_event(&mut app, key(KeyCode::Down));
    assert_eq!(app.selected, 1);

    handle_key_event(&mut app, key_char('j'));
    assert_eq!(app.selected, 2);

    // Clamped at the bottom
    handle_key_event(&mut app, key(KeyCode::Down));
    assert_eq!(app.selected, 2);

    handle_key_event(&mut app, key_char('k'));
    assert_eq!(app.selected, 1);

    handle_key_event(&mut app, key_char('g'));
    assert_eq!(app.selected, 0);

    handle_key_event(&mut app, key_char('G'));
    assert_eq!(app.selected, 2);

    handle_key_event(&mut app, key(KeyCode::PageUp));
    assert_eq!(app.selected, 0);
}

#[test]
fn test_tui_expand_collapse() {
    let mut app = app();

    handle_key_event(&mut app, key(KeyCode::Right));
    assert_eq!(row_ids(&app), vec![1, 2, 3, 5, 4]);

    handle_key_event(&mut app, key(KeyCode::Down));
    handle_key_event(&mut app, key_char('h'));
    assert_eq!(app.selected, 0, "left on a document goes to its folder");

    handle_key_event(&mut app, key(KeyCode::Left));
    assert_eq!(row_ids(&app), vec![1, 5, 4]);
}

#[test]
fn test_tui_checkbox_updates_parents_and_count() {
    let mut app = app();

    handle_key_event(&mut app, key(KeyCode::Right));
    handle_key_event(&mut app, key(KeyCode::Down));
    handle_key_event(&mut app, key_char(' '));

    assert_eq!(app.tree.check_state(NodeId(2)), CheckState::Checked);
    assert_eq!(app.tree.check_state(NodeId(1)), CheckState::Indeterminate);
    assert_eq!(app.tree.check_state(NodeId(0)), CheckState::Indeterminate);
    assert_eq!(app.count_text(), "1 documents selected");

    handle_key_event(&mut app, key_char(' '));
    assert_eq!(app.tree.check_state(NodeId(0)), CheckState::Unchecked);
    assert_eq!(app.selected_count(), 0);
}

#[test]
fn test_tui_exclusive_selection() {
    let mut app = app();

    handle_key_event(&mut app, key_char('a'));
    assert_eq!(app.selected_count(), 4);

    // Chapter 2
    handle_key_event(&mut app, key(KeyCode::Down));
    handle_key_event(&mut app, key_char('x'));

    assert_eq!(app.selection(), vec![NodeId(6)]);
    assert_eq!(app.tree.check_state(NodeId(1)), CheckState::Unchecked);
    assert_eq!(app.tree.check_state(NodeId(5)), CheckState::Checked);
}

#[test]
fn test_tui_select_none() {
    let mut app = app();
    handle_key_event(&mut app, key_char('a'));
    handle_key_event(&mut app, key_char('n'));
    assert!(app.selection().is_empty());
}

#[test]
fn test_tui_accept_and_quit() {
    let mut app = app();
    handle_key_event(&mut app, key_char(' '));
    handle_key_event(&mut app, key(KeyCode::Enter));
    assert!(app.should_quit);
    assert!(app.accepted);
    assert_eq!(app.selection(), vec![NodeId(2), NodeId(3)]);

    let mut app = self::app();
    handle_key_event(&mut app, key_char('q'));
    assert!(app.should_quit);
    assert!(!app.accepted);
}

#[test]
fn test_tui_help_mode_blocks_actions() {
    let mut app = app();
    handle_key_event(&mut app, key_char('?'));
    assert_eq!(app.mode, Mode::Help);

    handle_key_event(&mut app, key_char(' '));
    assert_eq!(app.selected_count(), 0);

    handle_key_event(&mut app, key_char('?'));
    assert_eq!(app.mode, Mode::Normal);
}

#[test]
fn test_tui_root_row_is_bound_when_shown() {
    let config = BrowserConfig {
        show_root: true,
        ..BrowserConfig::default()
    };
    let mut app = App::new(tree(), &config);
    assert_eq!(row_ids(&app), vec![0, 1, 5, 4]);

    handle_key_event(&mut app, key_char(' '));
    assert_eq!(app.selected_count(), 4);
}

#[test]
fn test_tui_render_reflects_selection() {
    let mut app = app();
    handle_key_event(&mut app, key(KeyCode::Down));
    handle_key_event(&mut app, key_char(' '));

    let screen = render_to_string(&app, 80, 12);
    assert!(screen.contains("1 documents selected"));
    assert!(screen.contains("► [x] Chapter 2"));
    assert!(screen.contains("► [ ] Chapter 1"));
}

#[test]
fn test_tui_custom_count_label() {
    let config = BrowserConfig {
        count_label: "picked".to_string(),
        ..BrowserConfig::default()
    };
    let app = App::new(tree(), &config);
    let screen = render_to_string(&app, 80, 12);
    assert!(screen.contains("0 picked"));
}

/// Log sink that keeps everything written to it.
#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLog {
    type Writer = CapturedLog;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// The `-vv` logging setup, writing into `log` instead of stderr.
fn debug_logging(log: &CapturedLog) -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(log.clone()))
        .with(EnvFilter::new("doc_browser=debug"))
}

#[test]
fn test_tui_keypress_writes_no_logs_while_browsing() {
    let log = CapturedLog::default();
    let mut app = app();

    tracing::subscriber::with_default(debug_logging(&log), || {
        let _quiet = doc_browser::tui::silence_logging();
        handle_key_event(&mut app, key_char(' '));
        handle_key_event(&mut app, key_char('a'));
        handle_key_event(&mut app, key(KeyCode::Right));
    });

    assert_eq!(app.selected_count(), 4);
    assert_eq!(log.text(), "");
}

#[test]
fn test_tree_logs_selection_outside_the_browser() {
    let log = CapturedLog::default();
    let mut tree = tree();

    tracing::subscriber::with_default(debug_logging(&log), || {
        tree.on_selection(NodeId(1), true, false);
    });

    assert!(log.text().contains("Selection changed"));
}
