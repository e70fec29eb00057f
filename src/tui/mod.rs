//! TUI module for interactive document selection.

pub mod app;
pub mod event;
pub mod ui;

use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::subscriber::{DefaultGuard, NoSubscriber};

use crate::error::Result;

pub use app::App;

const TICK: Duration = Duration::from_millis(250);

/// Drop log events emitted on this thread until the guard is dropped.
///
/// Log output goes to stderr, which is the same tty the browser draws on.
pub fn silence_logging() -> DefaultGuard {
    tracing::subscriber::set_default(NoSubscriber::default())
}

/// Run the browser until the user quits or accepts.
pub fn run(app: &mut App) -> Result<()> {
    let result = {
        let _quiet = silence_logging();
        run_terminal(app)
    };

    tracing::debug!(
        accepted = app.accepted,
        count = app.selected_count(),
        "Browser closed"
    );
    result
}

fn run_terminal(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;
        event::handle_events(app, TICK)?;
    }
    Ok(())
}
