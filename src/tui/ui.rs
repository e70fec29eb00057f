//! UI rendering for the TUI.

use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::app::{App, Mode, VisibleRow};
use crate::selection::CheckState;

/// Render the entire UI.
pub fn render(app: &App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Tree view
            Constraint::Length(2), // Footer
        ])
        .split(frame.area());

    render_header(app, frame, chunks[0]);
    render_tree_area(app, frame, chunks[1]);
    render_footer(app, frame, chunks[2]);

    if app.mode == Mode::Help {
        render_help_overlay(app, frame);
    }
}

/// Colors for each part of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// `false` leaves every cell in the terminal's default colors.
    pub colored: bool,
    pub text: Color,
    pub border: Color,
    pub accent: Color,
    pub folder: Color,
    pub muted: Color,
    pub checked: Color,
    pub partial: Color,
    pub highlight: Color,
}

impl Palette {
    /// Light text for dark terminal backgrounds.
    pub const fn dark() -> Self {
        Self {
            colored: true,
            text: Color::White,
            border: Color::Gray,
            accent: Color::Cyan,
            folder: Color::Blue,
            muted: Color::DarkGray,
            checked: Color::Green,
            partial: Color::Yellow,
            highlight: Color::DarkGray,
        }
    }

    /// Dark text for light terminal backgrounds.
    pub const fn light() -> Self {
        Self {
            colored: true,
            text: Color::Black,
            border: Color::DarkGray,
            accent: Color::Blue,
            folder: Color::Magenta,
            muted: Color::Gray,
            checked: Color::Green,
            partial: Color::Red,
            highlight: Color::Gray,
        }
    }

    pub const fn none() -> Self {
        Self {
            colored: false,
            ..Self::dark()
        }
    }

    /// Palette for a `tui.color_scheme` value; `auto` uses the dark one.
    pub fn from_scheme(scheme: &str) -> Self {
        match scheme {
            "light" => Self::light(),
            "none" => Self::none(),
            _ => Self::dark(),
        }
    }

    /// Foreground color, or the terminal default when colors are off.
    fn fg(&self, color: Color) -> Style {
        if self.colored {
            Style::default().fg(color)
        } else {
            Style::default()
        }
    }

    fn highlight(&self) -> Style {
        if self.colored {
            Style::default().bg(self.highlight)
        } else {
            Style::default().add_modifier(Modifier::REVERSED)
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let header_text = format!(" {}  │  {}", app.tree.root().name(), app.count_text());

    let block = Block::default()
        .title(" Doc Browser ")
        .borders(Borders::ALL)
        .border_style(app.palette.fg(app.palette.accent));

    let paragraph = Paragraph::new(header_text)
        .block(block)
        .style(app.palette.fg(app.palette.text));

    frame.render_widget(paragraph, area);
}

fn render_tree_area(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.palette.fg(app.palette.border));

    if app.visible_rows.is_empty() {
        let paragraph = Paragraph::new("No documents")
            .block(block)
            .alignment(Alignment::Center)
            .style(app.palette.fg(app.palette.muted));

        frame.render_widget(paragraph, area);
        return;
    }

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let visible_height = inner_area.height as usize;
    let scroll_offset = calculate_scroll_offset(app.selected, visible_height, app.visible_rows.len());

    for (i, row) in app
        .visible_rows
        .iter()
        .skip(scroll_offset)
        .take(visible_height)
        .enumerate()
    {
        let y = inner_area.y + i as u16;
        let is_selected = scroll_offset + i == app.selected;
        let area = Rect::new(inner_area.x, y, inner_area.width, 1);

        frame.render_widget(Paragraph::new(row_line(app, row, is_selected)), area);
    }
}

fn calculate_scroll_offset(selected: usize, visible_height: usize, total: usize) -> usize {
    if total <= visible_height {
        return 0;
    }

    let padding = 3.min(visible_height / 4);

    if selected < padding {
        0
    } else if selected >= total - padding {
        total.saturating_sub(visible_height)
    } else {
        selected.saturating_sub(padding)
    }
}

fn checkbox_style(palette: &Palette, state: CheckState) -> Style {
    match state {
        CheckState::Checked => palette.fg(palette.checked),
        CheckState::Indeterminate => palette.fg(palette.partial),
        CheckState::Unchecked => palette.fg(palette.muted),
    }
}

fn row_line<'a>(app: &'a App, row: &VisibleRow, is_selected: bool) -> Line<'a> {
    let node = app.tree.node(row.id);
    let indent = "  ".repeat(row.depth);

    let icon = if node.is_folder() {
        if node.is_expanded() {
            "▼ "
        } else {
            "► "
        }
    } else {
        "  "
    };

    let palette = &app.palette;
    let name_style = if node.is_folder() {
        palette.fg(palette.folder).bold()
    } else {
        palette.fg(palette.text)
    };

    let mut spans = vec![
        Span::styled(format!("{}{}", indent, icon), name_style),
        Span::styled(node.check_state().glyph(), checkbox_style(palette, node.check_state())),
        Span::raw(" "),
        Span::styled(node.name(), name_style),
    ];

    if node.is_folder() && !node.is_expanded() && node.has_children() {
        spans.push(Span::styled(
            format!(" ({})", node.child_count()),
            palette.fg(palette.muted),
        ));
    }

    let line = Line::from(spans);
    if is_selected {
        line.style(palette.highlight())
    } else {
        line
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let hints = match app.mode {
        Mode::Normal => {
            "[↑↓] Navigate  [←→] Fold  [Space] Toggle  [x] Only  [a/n] All/None  [Enter] Accept  [?] Help  [q] Quit"
        }
        Mode::Help => "[Esc] Close",
    };

    // Show status message if present, otherwise hints
    let text = app.status_message.as_deref().unwrap_or(hints);

    let paragraph = Paragraph::new(text)
        .style(app.palette.fg(app.palette.muted))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn render_help_overlay(app: &App, frame: &mut Frame) {
    let area = frame.area();

    let help_width = 60u16.min(area.width.saturating_sub(8));
    let help_height = 24u16.min(area.height.saturating_sub(4));
    let help_area = Rect {
        x: (area.width.saturating_sub(help_width)) / 2,
        y: (area.height.saturating_sub(help_height)) / 2,
        width: help_width,
        height: help_height,
    };

    frame.render_widget(Clear, help_area);

    let help_text = r#"
 NAVIGATION
 ─────────────────────────────────
 ↑/k        Move up
 ↓/j        Move down
 g/G        Go to top / bottom
 PgUp/PgDn  Move one page
 →/l        Expand folder
 ←/h        Collapse / Go to parent
 o/Tab      Toggle folder

 SELECTION
 ─────────────────────────────────
 Space      Toggle checkbox
 Alt+Space  Select only this
 x          Select only this
 a          Select all
 n          Select none

 Enter      Accept selection
 ?          Toggle this help
 q/Esc      Quit
"#;

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.palette.fg(app.palette.accent));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .style(app.palette.fg(app.palette.text));

    frame.render_widget(paragraph, help_area);
}
