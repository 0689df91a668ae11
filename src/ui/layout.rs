//! Page layout (logo bar, hero, status bar)

use crate::app::App;
use crate::platform::SEND_SHORTCUT;
use crate::state::{SubmissionStatus, BRAND};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Height of the fixed logo bar
pub const LOGO_BAR_HEIGHT: u16 = 3;

/// Split the screen into logo bar, hero and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(LOGO_BAR_HEIGHT), // Logo bar
            Constraint::Min(0),                  // Hero
            Constraint::Length(1),               // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the logo bar with the centered brand mark
pub fn draw_logo_bar(frame: &mut Frame, area: Rect) {
    let spaced: String = BRAND
        .chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let logo = Paragraph::new(Line::from(Span::styled(
        spaced,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(logo, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let hints = get_hints(app);
    let status = Paragraph::new(Line::from(Span::styled(
        format!(" {hints}"),
        Style::default().fg(Color::Gray),
    )))
    .style(Style::default().bg(Color::DarkGray));

    frame.render_widget(status, area);
}

/// Keyboard hints for what currently has focus
fn get_hints(app: &App) -> String {
    if !app.state.dialog.is_mounted() {
        return "Enter:let's talk  j/k:scroll  q:quit".to_string();
    }

    let sending = app
        .state
        .form
        .as_ref()
        .is_some_and(|form| form.status() == SubmissionStatus::Sending);
    if sending {
        "Sending…  Esc:close".to_string()
    } else {
        format!("Tab:next  Shift+Tab:prev  {SEND_SHORTCUT}:send  Esc:close")
    }
}
