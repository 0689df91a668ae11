//! Base dialog component

use crate::state::{DialogState, HitTarget};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Instant;

/// Maximum width of the dialog panel
pub const DIALOG_MAX_WIDTH: u16 = 64;
/// Preferred height of the dialog panel
pub const DIALOG_HEIGHT: u16 = 30;
/// Rows the panel rises while opening
const SLIDE_ROWS: f32 = 3.0;
const CLOSE_LABEL: &str = "[x]";

/// Screen regions of a mounted dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogLayout {
    pub backdrop: Rect,
    pub panel: Rect,
    pub close_button: Rect,
    pub body: Rect,
}

impl DialogLayout {
    /// Compute the dialog regions for a screen area and animation progress
    pub fn new(area: Rect, visibility: f32) -> Self {
        let width = DIALOG_MAX_WIDTH.min(area.width.saturating_sub(4));
        let height = DIALOG_HEIGHT.min(area.height.saturating_sub(2));

        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let centered_y = area.y + (area.height.saturating_sub(height)) / 2;
        let slide = ((1.0 - visibility.clamp(0.0, 1.0)) * SLIDE_ROWS).round() as u16;
        let y = (centered_y + slide).min(area.bottom().saturating_sub(height));

        let panel = Rect {
            x,
            y,
            width,
            height,
        };

        let label_width = CLOSE_LABEL.len() as u16;
        let close_button = Rect {
            x: panel.right().saturating_sub(label_width + 2),
            y: panel.y,
            width: label_width.min(panel.width),
            height: panel.height.min(1),
        };

        let body = Rect {
            x: panel.x + 2,
            y: panel.y + 1,
            width: panel.width.saturating_sub(4),
            height: panel.height.saturating_sub(2),
        };

        Self {
            backdrop: area,
            panel,
            close_button,
            body,
        }
    }

    /// Topmost element under a pointer position
    pub fn hit_test(&self, column: u16, row: u16) -> HitTarget {
        let position = Position::new(column, row);
        if self.close_button.contains(position) {
            HitTarget::CloseButton
        } else if self.panel.contains(position) {
            HitTarget::Content
        } else {
            HitTarget::Backdrop
        }
    }
}

/// Render a modal dialog over everything already drawn in the frame.
///
/// The backdrop dims the page, the panel clears its own area and `body`
/// draws the hosted content inside the border.
pub fn render_dialog(
    frame: &mut Frame,
    dialog: &DialogState,
    title: &str,
    now: Instant,
    body: impl FnOnce(&mut Frame, Rect),
) {
    if !dialog.is_mounted() {
        return;
    }

    let layout = DialogLayout::new(frame.area(), dialog.visibility(now));

    // Dim the page behind; the backdrop itself carries no content
    frame.buffer_mut().set_style(
        layout.backdrop,
        Style::default()
            .fg(Color::DarkGray)
            .bg(Color::Black)
            .remove_modifier(Modifier::BOLD),
    );

    frame.render_widget(Clear, layout.panel);

    let border_color = if dialog.accepts_input() {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(Color::Black));
    frame.render_widget(block, layout.panel);

    let close = Paragraph::new(Line::from(Span::styled(
        CLOSE_LABEL,
        Style::default().fg(Color::Gray),
    )));
    frame.render_widget(close, layout.close_button);

    body(frame, layout.body);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Rect {
        Rect::new(0, 0, 100, 40)
    }

    #[test]
    fn test_open_panel_is_centered() {
        let layout = DialogLayout::new(screen(), 1.0);
        assert_eq!(layout.panel.width, DIALOG_MAX_WIDTH);
        assert_eq!(layout.panel.x, (100 - DIALOG_MAX_WIDTH) / 2);
        assert_eq!(layout.panel.y, (40 - DIALOG_HEIGHT) / 2);
    }

    #[test]
    fn test_opening_panel_starts_lower() {
        let hidden = DialogLayout::new(screen(), 0.0);
        let shown = DialogLayout::new(screen(), 1.0);
        assert!(hidden.panel.y > shown.panel.y);
    }

    #[test]
    fn test_panel_fits_small_screens() {
        let area = Rect::new(0, 0, 40, 20);
        let layout = DialogLayout::new(area, 0.0);
        assert!(layout.panel.right() <= area.right());
        assert!(layout.panel.bottom() <= area.bottom());
    }

    #[test]
    fn test_hit_test_layers() {
        let layout = DialogLayout::new(screen(), 1.0);

        assert_eq!(layout.hit_test(0, 0), HitTarget::Backdrop);
        assert_eq!(
            layout.hit_test(layout.body.x, layout.body.y),
            HitTarget::Content
        );
        // The panel border is part of the dialog, not the backdrop
        assert_eq!(
            layout.hit_test(layout.panel.x, layout.panel.y),
            HitTarget::Content
        );
        assert_eq!(
            layout.hit_test(layout.close_button.x, layout.close_button.y),
            HitTarget::CloseButton
        );
    }

    #[test]
    fn test_body_sits_inside_panel() {
        let layout = DialogLayout::new(screen(), 1.0);
        assert!(layout.panel.contains(Position::new(layout.body.x, layout.body.y)));
        assert!(layout.body.right() < layout.panel.right());
        assert!(layout.body.bottom() < layout.panel.bottom());
    }
}
