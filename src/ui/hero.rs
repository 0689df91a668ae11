//! Hero section rendering with the animated copy

use super::components::{render_button, BUTTON_HEIGHT};
use crate::state::{
    AppState, CopyReveal, LineFrame, RevealVariant, BLURB, CTA_LABEL, HEADLINE, SUBHEADLINE,
};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

const TEXT_MAX_WIDTH: u16 = 72;
const CTA_WIDTH: u16 = 20;

/// Vertical extent of one element, in page rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub y: i32,
    pub height: u16,
}

impl Slot {
    fn lowered(self, rows: i32) -> Self {
        Self {
            y: self.y + rows,
            ..self
        }
    }
}

struct Cursor {
    next: i32,
}

impl Cursor {
    fn place(&mut self, height: u16) -> Slot {
        let slot = Slot {
            y: self.next,
            height,
        };
        self.next += i32::from(height);
        slot
    }

    fn gap(&mut self, rows: u16) {
        self.next += i32::from(rows);
    }
}

fn text_rows(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    text.chars().count().div_ceil(width).max(1) as u16
}

/// Settled positions of the hero elements for an area and scroll offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroLayout {
    area: Rect,
    text_width: u16,
    pub headline: Slot,
    pub subheadline: Slot,
    pub blurb: Vec<Slot>,
    pub cta: Slot,
    content_height: u16,
}

impl HeroLayout {
    pub fn new(area: Rect, scroll_offset: u16) -> Self {
        let text_width = area.width.saturating_sub(4).clamp(1, TEXT_MAX_WIDTH);

        let mut cursor = Cursor { next: 0 };
        let headline = cursor.place(text_rows(HEADLINE, text_width));
        cursor.gap(1);
        let subheadline = cursor.place(text_rows(SUBHEADLINE, text_width));
        cursor.gap(1);
        let blurb: Vec<Slot> = BLURB
            .iter()
            .map(|line| cursor.place(text_rows(line, text_width)))
            .collect();
        cursor.gap(2);
        let cta = cursor.place(BUTTON_HEIGHT);
        let content_height = cursor.next as u16;

        let top = i32::from(area.y)
            + i32::from((area.height.saturating_sub(content_height) / 2).max(1))
            - i32::from(scroll_offset);

        Self {
            area,
            text_width,
            headline: headline.lowered(top),
            subheadline: subheadline.lowered(top),
            blurb: blurb.into_iter().map(|slot| slot.lowered(top)).collect(),
            cta: cta.lowered(top),
            content_height,
        }
    }

    /// Furthest the page can scroll before the content runs out
    pub fn max_scroll(&self) -> u16 {
        (self.content_height + 2).saturating_sub(self.area.height)
    }

    /// Screen rect for a slot, if it lies fully inside the hero area
    fn rect(&self, slot: Slot, width: u16) -> Option<Rect> {
        let top = i32::from(self.area.y);
        let bottom = i32::from(self.area.bottom());
        if slot.y < top || slot.y + i32::from(slot.height) > bottom {
            return None;
        }
        let width = width.min(self.area.width);
        Some(Rect {
            x: self.area.x + (self.area.width - width) / 2,
            y: slot.y as u16,
            width,
            height: slot.height,
        })
    }

    /// Clickable area of the call to action once settled
    pub fn cta_area(&self) -> Option<Rect> {
        self.rect(self.cta, CTA_WIDTH)
    }
}

/// Draw the hero section
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, now: Instant) {
    let layout = HeroLayout::new(area, state.scroll_offset);
    let hero = &state.hero;

    let headline_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    draw_reveal(frame, &layout, &[layout.headline], &hero.headline, headline_style, now);
    draw_reveal(
        frame,
        &layout,
        &[layout.subheadline],
        &hero.subheadline,
        Style::default().fg(Color::Cyan),
        now,
    );
    draw_reveal(
        frame,
        &layout,
        &layout.blurb,
        &hero.blurb,
        Style::default().fg(Color::Gray),
        now,
    );
    draw_cta(frame, &layout, &hero.cta, now);
}

fn draw_reveal(
    frame: &mut Frame,
    layout: &HeroLayout,
    slots: &[Slot],
    reveal: &CopyReveal,
    style: Style,
    now: Instant,
) {
    for (line, slot) in reveal.at(now).iter().zip(slots) {
        let Some((slot, style)) = place_line(line, *slot, reveal.variant(), style) else {
            continue;
        };
        let Some(rect) = layout.rect(slot, layout.text_width) else {
            continue;
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(line.text, style)))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, rect);
    }
}

/// Where and how a sampled line is drawn; `None` while it is hidden
fn place_line(
    line: &LineFrame<'_>,
    slot: Slot,
    variant: RevealVariant,
    style: Style,
) -> Option<(Slot, Style)> {
    match variant {
        RevealVariant::Lines => {
            if !line.is_visible() {
                return None;
            }
            // Still emerging from the mask
            let style = if line.rise > 0.15 {
                style.add_modifier(Modifier::DIM)
            } else {
                style
            };
            Some((slot, style))
        }
        RevealVariant::FadeUp => {
            if line.opacity <= 0.0 {
                return None;
            }
            let offset = (line.rise * CopyReveal::FADE_ROWS).round() as i32;
            Some((slot.lowered(offset), style.fg(fade_color(line.opacity))))
        }
    }
}

fn fade_color(opacity: f32) -> Color {
    if opacity < 0.35 {
        Color::DarkGray
    } else if opacity < 0.7 {
        Color::Gray
    } else {
        Color::White
    }
}

fn draw_cta(frame: &mut Frame, layout: &HeroLayout, reveal: &CopyReveal, now: Instant) {
    let frames = reveal.at(now);
    let Some(line) = frames.first() else {
        return;
    };
    if line.opacity <= 0.0 {
        return;
    }
    let offset = (line.rise * CopyReveal::FADE_ROWS).round() as i32;
    let Some(rect) = layout.rect(layout.cta.lowered(offset), CTA_WIDTH) else {
        return;
    };
    render_button(frame, rect, line.text, line.opacity >= 1.0, line.opacity >= 0.5);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn render(state: &AppState, now: Instant, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| draw(frame, frame.area(), state, now))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_nothing_drawn_before_delays() {
        let start = Instant::now();
        let state = AppState::new(start);
        let screen = render(&state, start + Duration::from_millis(100), 100, 30);
        assert!(!screen.contains("Welcome"));
        assert!(!screen.contains(CTA_LABEL));
    }

    #[test]
    fn test_settled_copy_is_drawn() {
        let start = Instant::now();
        let state = AppState::new(start);
        let screen = render(&state, start + Duration::from_secs(3), 100, 30);
        assert!(screen.contains(HEADLINE));
        assert!(screen.contains(SUBHEADLINE));
        assert!(screen.contains(CTA_LABEL));
    }

    #[test]
    fn test_skip_settles_immediately() {
        let start = Instant::now();
        let mut state = AppState::new(start);
        state.hero.skip();
        let screen = render(&state, start, 100, 30);
        assert!(screen.contains(HEADLINE));
    }

    #[test]
    fn test_cta_area_is_centered_when_visible() {
        let area = Rect::new(0, 0, 100, 30);
        let layout = HeroLayout::new(area, 0);
        let cta = layout.cta_area().unwrap();
        assert_eq!(cta.width, CTA_WIDTH);
        assert_eq!(cta.x, (100 - CTA_WIDTH) / 2);
        assert_eq!(layout.max_scroll(), 0);
    }

    #[test]
    fn test_short_area_scrolls() {
        let area = Rect::new(0, 0, 40, 8);
        let layout = HeroLayout::new(area, 0);
        assert!(layout.max_scroll() > 0);
        assert!(layout.cta_area().is_none());

        let scrolled = HeroLayout::new(area, layout.max_scroll());
        assert!(scrolled.cta_area().is_some());
    }

    #[test]
    fn test_wrapped_text_takes_more_rows() {
        assert_eq!(text_rows("abcdef", 3), 2);
        assert_eq!(text_rows("", 10), 1);
        assert_eq!(text_rows("abc", 10), 1);
    }
}
