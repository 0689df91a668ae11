//! Contact form rendering

use super::field_renderer::{draw_error_text, draw_field};
use crate::state::{ContactForm, FieldName, FormFocus, SubmissionStatus};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
    Frame,
};
use std::time::Instant;

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];
const MESSAGE_ROWS: u16 = 7;

/// Where each part of the contact form sits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactFormLayout {
    pub header: Rect,
    pub progress: Rect,
    /// Input box and error line per field, in `FieldName::ALL` order
    pub fields: [(Rect, Rect); 4],
    pub submit: Rect,
    pub status: Rect,
}

impl ContactFormLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),                // Header
                Constraint::Length(1),                // Progress
                Constraint::Length(4),                // Name
                Constraint::Length(4),                // Email
                Constraint::Length(4),                // Company
                Constraint::Length(MESSAGE_ROWS + 1), // Message
                Constraint::Length(BUTTON_HEIGHT),    // Submit
                Constraint::Min(0),                   // Status
            ])
            .split(area);

        // Input box above a full-width error line
        let split = |cell: Rect| {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(1)])
                .split(cell);
            (parts[0], parts[1])
        };

        let submit_width = rows[6].width.min(24);
        let submit = Rect {
            x: rows[6].x + (rows[6].width - submit_width) / 2,
            width: submit_width,
            ..rows[6]
        };

        Self {
            header: rows[0],
            progress: rows[1],
            fields: [split(rows[2]), split(rows[3]), split(rows[4]), split(rows[5])],
            submit,
            status: rows[7],
        }
    }

    pub fn field_area(&self, field: FieldName) -> (Rect, Rect) {
        let index = FieldName::ALL
            .iter()
            .position(|f| *f == field)
            .unwrap_or_default();
        self.fields[index]
    }

    /// Which focusable control, if any, is at a pointer position
    pub fn focus_at(&self, column: u16, row: u16) -> Option<FormFocus> {
        let position = Position::new(column, row);
        if self.submit.contains(position) {
            return Some(FormFocus::Submit);
        }
        FieldName::ALL
            .iter()
            .zip(self.fields.iter())
            .find(|(_, (input, _))| input.contains(position))
            .map(|(field, _)| FormFocus::Field(*field))
    }
}

/// Draw the contact form inside the dialog body
pub fn draw_contact_form(frame: &mut Frame, area: Rect, form: &ContactForm, now: Instant) {
    let layout = ContactFormLayout::new(area);
    let status = form.status();

    let header = Paragraph::new(Line::from(Span::styled(
        "Get in Touch",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(header, layout.header);

    if status == SubmissionStatus::Sending {
        draw_progress(frame, layout.progress, now);
    }

    for field in FieldName::ALL {
        let (input, error) = layout.field_area(field);
        let visible_error = form.visible_error(field);
        draw_field(
            frame,
            input,
            field.label(),
            form.value(field),
            form.focus() == FormFocus::Field(field),
            field.is_multiline(),
            visible_error.is_some(),
        );
        draw_error_text(frame, error, visible_error);
    }

    let label = if status == SubmissionStatus::Sending {
        format!("{} Sending…", spinner_frame(now))
    } else {
        "Send Message".to_string()
    };
    render_button(
        frame,
        layout.submit,
        &label,
        form.focus() == FormFocus::Submit,
        form.can_submit(),
    );

    if let Some(message) = status.message() {
        let color = if status == SubmissionStatus::Ok {
            Color::Green
        } else {
            Color::Red
        };
        let banner = Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(banner, layout.status);
    }
}

/// Indeterminate progress strip shown while sending
fn draw_progress(frame: &mut Frame, area: Rect, now: Instant) {
    let ratio = (phase_millis(now) % 1200) as f64 / 1200.0;
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .label("")
        .ratio(ratio);
    frame.render_widget(gauge, area);
}

fn spinner_frame(now: Instant) -> &'static str {
    SPINNER[(phase_millis(now) / 120) as usize % SPINNER.len()]
}

/// Milliseconds on a process-wide animation clock
fn phase_millis(now: Instant) -> u128 {
    use std::sync::OnceLock;
    static EPOCH: OnceLock<Instant> = OnceLock::new();
    let epoch = *EPOCH.get_or_init(|| now);
    now.saturating_duration_since(epoch).as_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn area() -> Rect {
        Rect::new(0, 0, 60, 28)
    }

    fn render(form: &ContactForm) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 28)).unwrap();
        terminal
            .draw(|frame| draw_contact_form(frame, frame.area(), form, Instant::now()))
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
    fn test_layout_fits_in_area() {
        let layout = ContactFormLayout::new(area());
        assert!(layout.status.bottom() <= area().bottom());
        let (name, name_error) = layout.field_area(FieldName::Name);
        let (email, _) = layout.field_area(FieldName::Email);
        assert!(name_error.bottom() <= email.y);
        assert_eq!(name_error.width, area().width);
    }

    #[test]
    fn test_focus_at_finds_fields_and_submit() {
        let layout = ContactFormLayout::new(area());
        let (company, _) = layout.field_area(FieldName::Company);
        assert_eq!(
            layout.focus_at(company.x + 1, company.y + 1),
            Some(FormFocus::Field(FieldName::Company))
        );
        assert_eq!(
            layout.focus_at(layout.submit.x + 1, layout.submit.y + 1),
            Some(FormFocus::Submit)
        );
        assert_eq!(layout.focus_at(layout.header.x, layout.header.y), None);
    }

    #[test]
    fn test_renders_labels_and_button() {
        let screen = render(&ContactForm::new());
        assert!(screen.contains("Get in Touch"));
        assert!(screen.contains("Your name *"));
        assert!(screen.contains("Company (optional)"));
        assert!(screen.contains("Send Message"));
    }

    #[test]
    fn test_errors_show_only_for_touched_fields() {
        let mut form = ContactForm::new();
        form.on_change(FieldName::Email, "bad");
        assert!(!render(&form).contains("valid email"));

        form.on_blur(FieldName::Email, "bad");
        assert!(render(&form).contains("Please enter a valid email address."));
    }

    #[test]
    fn test_name_and_email_errors_are_not_truncated() {
        let mut form = ContactForm::new();
        form.on_blur(FieldName::Name, "A");
        form.on_blur(FieldName::Email, "bad");

        let screen = render(&form);
        assert!(screen.contains("Name should be at least 2 characters."));
        assert!(screen.contains("Please enter a valid email address."));
    }

    #[test]
    fn test_sending_shows_busy_button() {
        let mut form = ContactForm::new();
        form.on_change(FieldName::Name, "Al");
        form.on_change(FieldName::Email, "a@b.co");
        form.on_change(FieldName::Message, "Hello there, testing.");
        form.begin_submit();

        let screen = render(&form);
        assert!(screen.contains("Sending…"));
        assert!(!screen.contains("Send Message"));
    }

    #[test]
    fn test_failure_banner() {
        let mut form = ContactForm::new();
        form.on_change(FieldName::Name, "Al");
        form.on_change(FieldName::Email, "a@b.co");
        form.on_change(FieldName::Message, "Hello there, testing.");
        form.begin_submit();
        form.finish_submit(
            Err(crate::config::MissingSetting("emailjs_service_id").into()),
            Instant::now(),
        );
        assert!(render(&form).contains("Something went wrong. Please try again."));
    }
}
