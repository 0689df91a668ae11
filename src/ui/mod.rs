//! UI module for rendering the TUI

mod components;
mod forms;
mod hero;
mod layout;

use crate::app::App;
use crate::state::DIALOG_TITLE;
use ratatui::{layout::Rect, Frame};
use std::time::Instant;

pub use components::DialogLayout;
pub use forms::ContactFormLayout;
pub use hero::HeroLayout;

/// Hero region for a full screen area
pub fn hero_area(area: Rect) -> Rect {
    layout::create_layout(area).1
}

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App, now: Instant) {
    let (logo_area, hero_area, status_area) = layout::create_layout(frame.area());

    hero::draw(frame, hero_area, &app.state, now);
    // Fixed bar over the scrolling page
    layout::draw_logo_bar(frame, logo_area);
    layout::draw_status_bar(frame, status_area, app);

    // Dialog last so it sits above everything else
    render_dialog_with_form(frame, app, now);
}

fn render_dialog_with_form(frame: &mut Frame, app: &App, now: Instant) {
    components::render_dialog(frame, &app.state.dialog, DIALOG_TITLE, now, |frame, body| {
        if let Some(form) = &app.state.form {
            forms::draw_contact_form(frame, body, form, now);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MissingSetting;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn render(app: &App, now: Instant) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| draw(frame, app, now)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_page_without_dialog() {
        let now = Instant::now();
        let mut app = App::with_mailer(Err(MissingSetting("emailjs_service_id")), now);
        app.state.hero.skip();

        let screen = render(&app, now);
        assert!(screen.contains("C A N B R I"));
        assert!(screen.contains("Welcome to Canbri"));
        assert!(!screen.contains(DIALOG_TITLE));
    }

    #[test]
    fn test_open_dialog_shows_form() {
        let now = Instant::now();
        let mut app = App::with_mailer(Err(MissingSetting("emailjs_service_id")), now);
        app.open_contact(now);

        let screen = render(&app, now + Duration::from_millis(300));
        assert!(screen.contains(DIALOG_TITLE));
        assert!(screen.contains("Your e-mail *"));
        assert!(screen.contains("Send Message"));
    }
}
