//! Application state and core logic

use crate::config::{SiteConfig, DEFAULT_STATUS_RESET};
use crate::mailer::{EmailJsClient, Mailer, MailerHandle, SubmitError};
use crate::platform;
use crate::state::{
    AppState, ContactForm, DialogEvent, DialogPhase, FieldName, FormFocus, HitTarget, Overflow,
    SubmissionStatus, SubmitAttempt,
};
use crate::ui::{self, ContactFormLayout, DialogLayout, HeroLayout};
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// How long a success banner stays up before the dialog closes itself
pub const CLOSE_AFTER_SUCCESS: Duration = Duration::from_millis(1500);

/// Outcome of a background send, tagged with the form that started it
#[derive(Debug)]
struct SubmitResult {
    form_id: u64,
    result: Result<(), SubmitError>,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Mail transport, or the setting that is missing
    mailer: MailerHandle,
    /// Whether the app should quit
    quit: bool,
    /// Delay before a form banner clears
    reset_delay: Duration,
    /// Terminal size for hit testing (height, width)
    pub terminal_size: Option<(u16, u16)>,
    results_tx: UnboundedSender<SubmitResult>,
    results_rx: UnboundedReceiver<SubmitResult>,
}

impl App {
    /// Create the app from loaded configuration
    pub fn new(config: &SiteConfig, now: Instant) -> Self {
        let mailer: MailerHandle = config.credentials().map(|credentials| {
            tracing::info!(endpoint = %credentials.endpoint, "mailer configured");
            Arc::new(EmailJsClient::new(credentials)) as Arc<dyn Mailer>
        });
        if let Err(missing) = &mailer {
            tracing::warn!(%missing, "contact form will report failures until configured");
        }

        let mut app = Self::with_mailer(mailer, now);
        app.reset_delay = config.status_reset_delay();
        app
    }

    /// Create the app around an existing mailer handle
    pub fn with_mailer(mailer: MailerHandle, now: Instant) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(now),
            mailer,
            quit: false,
            reset_delay: DEFAULT_STATUS_RESET,
            terminal_size: None,
            results_tx,
            results_rx,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether the next frame differs from the last without any input
    pub fn is_animating(&self, now: Instant) -> bool {
        let sending = self
            .state
            .form
            .as_ref()
            .is_some_and(|form| form.status() == SubmissionStatus::Sending);
        self.state.hero.is_animating(now)
            || matches!(
                self.state.dialog.phase(),
                DialogPhase::Opening | DialogPhase::Closing
            )
            || sending
    }

    fn screen(&self) -> Option<Rect> {
        self.terminal_size
            .map(|(height, width)| Rect::new(0, 0, width, height))
    }

    /// Mount the contact form and start opening the dialog
    pub fn open_contact(&mut self, now: Instant) {
        if self.state.dialog.open(now) {
            let reset_delay = self.reset_delay;
            self.state
                .form
                .get_or_insert_with(|| ContactForm::with_reset_delay(reset_delay));
            tracing::info!("contact dialog opened");
        }
    }

    /// Start closing the dialog; the form and its pending reset unmount once
    /// the exit animation ends
    pub fn close_contact(&mut self, now: Instant) {
        if self.state.dialog.close(now) {
            self.state.close_after = None;
            tracing::info!("contact dialog closed");
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        if self.state.dialog.is_mounted() {
            self.handle_dialog_key(key, now);
            return;
        }

        if self.state.hero.is_animating(now) {
            self.state.hero.skip();
        }

        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.open_contact(now),
            KeyCode::Char('j') | KeyCode::Down => self.state.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.state.scroll_up(),
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    fn handle_dialog_key(&mut self, key: KeyEvent, now: Instant) {
        if let Some(DialogEvent::CloseRequested) = self.state.dialog.handle_key(key) {
            self.close_contact(now);
            return;
        }
        if !self.state.dialog.accepts_input() {
            return;
        }

        let Some(form) = self.state.form.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Char('s') if platform::is_send_chord(key.modifiers) => self.submit(now),
            KeyCode::Tab => form.focus_next(),
            KeyCode::BackTab => form.focus_prev(),
            KeyCode::Enter => match form.focus() {
                FormFocus::Submit => self.submit(now),
                FormFocus::Field(FieldName::Message) => form.newline(),
                FormFocus::Field(_) => form.focus_next(),
            },
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER) =>
            {
                form.input_char(c)
            }
            _ => {}
        }
    }

    /// Handle mouse input
    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let Some(screen) = self.screen() else {
            return;
        };

        if self.state.dialog.is_mounted() {
            if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                self.handle_dialog_click(screen, mouse.column, mouse.row, now);
            }
            return;
        }

        match mouse.kind {
            MouseEventKind::ScrollDown => self.state.scroll_down(),
            MouseEventKind::ScrollUp => self.state.scroll_up(),
            MouseEventKind::Down(MouseButton::Left) => {
                let hero = HeroLayout::new(ui::hero_area(screen), self.state.scroll_offset);
                let on_cta = hero
                    .cta_area()
                    .is_some_and(|area| area.contains(Position::new(mouse.column, mouse.row)));
                if on_cta {
                    self.state.hero.skip();
                    self.open_contact(now);
                }
            }
            _ => {}
        }
    }

    fn handle_dialog_click(&mut self, screen: Rect, column: u16, row: u16, now: Instant) {
        let layout = DialogLayout::new(screen, self.state.dialog.visibility(now));
        let target = layout.hit_test(column, row);

        if let Some(DialogEvent::CloseRequested) = self.state.dialog.handle_pointer_down(target) {
            self.close_contact(now);
            return;
        }
        if target != HitTarget::Content || !self.state.dialog.accepts_input() {
            return;
        }

        let Some(form) = self.state.form.as_mut() else {
            return;
        };
        match ContactFormLayout::new(layout.body).focus_at(column, row) {
            Some(FormFocus::Submit) => {
                form.set_focus(FormFocus::Submit);
                self.submit(now);
            }
            Some(focus) => form.set_focus(focus),
            None => {}
        }
    }

    /// Submit the mounted form; delivery runs in the background
    pub fn submit(&mut self, now: Instant) {
        let Some(form) = self.state.form.as_mut() else {
            return;
        };
        let message = match form.begin_submit() {
            SubmitAttempt::Ready(message) => message,
            SubmitAttempt::Blocked { focus } => {
                tracing::debug!(field = focus.key(), "submit blocked");
                return;
            }
            SubmitAttempt::InFlight => {
                tracing::debug!("submit ignored while sending");
                return;
            }
        };
        let form_id = form.id();

        match &self.mailer {
            Ok(mailer) => {
                let mailer = Arc::clone(mailer);
                let results = self.results_tx.clone();
                tokio::spawn(async move {
                    let result = mailer.send(&message).await;
                    if results.send(SubmitResult { form_id, result }).is_err() {
                        tracing::debug!(form_id, "app gone before submission finished");
                    }
                });
            }
            Err(missing) => {
                let status = form.finish_submit(Err(SubmitError::from(*missing)), now);
                self.after_submission(status, now);
            }
        }
    }

    fn apply_submission(&mut self, result: SubmitResult, now: Instant) {
        let Some(form) = self
            .state
            .form
            .as_mut()
            .filter(|form| form.id() == result.form_id)
        else {
            tracing::debug!(form_id = result.form_id, "dropping result for unmounted form");
            return;
        };
        let status = form.finish_submit(result.result, now);
        self.after_submission(status, now);
    }

    fn after_submission(&mut self, status: SubmissionStatus, now: Instant) {
        if status == SubmissionStatus::Ok {
            tracing::info!("contact message sent");
            self.state.close_after = Some(now + CLOSE_AFTER_SUCCESS);
        }
    }

    /// Advance timers, animations and background results
    pub fn tick(&mut self, now: Instant) {
        while let Ok(result) = self.results_rx.try_recv() {
            self.apply_submission(result, now);
        }

        if let Some(form) = self.state.form.as_mut() {
            form.tick(now);
        }

        if self.state.close_after.is_some_and(|at| now >= at) {
            self.state.close_after = None;
            self.close_contact(now);
        }

        if self.state.dialog.update(now) {
            // Unmounting drops any pending status reset with the form
            self.state.form = None;
            self.state.close_after = None;
        }

        if let Some(screen) = self.screen() {
            let hero = HeroLayout::new(ui::hero_area(screen), 0);
            self.state.max_scroll = hero.max_scroll();
            self.state.scroll_offset = self.state.scroll_offset.min(self.state.max_scroll);

            // Deferred by the lock while a dialog is open
            let overflow = if self.state.max_scroll > 0 {
                Overflow::Scroll
            } else {
                Overflow::Auto
            };
            self.state.scroll_lock.set_overflow(overflow);
        }
    }
}
