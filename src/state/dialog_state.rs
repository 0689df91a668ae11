//! Modal dialog lifecycle
//!
//! Closed -> Opening -> Open -> Closing -> Closed. The dialog stays mounted
//! through `Closing` so the exit animation can finish before it disappears.

use super::scroll_lock::{ScrollLock, ScrollLockGuard};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use std::time::{Duration, Instant};

/// Lifecycle phase of a dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

/// Topmost element under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Backdrop,
    Content,
    CloseButton,
}

/// Something the owner of the dialog must act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEvent {
    CloseRequested,
}

/// Dialog state machine
#[derive(Debug)]
pub struct DialogState {
    phase: DialogPhase,
    phase_started: Instant,
    scroll_lock: ScrollLock,
    scroll_guard: Option<ScrollLockGuard>,
}

impl DialogState {
    /// Entrance animation length
    pub const OPEN_DURATION: Duration = Duration::from_millis(220);
    /// Exit animation length
    pub const CLOSE_DURATION: Duration = Duration::from_millis(200);

    pub fn new(scroll_lock: ScrollLock) -> Self {
        Self {
            phase: DialogPhase::Closed,
            phase_started: Instant::now(),
            scroll_lock,
            scroll_guard: None,
        }
    }

    pub fn phase(&self) -> DialogPhase {
        self.phase
    }

    /// Whether the dialog is drawn at all
    pub fn is_mounted(&self) -> bool {
        self.phase != DialogPhase::Closed
    }

    /// Whether dismissal and content input are live
    pub fn accepts_input(&self) -> bool {
        matches!(self.phase, DialogPhase::Opening | DialogPhase::Open)
    }

    /// Start opening; returns true when the dialog was not already showing
    pub fn open(&mut self, now: Instant) -> bool {
        match self.phase {
            DialogPhase::Opening | DialogPhase::Open => false,
            DialogPhase::Closed | DialogPhase::Closing => {
                if self.scroll_guard.is_none() {
                    self.scroll_guard = Some(self.scroll_lock.acquire());
                }
                self.enter(DialogPhase::Opening, now);
                true
            }
        }
    }

    /// Start closing; the page scroll style is restored right away
    pub fn close(&mut self, now: Instant) -> bool {
        match self.phase {
            DialogPhase::Opening | DialogPhase::Open => {
                self.scroll_guard = None;
                self.enter(DialogPhase::Closing, now);
                true
            }
            DialogPhase::Closed | DialogPhase::Closing => false,
        }
    }

    fn enter(&mut self, phase: DialogPhase, now: Instant) {
        tracing::debug!(from = ?self.phase, to = ?phase, "dialog transition");
        self.phase = phase;
        self.phase_started = now;
    }

    /// Advance animation phases; returns true if the dialog just unmounted
    pub fn update(&mut self, now: Instant) -> bool {
        let elapsed = now.saturating_duration_since(self.phase_started);
        match self.phase {
            DialogPhase::Opening if elapsed >= Self::OPEN_DURATION => {
                self.enter(DialogPhase::Open, now);
                false
            }
            DialogPhase::Closing if elapsed >= Self::CLOSE_DURATION => {
                self.enter(DialogPhase::Closed, now);
                true
            }
            _ => false,
        }
    }

    /// How far the dialog is shown, 0.0 (hidden) to 1.0 (fully open), eased
    pub fn visibility(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.phase_started);
        match self.phase {
            DialogPhase::Closed => 0.0,
            DialogPhase::Open => 1.0,
            DialogPhase::Opening => {
                let t = elapsed.as_secs_f32() / Self::OPEN_DURATION.as_secs_f32();
                simple_easing::cubic_out(t.clamp(0.0, 1.0))
            }
            DialogPhase::Closing => {
                let t = elapsed.as_secs_f32() / Self::CLOSE_DURATION.as_secs_f32();
                1.0 - simple_easing::cubic_in(t.clamp(0.0, 1.0))
            }
        }
    }

    /// Escape dismisses the dialog while it is live
    pub fn handle_key(&self, key: KeyEvent) -> Option<DialogEvent> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        (self.accepts_input() && key.code == KeyCode::Esc).then_some(DialogEvent::CloseRequested)
    }

    /// Pointer-down on the backdrop itself or on the close button dismisses;
    /// anything inside the content does not
    pub fn handle_pointer_down(&self, target: HitTarget) -> Option<DialogEvent> {
        if !self.accepts_input() {
            return None;
        }
        match target {
            HitTarget::Backdrop | HitTarget::CloseButton => Some(DialogEvent::CloseRequested),
            HitTarget::Content => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Overflow;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn opened(lock: &ScrollLock, now: Instant) -> DialogState {
        let mut dialog = DialogState::new(lock.clone());
        assert!(dialog.open(now));
        dialog.update(now + DialogState::OPEN_DURATION);
        dialog
    }

    mod lifecycle {
        use super::*;

        #[test]
        fn test_starts_closed_and_unmounted() {
            let dialog = DialogState::new(ScrollLock::default());
            assert_eq!(dialog.phase(), DialogPhase::Closed);
            assert!(!dialog.is_mounted());
            assert_eq!(dialog.visibility(Instant::now()), 0.0);
        }

        #[test]
        fn test_open_animates_to_open() {
            let now = Instant::now();
            let mut dialog = DialogState::new(ScrollLock::default());
            dialog.open(now);
            assert_eq!(dialog.phase(), DialogPhase::Opening);
            assert!(dialog.accepts_input());

            dialog.update(now + Duration::from_millis(100));
            assert_eq!(dialog.phase(), DialogPhase::Opening);

            dialog.update(now + DialogState::OPEN_DURATION);
            assert_eq!(dialog.phase(), DialogPhase::Open);
            assert_eq!(dialog.visibility(now + DialogState::OPEN_DURATION), 1.0);
        }

        #[test]
        fn test_close_stays_mounted_until_exit_animation_ends() {
            let now = Instant::now();
            let lock = ScrollLock::default();
            let mut dialog = opened(&lock, now);

            let closing_at = now + Duration::from_secs(1);
            assert!(dialog.close(closing_at));
            assert_eq!(dialog.phase(), DialogPhase::Closing);
            assert!(dialog.is_mounted());
            assert!(!dialog.accepts_input());

            assert!(!dialog.update(closing_at + Duration::from_millis(50)));
            assert!(dialog.update(closing_at + DialogState::CLOSE_DURATION));
            assert_eq!(dialog.phase(), DialogPhase::Closed);
            assert!(!dialog.is_mounted());
        }

        #[test]
        fn test_open_twice_is_noop() {
            let now = Instant::now();
            let lock = ScrollLock::default();
            let mut dialog = opened(&lock, now);
            assert!(!dialog.open(now));
            assert_eq!(lock.holders(), 1);
        }

        #[test]
        fn test_reopen_during_close() {
            let now = Instant::now();
            let lock = ScrollLock::new(Overflow::Scroll);
            let mut dialog = opened(&lock, now);
            dialog.close(now);
            assert_eq!(lock.overflow(), Overflow::Scroll);

            assert!(dialog.open(now));
            assert_eq!(dialog.phase(), DialogPhase::Opening);
            assert_eq!(lock.overflow(), Overflow::Hidden);
        }

        #[test]
        fn test_visibility_is_monotonic_while_opening() {
            let now = Instant::now();
            let mut dialog = DialogState::new(ScrollLock::default());
            dialog.open(now);
            let early = dialog.visibility(now + Duration::from_millis(20));
            let late = dialog.visibility(now + Duration::from_millis(200));
            assert!(early < late);
            assert!((0.0..=1.0).contains(&early));
        }
    }

    mod scroll {
        use super::*;

        #[test]
        fn test_open_locks_and_close_restores_exact_style() {
            let now = Instant::now();
            let lock = ScrollLock::new(Overflow::Scroll);
            let mut dialog = DialogState::new(lock.clone());

            dialog.open(now);
            assert_eq!(lock.overflow(), Overflow::Hidden);

            dialog.close(now);
            assert_eq!(lock.overflow(), Overflow::Scroll);
        }

        #[test]
        fn test_two_dialogs_do_not_corrupt_restore_value() {
            let now = Instant::now();
            let lock = ScrollLock::new(Overflow::Scroll);
            let mut first = DialogState::new(lock.clone());
            let mut second = DialogState::new(lock.clone());

            first.open(now);
            second.open(now);
            first.close(now);
            assert_eq!(lock.overflow(), Overflow::Hidden);
            second.close(now);
            assert_eq!(lock.overflow(), Overflow::Scroll);
        }

        #[test]
        fn test_dropping_an_open_dialog_releases_the_lock() {
            let lock = ScrollLock::new(Overflow::Scroll);
            let dialog = opened(&lock, Instant::now());
            drop(dialog);
            assert_eq!(lock.overflow(), Overflow::Scroll);
        }
    }

    mod dismissal {
        use super::*;

        #[test]
        fn test_escape_requests_close_once() {
            let now = Instant::now();
            let mut dialog = opened(&ScrollLock::default(), now);
            let mut close_calls = 0;

            for _ in 0..3 {
                if let Some(DialogEvent::CloseRequested) = dialog.handle_key(key(KeyCode::Esc)) {
                    close_calls += 1;
                    dialog.close(now);
                }
            }
            assert_eq!(close_calls, 1);
        }

        #[test]
        fn test_other_keys_do_not_dismiss() {
            let dialog = opened(&ScrollLock::default(), Instant::now());
            assert_eq!(dialog.handle_key(key(KeyCode::Enter)), None);
            assert_eq!(dialog.handle_key(key(KeyCode::Char('q'))), None);
        }

        #[test]
        fn test_escape_ignored_when_closed() {
            let dialog = DialogState::new(ScrollLock::default());
            assert_eq!(dialog.handle_key(key(KeyCode::Esc)), None);
        }

        #[test]
        fn test_backdrop_closes_but_content_does_not() {
            let dialog = opened(&ScrollLock::default(), Instant::now());
            assert_eq!(
                dialog.handle_pointer_down(HitTarget::Backdrop),
                Some(DialogEvent::CloseRequested)
            );
            assert_eq!(dialog.handle_pointer_down(HitTarget::Content), None);
            assert_eq!(
                dialog.handle_pointer_down(HitTarget::CloseButton),
                Some(DialogEvent::CloseRequested)
            );
        }

        #[test]
        fn test_pointer_ignored_while_closing() {
            let now = Instant::now();
            let mut dialog = opened(&ScrollLock::default(), now);
            dialog.close(now);
            assert_eq!(dialog.handle_pointer_down(HitTarget::Backdrop), None);
        }
    }
}
