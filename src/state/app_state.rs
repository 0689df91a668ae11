//! Application state definitions

use super::copy_reveal::{CopyReveal, RevealTarget, RevealVariant};
use super::dialog_state::DialogState;
use super::forms::ContactForm;
use super::scroll_lock::{Overflow, ScrollLock};
use std::time::{Duration, Instant};

/// Brand shown in the logo bar
pub const BRAND: &str = "CANBRI";
pub const HEADLINE: &str = "Welcome to Canbri";
pub const SUBHEADLINE: &str = "We're building our website, amongst other things!";
pub const BLURB: [&str; 2] = [
    "Made-to-order excellence in furniture and lighting.",
    "We partner with clients and designers to deliver flawless finishes and a perfect fit.",
];
pub const CTA_LABEL: &str = "Let's Talk";
pub const DIALOG_TITLE: &str = "Get in touch with us";

/// Animated copy blocks of the hero section
#[derive(Debug, Clone)]
pub struct HeroCopy {
    pub headline: CopyReveal,
    pub subheadline: CopyReveal,
    pub blurb: CopyReveal,
    pub cta: CopyReveal,
}

impl HeroCopy {
    pub fn new(start: Instant) -> Self {
        Self {
            headline: CopyReveal::new(
                RevealTarget::Single(HEADLINE.to_string()),
                RevealVariant::Lines,
                start,
            )
            .with_delay(Duration::from_millis(500)),
            subheadline: CopyReveal::new(
                RevealTarget::Single(SUBHEADLINE.to_string()),
                RevealVariant::Lines,
                start,
            )
            .with_delay(Duration::from_millis(600)),
            blurb: CopyReveal::new(
                RevealTarget::Sequence(BLURB.iter().map(|l| l.to_string()).collect()),
                RevealVariant::Lines,
                start,
            )
            .with_delay(Duration::from_millis(650)),
            cta: CopyReveal::new(
                RevealTarget::Single(CTA_LABEL.to_string()),
                RevealVariant::FadeUp,
                start,
            )
            .with_delay(Duration::from_millis(700)),
        }
    }

    fn all_mut(&mut self) -> [&mut CopyReveal; 4] {
        [
            &mut self.headline,
            &mut self.subheadline,
            &mut self.blurb,
            &mut self.cta,
        ]
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        [&self.headline, &self.subheadline, &self.blurb, &self.cta]
            .iter()
            .any(|reveal| !reveal.is_complete(now))
    }

    /// Settle every block (user pressed a key)
    pub fn skip(&mut self) {
        for reveal in self.all_mut() {
            reveal.skip();
        }
    }
}

/// Main application state
#[derive(Debug)]
pub struct AppState {
    /// Page scroll style shared with dialogs
    pub scroll_lock: ScrollLock,
    /// Rows scrolled down from the top of the page
    pub scroll_offset: u16,
    /// Largest useful scroll offset for the current terminal size
    pub max_scroll: u16,
    pub hero: HeroCopy,
    pub dialog: DialogState,
    /// Mounted while the dialog is mounted
    pub form: Option<ContactForm>,
    /// When to close the dialog after a successful send
    pub close_after: Option<Instant>,
}

impl AppState {
    pub fn new(now: Instant) -> Self {
        let scroll_lock = ScrollLock::new(Overflow::Auto);
        Self {
            dialog: DialogState::new(scroll_lock.clone()),
            scroll_lock,
            scroll_offset: 0,
            max_scroll: 0,
            hero: HeroCopy::new(now),
            form: None,
            close_after: None,
        }
    }

    pub fn scroll_up(&mut self) {
        if self.scroll_lock.overflow().allows_scroll() {
            self.scroll_offset = self.scroll_offset.saturating_sub(1);
        }
    }

    pub fn scroll_down(&mut self) {
        if self.scroll_lock.overflow().allows_scroll() {
            self.scroll_offset = self.scroll_offset.saturating_add(1).min(self.max_scroll);
        }
    }
}
