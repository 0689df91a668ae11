//! Headline copy entrance animation state

use std::time::{Duration, Instant};

/// How a block of copy enters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealVariant {
    /// Each line slides up out of its own mask, staggered
    #[default]
    Lines,
    /// The whole block fades in while rising
    FadeUp,
}

/// What the animation wraps, chosen by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealTarget {
    /// Exactly one element
    Single(String),
    /// A sequence of elements animated as one group
    Sequence(Vec<String>),
}

impl RevealTarget {
    pub fn lines(&self) -> &[String] {
        match self {
            Self::Single(line) => std::slice::from_ref(line),
            Self::Sequence(lines) => lines,
        }
    }
}

/// One line of copy sampled at a point in time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFrame<'a> {
    pub text: &'a str,
    /// Remaining travel, 1.0 at the start and 0.0 once settled
    pub rise: f32,
    /// 0.0 transparent to 1.0 opaque
    pub opacity: f32,
}

impl LineFrame<'_> {
    /// Lines still mostly below their mask are not drawn
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0 && self.rise < 0.5
    }
}

/// Animated block of copy
#[derive(Debug, Clone)]
pub struct CopyReveal {
    target: RevealTarget,
    variant: RevealVariant,
    delay: Duration,
    start_time: Instant,
    skipped: bool,
}

impl CopyReveal {
    /// Per-line slide duration for `Lines`
    const LINE_DURATION: Duration = Duration::from_millis(1000);
    /// Offset between consecutive lines for `Lines`
    const LINE_STAGGER: Duration = Duration::from_millis(100);
    /// Duration of the whole-block `FadeUp`
    const FADE_DURATION: Duration = Duration::from_millis(800);
    /// Rows travelled by `FadeUp`
    pub const FADE_ROWS: f32 = 2.0;

    pub fn new(target: RevealTarget, variant: RevealVariant, start_time: Instant) -> Self {
        Self {
            target,
            variant,
            delay: Duration::ZERO,
            start_time,
            skipped: false,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[cfg(test)]
    pub fn target(&self) -> &RevealTarget {
        &self.target
    }

    pub fn variant(&self) -> RevealVariant {
        self.variant
    }

    /// Jump to the settled state
    pub fn skip(&mut self) {
        self.skipped = true;
    }

    /// Total time from start until every line has settled
    pub fn total_duration(&self) -> Duration {
        let run = match self.variant {
            RevealVariant::Lines => {
                let extra = self.target.lines().len().saturating_sub(1) as u32;
                Self::LINE_DURATION + Self::LINE_STAGGER * extra
            }
            RevealVariant::FadeUp => Self::FADE_DURATION,
        };
        self.delay + run
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        self.skipped || now.saturating_duration_since(self.start_time) >= self.total_duration()
    }

    fn progress(&self, elapsed: Duration, offset: Duration, length: Duration) -> f32 {
        if self.skipped {
            return 1.0;
        }
        let Some(running) = elapsed.checked_sub(self.delay + offset) else {
            return 0.0;
        };
        let t = (running.as_secs_f32() / length.as_secs_f32()).clamp(0.0, 1.0);
        simple_easing::quart_out(t)
    }

    /// Sample every line at `now`
    pub fn at(&self, now: Instant) -> Vec<LineFrame<'_>> {
        let elapsed = now.saturating_duration_since(self.start_time);
        self.target
            .lines()
            .iter()
            .enumerate()
            .map(|(i, text)| match self.variant {
                RevealVariant::Lines => {
                    let eased =
                        self.progress(elapsed, Self::LINE_STAGGER * i as u32, Self::LINE_DURATION);
                    LineFrame {
                        text,
                        rise: 1.0 - eased,
                        opacity: if eased > 0.0 { 1.0 } else { 0.0 },
                    }
                }
                RevealVariant::FadeUp => {
                    let eased = self.progress(elapsed, Duration::ZERO, Self::FADE_DURATION);
                    LineFrame {
                        text,
                        rise: 1.0 - eased,
                        opacity: eased,
                    }
                }
            })
            .collect()
    }
}
