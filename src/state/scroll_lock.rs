//! Page scroll locking shared by every open dialog
//!
//! The first holder saves the page overflow and forces it to `Hidden`; the
//! saved value is restored only when the last holder lets go.

use std::cell::RefCell;
use std::rc::Rc;

/// Scroll behavior of the hero page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Auto,
    Scroll,
    Hidden,
}

impl Overflow {
    pub fn allows_scroll(&self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

#[derive(Debug, Default)]
struct LockState {
    overflow: Overflow,
    holders: usize,
    saved: Option<Overflow>,
}

/// Handle to the page's scroll style; clones share the same page
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    inner: Rc<RefCell<LockState>>,
}

impl ScrollLock {
    pub fn new(overflow: Overflow) -> Self {
        Self {
            inner: Rc::new(RefCell::new(LockState {
                overflow,
                ..Default::default()
            })),
        }
    }

    /// Current effective overflow
    pub fn overflow(&self) -> Overflow {
        self.inner.borrow().overflow
    }

    /// Change the page style; while locked the change applies on release
    pub fn set_overflow(&self, overflow: Overflow) {
        let mut state = self.inner.borrow_mut();
        if state.holders > 0 {
            state.saved = Some(overflow);
        } else {
            state.overflow = overflow;
        }
    }

    #[cfg(test)]
    pub fn holders(&self) -> usize {
        self.inner.borrow().holders
    }

    #[cfg(test)]
    pub fn is_locked(&self) -> bool {
        self.holders() > 0
    }

    /// Lock page scrolling until the returned guard is dropped
    pub fn acquire(&self) -> ScrollLockGuard {
        let mut state = self.inner.borrow_mut();
        if state.holders == 0 {
            state.saved = Some(state.overflow);
            state.overflow = Overflow::Hidden;
        }
        state.holders += 1;
        tracing::trace!(holders = state.holders, "scroll lock acquired");

        ScrollLockGuard {
            lock: self.clone(),
        }
    }
}

/// Keeps the page locked while alive
#[derive(Debug)]
pub struct ScrollLockGuard {
    lock: ScrollLock,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        let mut state = self.lock.inner.borrow_mut();
        state.holders = state.holders.saturating_sub(1);
        if state.holders == 0 {
            if let Some(saved) = state.saved.take() {
                state.overflow = saved;
            }
        }
        tracing::trace!(holders = state.holders, "scroll lock released");
    }
}
