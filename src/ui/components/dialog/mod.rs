//! Dialog components for TUI

mod base;

pub use base::{render_dialog, DialogLayout};
