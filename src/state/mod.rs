//! Application state module

mod app_state;
mod copy_reveal;
mod dialog_state;
mod forms;
mod scroll_lock;

pub use app_state::*;
pub use copy_reveal::*;
pub use dialog_state::*;
pub use forms::*;
pub use scroll_lock::*;
