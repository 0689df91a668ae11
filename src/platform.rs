//! Platform-specific key handling

use crossterm::event::KeyModifiers;

/// Extra modifier accepted for the send shortcut: Cmd on macOS, Ctrl elsewhere
#[cfg(target_os = "macos")]
pub const SEND_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SEND_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Send shortcut shown in the status bar
pub const SEND_SHORTCUT: &str = "Ctrl+S";

/// Whether the modifiers held with `s` trigger a send.
///
/// Ctrl always counts, so the hint in the status bar holds on macOS too.
pub fn is_send_chord(modifiers: KeyModifiers) -> bool {
    modifiers.intersects(KeyModifiers::CONTROL | SEND_MODIFIER)
}
