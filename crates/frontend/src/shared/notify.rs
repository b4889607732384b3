//! Blocking user notices. Kept deliberately plain: a notice interrupts,
//! everything richer belongs to the page that raised it.

use web_sys::window;

pub fn alert(message: &str) {
    if let Some(window) = window() {
        let _ = window.alert_with_message(message);
    }
}

/// Asks for confirmation; answers false when no window is available.
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
