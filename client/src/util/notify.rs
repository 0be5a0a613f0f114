//! Blocking user-facing failure notices.
//!
//! Failures from backend actions are logged with their cause and shown to the
//! user as a generic sentence; the cause never reaches the alert text.

/// `"Failed to {action}. Please try again."`
pub fn failure_message(action: &str) -> String {
    format!("Failed to {action}. Please try again.")
}

/// Show `message` in a browser alert. Outside the browser it is only logged.
pub fn alert(message: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(window) = web_sys::window() {
            if window.alert_with_message(message).is_err() {
                log::warn!("alert could not be shown: {message}");
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        log::info!("alert: {message}");
    }
}

/// Log `cause` and alert the generic failure for `action`.
pub fn report_failure(action: &str, cause: &dyn std::fmt::Display) {
    log::error!("failed to {action}: {cause}");
    alert(&failure_message(action));
}
