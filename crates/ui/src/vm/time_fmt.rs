/// `mm:ss` for the assessment countdown.
#[must_use]
pub fn format_countdown(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Whole seconds left before an automatic redirect, as shown to the user.
#[must_use]
pub fn format_redirect(seconds: u32) -> String {
    if seconds == 1 {
        "1 second".to_string()
    } else {
        format!("{seconds} seconds")
    }
}
