//! Small display helpers shared by the text views.

use chrono::{DateTime, Utc};

/// Relative age of a timestamp: "Just now", "12m ago", "3h ago", "2d ago".
///
/// Timestamps in the future render as "Just now".
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    format!("{}d ago", hours / 24)
}

/// Fixed-width capacity bar, e.g. `[######----]`. Overfull shelves render full.
pub fn fill_bar(percentage: f64, width: usize) -> String {
    let clamped = percentage.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
