//! Date labels for the expense list
//!
//! Compares calendar days only, so time of day and timezone never move an
//! expense between "Today" and "Yesterday".

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

/// Fallback pattern when a configured one is not valid strftime
pub const DEFAULT_LONG_DATE_FORMAT: &str = "%A, %B %-d, %Y";

/// Label a date relative to `today`
///
/// `"Today"`, `"Yesterday"`, otherwise the date rendered with `long_format`
/// (e.g. `"Friday, March 14, 2025"`).
pub fn date_label(date: NaiveDate, today: NaiveDate, long_format: &str) -> String {
    if date == today {
        return "Today".to_string();
    }
    if today.pred_opt() == Some(date) {
        return "Yesterday".to_string();
    }
    long_date(date, long_format)
}

/// Render a date with `long_format`, falling back to the default pattern
pub fn long_date(date: NaiveDate, long_format: &str) -> String {
    let pattern = if is_valid_pattern(long_format) {
        long_format
    } else {
        DEFAULT_LONG_DATE_FORMAT
    };
    date.format(pattern).to_string()
}

fn is_valid_pattern(pattern: &str) -> bool {
    !pattern.is_empty() && !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}
