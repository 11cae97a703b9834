//! Posting-age bucketing for the legacy `jobDetails` view.

use chrono::{DateTime, NaiveDate, Utc};

/// Date formats the model has been observed to emit, tried in order after
/// RFC 3339.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%B %d, %Y", "%m/%d/%Y", "%d %B %Y"];

/// Human-readable age of a posting date relative to today.
/// Malformed or missing input yields "Unknown", never an error.
pub fn bucket_posting_age(date_str: &str) -> String {
    match parse_loose_date(date_str) {
        Some(date) => bucket_days((Utc::now().date_naive() - date).num_days()),
        None => "Unknown".to_string(),
    }
}

fn parse_loose_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Buckets a whole-day difference into a coarse human label.
/// Future dates collapse into "Today".
pub fn bucket_days(days: i64) -> String {
    match days {
        d if d <= 0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        d if d < 7 => format!("{d} days ago"),
        d if d < 30 => format!("{} weeks ago", d / 7),
        d if d < 365 => format!("{} months ago", d / 30),
        d => format!("{} years ago", d / 365),
    }
}
