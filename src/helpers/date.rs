//! Date helper functions

use chrono::NaiveDate;
use std::fmt::Write;

/// Format used when a configured date format can't be rendered
const FALLBACK_FORMAT: &str = "%Y-%m-%d";

/// Format a calendar date using a Moment.js-compatible format string
///
/// Characters outside the Moment tokens are copied literally, `%` included.
/// A format chrono still refuses falls back to `YYYY-MM-DD`.
///
/// # Examples
/// ```ignore
/// format_naive_date(&date, "MMMM DD, YYYY") // -> "January 15, 2024"
/// ```
pub fn format_naive_date(date: &NaiveDate, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(&moment_to_chrono_format(format))).is_err() {
        tracing::warn!("Invalid date format {:?}, using {}", format, FALLBACK_FORMAT);
        return date.format(FALLBACK_FORMAT).to_string();
    }
    out
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest patterns first within each unit
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DDDD", "%j"),
        ("DD", "%d"),
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    let mut result = format.replace('%', "%%");

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}
