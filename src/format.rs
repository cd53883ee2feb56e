//! Display formatting for backend timestamps
//!
//! The backend sends dates as `YYYY-MM-DD`, datetimes as
//! `YYYY-MM-DD HH:MM:SS`, and occasionally RFC 3339 or the RFC 2822 form
//! produced by its JSON encoder. Zoned values are shown in local time.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

const DATE_DISPLAY: &str = "%d %b %Y";
const DATE_TIME_DISPLAY: &str = "%d %b %Y, %I:%M %p";

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

fn parse(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    for fmt in NAIVE_DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn render(input: Option<&str>, pattern: &str) -> String {
    match input {
        None => String::new(),
        Some(s) if s.trim().is_empty() => String::new(),
        // Unrecognized values are shown as received
        Some(s) => parse(s).map_or_else(|| s.to_string(), |dt| dt.format(pattern).to_string()),
    }
}

/// `2026-10-18` → `18 Oct 2026`; empty for missing input
pub fn format_date(input: Option<&str>) -> String {
    render(input, DATE_DISPLAY)
}

/// `2026-10-18 14:30:00` → `18 Oct 2026, 02:30 PM`; empty for missing input
pub fn format_date_time(input: Option<&str>) -> String {
    render(input, DATE_TIME_DISPLAY)
}
