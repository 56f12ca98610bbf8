//! Day-first timestamp parsing.
//!
//! Exports write dates as `D/M/Y` or `M/D/Y` depending on the phone's locale,
//! and nothing in the line says which. Dates are read day-first; month-first
//! is only tried when the day-first reading is not a real calendar date
//! (`12/31/2023`).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Time formats tried in order. 12-hour forms go first so that `9:41 PM`
/// is never cut short by a 24-hour format.
const TIME_FORMATS: &[&str] = &["%I:%M:%S %p", "%I:%M %p", "%H:%M:%S", "%H:%M"];

/// Parses the date and time captured from a header line.
pub fn parse_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = parse_date(date)?;
    let time = parse_time(time)?;
    Some(date.and_time(time))
}

/// Parses a numeric date with `/`, `-` or `.` separators, day first.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.trim().split(['/', '-', '.']);
    let first = parse_field(parts.next()?)?;
    let second = parse_field(parts.next()?)?;
    let year = parse_year(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }

    NaiveDate::from_ymd_opt(year, second, first)
        .or_else(|| NaiveDate::from_ymd_opt(year, first, second))
}

/// Parses `H:MM`, `H:MM:SS`, optionally followed by AM/PM.
pub fn parse_time(text: &str) -> Option<NaiveTime> {
    let text = text.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(text, fmt).ok())
}

fn parse_field(text: &str) -> Option<u32> {
    if text.is_empty() || text.len() > 2 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Two-digit years use the same pivot as chrono's `%y`: 00-68 are 20xx,
/// 69-99 are 19xx.
fn parse_year(text: &str) -> Option<i32> {
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: i32 = text.parse().ok()?;
    match text.len() {
        2 if value < 69 => Some(2000 + value),
        2 => Some(1900 + value),
        4 => Some(value),
        _ => None,
    }
}
