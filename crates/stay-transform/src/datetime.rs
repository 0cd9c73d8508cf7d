//! Date parsing for spreadsheet cells.
//!
//! Numeric dates are tried in a fixed priority order, day-first:
//!
//! 1. `d/m/Y` with `/`, `-` or `.` separators
//! 2. `Y-m-d` and `Y/m/d`
//! 3. `d/m/y` (two-digit year) with `/`, `-` or `.` separators
//! 4. `m/d/Y` (US order), only reached when the day-first reading is invalid
//!
//! Anything else goes through a generic fallback that accepts timestamps
//! (as written by spreadsheet date cells), RFC 3339, and textual months.
//! `"01/02/2024"` is therefore 1 February 2024.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
];

const TEXT_DATE_FORMATS: [&str; 6] = [
    "%d %B %Y", "%d %b %Y", "%B %d, %Y", "%b %d, %Y", "%d-%b-%Y", "%d-%b-%y",
];

/// Parses a date from a cell value, or `None` when no format applies.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    parse_numeric(value).or_else(|| parse_fallback(value))
}

fn parse_numeric(value: &str) -> Option<NaiveDate> {
    let separator = value.chars().find(|ch| matches!(ch, '/' | '-' | '.'))?;
    let parts: Vec<&str> = value.split(separator).collect();
    let [a, b, c] = parts.as_slice() else {
        return None;
    };
    if ![a, b, c]
        .iter()
        .all(|part| !part.is_empty() && part.chars().all(|ch| ch.is_ascii_digit()))
    {
        return None;
    }
    let (a_num, b_num, c_num) = (
        a.parse::<u32>().ok()?,
        b.parse::<u32>().ok()?,
        c.parse::<u32>().ok()?,
    );

    if c.len() == 4 && a.len() <= 2 && b.len() <= 2 {
        let year = i32::try_from(c_num).ok()?;
        return NaiveDate::from_ymd_opt(year, b_num, a_num).or_else(|| {
            if separator == '/' {
                NaiveDate::from_ymd_opt(year, a_num, b_num)
            } else {
                None
            }
        });
    }
    if a.len() == 4 && separator != '.' && b.len() <= 2 && c.len() <= 2 {
        return NaiveDate::from_ymd_opt(i32::try_from(a_num).ok()?, b_num, c_num);
    }
    if c.len() == 2 && a.len() <= 2 && b.len() <= 2 {
        return NaiveDate::from_ymd_opt(expand_two_digit_year(c_num), b_num, a_num);
    }
    None
}

/// Two-digit years 69-99 are 1900s, 00-68 are 2000s.
fn expand_two_digit_year(year: u32) -> i32 {
    let year = i32::try_from(year).unwrap_or(0);
    if year >= 69 { 1900 + year } else { 2000 + year }
}

fn parse_fallback(value: &str) -> Option<NaiveDate> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.date_naive());
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed.date());
        }
    }
    for format in TEXT_DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(value, format) {
            return Some(parsed);
        }
    }
    None
}

/// Full years between `birth` and `reference`, one less when the birthday
/// has not yet come round in the reference year.
pub fn years_between(birth: NaiveDate, reference: NaiveDate) -> i32 {
    let mut years = reference.year() - birth.year();
    if (reference.month(), reference.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years
}
