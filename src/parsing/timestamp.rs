//! Timestamp resolution for message-start lines.
//!
//! Dates are read day-first (`D/M/Y`). A first component above 12 can only
//! be a day; when day-first gives an impossible date and the first
//! component could be a month, the month-first reading is tried instead
//! (unless disabled in [`ParseConfig`]). Two-digit years are expanded with
//! a pivot: `00..=pivot` → 2000s, the rest → 1900s.
//!
//! Times are `H:MM` in 24-hour notation, or 12-hour with an `am`/`pm`
//! marker. Any out-of-range component makes the whole timestamp invalid.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::config::ParseConfig;

/// Resolves the date and time captured from a message-start line.
///
/// # Example
///
/// ```
/// use chatlens::config::ParseConfig;
/// use chatlens::parsing::parse_timestamp;
///
/// let config = ParseConfig::default();
/// let ts = parse_timestamp("15/01/24", "9:30 pm", &config).unwrap();
/// assert_eq!(ts.to_rfc3339(), "2024-01-15T21:30:00+00:00");
///
/// assert!(parse_timestamp("32/13/24", "99:99", &config).is_none());
/// ```
pub fn parse_timestamp(date: &str, time: &str, config: &ParseConfig) -> Option<DateTime<Utc>> {
    let date = parse_date(date, config.year_pivot, config.month_first_fallback)?;
    let time = parse_time(time)?;
    Some(date.and_time(time).and_utc())
}

/// Parses a `D/M/YY` or `D/M/YYYY` date, day-first.
pub fn parse_date(date: &str, year_pivot: u32, month_first_fallback: bool) -> Option<NaiveDate> {
    let mut parts = date.split('/');
    let first: u32 = parts.next()?.parse().ok()?;
    let second: u32 = parts.next()?.parse().ok()?;
    let year_str = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let year = expand_year(year_str, year_pivot)?;

    NaiveDate::from_ymd_opt(year, second, first).or_else(|| {
        if month_first_fallback && first <= 12 {
            NaiveDate::from_ymd_opt(year, first, second)
        } else {
            None
        }
    })
}

/// Expands a two- or four-digit year string.
///
/// # Example
///
/// ```
/// use chatlens::parsing::expand_year;
///
/// assert_eq!(expand_year("24", 68), Some(2024));
/// assert_eq!(expand_year("68", 68), Some(2068));
/// assert_eq!(expand_year("69", 68), Some(1969));
/// assert_eq!(expand_year("1999", 68), Some(1999));
/// assert_eq!(expand_year("199", 68), None);
/// ```
pub fn expand_year(year: &str, pivot: u32) -> Option<i32> {
    if !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u32 = year.parse().ok()?;
    let full = match year.len() {
        2 if value <= pivot => 2000 + value,
        2 => 1900 + value,
        4 => value,
        _ => return None,
    };
    i32::try_from(full).ok()
}

/// Parses `H:MM`, optionally followed by an am/pm marker.
///
/// # Example
///
/// ```
/// use chatlens::parsing::parse_time;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_time("12:05 am"), NaiveTime::from_hms_opt(0, 5, 0));
/// assert_eq!(parse_time("7:45PM"), NaiveTime::from_hms_opt(19, 45, 0));
/// assert_eq!(parse_time("23:59"), NaiveTime::from_hms_opt(23, 59, 0));
/// assert_eq!(parse_time("13:00 pm"), None);
/// ```
pub fn parse_time(time: &str) -> Option<NaiveTime> {
    let lower = time.trim().to_ascii_lowercase();

    let (clock, pm) = if let Some(rest) = lower.strip_suffix("am") {
        (rest.trim_end(), Some(false))
    } else if let Some(rest) = lower.strip_suffix("pm") {
        (rest.trim_end(), Some(true))
    } else {
        (lower.as_str(), None)
    };

    let (hour, minute) = clock.split_once(':')?;
    if minute.len() != 2 {
        return None;
    }
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;

    let hour = match pm {
        None => hour,
        Some(_) if !(1..=12).contains(&hour) => return None,
        Some(false) => hour % 12,
        Some(true) => hour % 12 + 12,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}
