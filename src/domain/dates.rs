use chrono::{DateTime, NaiveDate, Utc};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Error returned when a date string cannot be parsed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid date '{0}': expected YYYY-MM-DD or an RFC 3339 timestamp")]
pub struct DateError(String);

/// Number of whole days from `start` to `end`.
///
/// Returns `0` when both dates are equal and a negative number when `end`
/// is before `start`. Callers validate the ordering upstream.
#[must_use]
pub fn duration_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Number of days between two ISO date strings, rounded up.
///
/// Both arguments may be plain dates (`2025-06-01`, read as midnight UTC) or
/// RFC 3339 timestamps. The span is `ceil((end - start) / 1 day)`.
///
/// # Errors
///
/// Returns [`DateError`] if either string is not a valid date.
pub fn days_between(start: &str, end: &str) -> Result<i64, DateError> {
    let start = parse_instant(start)?;
    let end = parse_instant(end)?;
    let millis = (end - start).num_milliseconds();

    // integer division truncates toward zero, which is already the ceiling
    // for negative spans
    let days = millis / MILLIS_PER_DAY;
    if millis % MILLIS_PER_DAY > 0 {
        Ok(days + 1)
    } else {
        Ok(days)
    }
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`DateError`] if the string is not a valid calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate, DateError> {
    s.trim()
        .parse::<NaiveDate>()
        .map_err(|_| DateError(s.to_string()))
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, DateError> {
    if let Ok(date) = parse_date(s) {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }
    DateTime::parse_from_rfc3339(s.trim())
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|_| DateError(s.to_string()))
}

/// Renders a day count as `"1 day"` or `"N days"`.
#[must_use]
pub fn day_label(days: i64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}
