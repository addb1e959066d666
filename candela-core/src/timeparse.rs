use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::types::{CandelaError, TimeInput};

/// Naive formats tried before the zone-aware fallbacks, in order.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a user-supplied time bound into a UTC instant.
///
/// Numbers are epoch seconds; fractional parts truncate toward zero.
/// Text is tried against, in order: `%Y-%m-%d %H:%M:%S` and
/// `%Y-%m-%dT%H:%M:%S` (read as UTC wall time), RFC 3339 (offset
/// honored and converted), then a bare `%Y-%m-%d` date at midnight.
///
/// ```
/// use candela_core::timeparse::parse_instant;
/// use candela_core::types::TimeInput;
///
/// let text = parse_instant(&TimeInput::from("2024-01-01 00:00:00")).unwrap();
/// let epoch = parse_instant(&TimeInput::from(1_704_067_200i64)).unwrap();
/// assert_eq!(text, epoch);
/// ```
///
/// # Errors
/// `InvalidTimeFormat` naming the input when no format matches, or when
/// a numeric input is outside the representable range.
pub fn parse_instant(input: &TimeInput) -> Result<DateTime<Utc>, CandelaError> {
    match input {
        TimeInput::Epoch(secs) => parse_epoch(*secs),
        TimeInput::Text(text) => parse_text(text),
    }
}

fn parse_epoch(secs: f64) -> Result<DateTime<Utc>, CandelaError> {
    if !secs.is_finite() {
        return Err(CandelaError::invalid_time(secs.to_string()));
    }
    let whole = secs.trunc();
    // guard the cast; from_timestamp re-checks chrono's own range
    if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
        return Err(CandelaError::invalid_time(secs.to_string()));
    }
    #[allow(clippy::cast_possible_truncation)]
    DateTime::from_timestamp(whole as i64, 0)
        .ok_or_else(|| CandelaError::invalid_time(secs.to_string()))
}

fn parse_text(text: &str) -> Result<DateTime<Utc>, CandelaError> {
    let trimmed = text.trim();
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(fixed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(fixed.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    Err(CandelaError::invalid_time(trimmed))
}
