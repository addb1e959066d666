use chrono::TimeDelta;

use crate::types::CandelaError;

/// Parse configured clock-offset text into a signed duration.
///
/// Accepted forms, tried in order:
/// - `""`, `"0"`, `"+0"`, `"-0"`: zero offset;
/// - an optionally signed run of digits: whole minutes, e.g. `"-120"`;
/// - an optionally signed `HH:MM` or `HH:MM:SS` clock form, e.g.
///   `"-02:00"` or `"03:30:00"`; the sign applies to the whole duration.
///
/// Surrounding whitespace is ignored.
///
/// ```
/// use candela_core::delta::parse_offset_text;
/// use chrono::TimeDelta;
///
/// assert_eq!(parse_offset_text("-120").unwrap(), TimeDelta::minutes(-120));
/// assert_eq!(parse_offset_text("-02:00").unwrap(), TimeDelta::hours(-2));
/// assert_eq!(parse_offset_text("").unwrap(), TimeDelta::zero());
/// ```
///
/// # Errors
/// `InvalidDeltaFormat` naming the input for anything else.
pub fn parse_offset_text(text: &str) -> Result<TimeDelta, CandelaError> {
    let trimmed = text.trim();
    if matches!(trimmed, "" | "0" | "+0" | "-0") {
        return Ok(TimeDelta::zero());
    }

    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    if !body.is_empty() && body.bytes().all(|b| b.is_ascii_digit()) {
        let minutes: i64 = body
            .parse()
            .map_err(|_| CandelaError::invalid_delta(text))?;
        let delta = TimeDelta::try_minutes(minutes)
            .ok_or_else(|| CandelaError::invalid_delta(text))?;
        return Ok(if negative { -delta } else { delta });
    }

    if let Some(delta) = parse_clock_form(body) {
        return Ok(if negative { -delta } else { delta });
    }

    Err(CandelaError::invalid_delta(text))
}

/// `HH:MM` or `HH:MM:SS`, all parts unsigned digits. Parts are not
/// range-checked, so `"99:30"` reads as 99.5 hours.
fn parse_clock_form(body: &str) -> Option<TimeDelta> {
    let parts: Vec<&str> = body.split(':').collect();
    if parts.len() != 2 && parts.len() != 3 {
        return None;
    }
    let mut nums = [0i64; 3];
    for (slot, part) in nums.iter_mut().zip(&parts) {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *slot = part.parse().ok()?;
    }
    let secs = nums[0]
        .checked_mul(3600)?
        .checked_add(nums[1].checked_mul(60)?)?
        .checked_add(nums[2])?;
    TimeDelta::try_seconds(secs)
}

/// Snap a measured clock offset up to its half-hour boundary.
///
/// The reference bar behind a measurement can only lag the terminal
/// clock, so with a bar under half an hour stale a true offset of `-30`
/// minutes measures somewhere in `(-60, -30]` minutes and never above.
/// Rounding the measured whole minutes up to the next multiple of 30
/// recovers the boundary; exact multiples are unchanged.
///
/// ```
/// use candela_core::delta::snap_to_half_hour;
/// use chrono::TimeDelta;
///
/// assert_eq!(snap_to_half_hour(TimeDelta::minutes(-47)), TimeDelta::minutes(-30));
/// assert_eq!(snap_to_half_hour(TimeDelta::minutes(179)), TimeDelta::minutes(180));
/// assert_eq!(snap_to_half_hour(TimeDelta::minutes(-120)), TimeDelta::minutes(-120));
/// ```
#[must_use]
pub fn snap_to_half_hour(measured: TimeDelta) -> TimeDelta {
    let minutes = measured.num_minutes();
    let snapped = (minutes + 29).div_euclid(30) * 30;
    // out of range only at the extremes of TimeDelta itself
    TimeDelta::try_minutes(snapped).unwrap_or(measured)
}
