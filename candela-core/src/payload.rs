use chrono::TimeDelta;

use crate::types::{CandleRow, Rate};

/// Convert terminal bars into wire rows, shifting each bar's open time
/// off the terminal clock by `delta`.
///
/// Pure: the input order and cardinality are preserved, and an empty
/// slice maps to an empty vector. Whether "no data" is an error is the
/// caller's decision.
#[must_use]
pub fn normalize(rates: &[Rate], delta: TimeDelta) -> Vec<CandleRow> {
    let delta_secs = delta.num_seconds();
    rates
        .iter()
        .map(|rate| CandleRow::from_rate(rate, delta_secs))
        .collect()
}
