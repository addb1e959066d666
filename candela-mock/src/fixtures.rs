//! Bar constructors shared by tests and examples.

use candela_core::types::Rate;

/// Single bar opening at `time` with prices derived from `px`.
#[must_use]
pub fn bar(time: i64, px: f64) -> Rate {
    Rate {
        time,
        open: px,
        high: px + 0.5,
        low: px - 0.5,
        close: px + 0.25,
        tick_volume: 10,
        spread: 2,
        real_volume: 100,
    }
}

/// `n` bars starting at `start`, spaced `step_secs` apart, price
/// drifting up one unit per bar.
#[must_use]
pub fn bars(start: i64, step_secs: i64, n: usize) -> Vec<Rate> {
    (0..n)
        .map(|i| bar(start + step_secs * i as i64, 2_000.0 + i as f64))
        .collect()
}
