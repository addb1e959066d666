use serde::{Deserialize, Serialize};

/// One raw bar as reported by the terminal, timestamped on the
/// terminal's own clock.
///
/// Every field defaults to zero when absent so records from terminal
/// builds that omit spread or real volume still deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rate {
    /// Bar open time, epoch seconds on the terminal clock.
    #[serde(default)]
    pub time: i64,
    /// Open price.
    #[serde(default)]
    pub open: f64,
    /// High price.
    #[serde(default)]
    pub high: f64,
    /// Low price.
    #[serde(default)]
    pub low: f64,
    /// Close price.
    #[serde(default)]
    pub close: f64,
    /// Number of ticks within the bar.
    #[serde(default)]
    pub tick_volume: u64,
    /// Spread in points.
    #[serde(default)]
    pub spread: i64,
    /// Traded volume, when the venue reports it.
    #[serde(default)]
    pub real_volume: u64,
}
