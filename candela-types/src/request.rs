//! Request bodies for the two candle queries.

use serde::{Deserialize, Serialize};

/// A time bound supplied either as epoch seconds or as text.
///
/// Numeric values are epoch seconds; fractional parts truncate toward
/// zero. Text goes through the ordered format chain in `candela-core`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeInput {
    /// Epoch seconds, possibly fractional.
    Epoch(f64),
    /// Textual timestamp.
    Text(String),
}

impl From<f64> for TimeInput {
    fn from(secs: f64) -> Self {
        Self::Epoch(secs)
    }
}

impl From<i64> for TimeInput {
    fn from(secs: i64) -> Self {
        // realistic epoch seconds sit well inside f64's exact integer range
        #[allow(clippy::cast_precision_loss)]
        Self::Epoch(secs as f64)
    }
}

impl From<&str> for TimeInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for TimeInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Body of a range query: every bar between two instants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeRequest {
    /// Instrument to query.
    pub symbol: String,
    /// Timeframe code, e.g. `"M15"`; validated against [`crate::TimeFrame`].
    pub time_frame: String,
    /// Inclusive window start.
    pub time_from: TimeInput,
    /// Inclusive window end.
    pub time_to: TimeInput,
}

/// Body of a position query: `count` bars ending `offset` back from the
/// most recent bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRequest {
    /// Instrument to query.
    pub symbol: String,
    /// Timeframe code, e.g. `"M15"`; validated against [`crate::TimeFrame`].
    pub time_frame: String,
    /// Bars back from the most recent bar; 0 means the newest.
    pub offset: i64,
    /// Number of bars to return.
    pub count: i64,
}
