use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::rate::Rate;

/// One output row of the candle payload, with the bar time shifted off
/// the terminal clock.
///
/// Rows serialize as a fixed 8-element JSON array in column order
/// `[adjusted_time, open, high, low, close, tick_volume, spread,
/// real_volume]`, which keeps the payload compact and column-stable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandleRow {
    /// Bar open time minus the resolved clock offset, epoch seconds.
    pub adjusted_time: i64,
    /// Open price.
    pub open: f64,
    /// High price.
    pub high: f64,
    /// Low price.
    pub low: f64,
    /// Close price.
    pub close: f64,
    /// Number of ticks within the bar.
    pub tick_volume: u64,
    /// Spread in points.
    pub spread: i64,
    /// Traded volume, when the venue reports it.
    pub real_volume: u64,
}

impl CandleRow {
    /// Build a row from a raw bar, shifting its time back by
    /// `delta_secs` (the resolved clock offset in whole seconds).
    #[must_use]
    pub const fn from_rate(rate: &Rate, delta_secs: i64) -> Self {
        Self {
            adjusted_time: rate.time - delta_secs,
            open: rate.open,
            high: rate.high,
            low: rate.low,
            close: rate.close,
            tick_volume: rate.tick_volume,
            spread: rate.spread,
            real_volume: rate.real_volume,
        }
    }
}

impl Serialize for CandleRow {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut row = serializer.serialize_tuple(8)?;
        row.serialize_element(&self.adjusted_time)?;
        row.serialize_element(&self.open)?;
        row.serialize_element(&self.high)?;
        row.serialize_element(&self.low)?;
        row.serialize_element(&self.close)?;
        row.serialize_element(&self.tick_volume)?;
        row.serialize_element(&self.spread)?;
        row.serialize_element(&self.real_volume)?;
        row.end()
    }
}

impl<'de> Deserialize<'de> for CandleRow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = CandleRow;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a candle row of 8 numbers")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<CandleRow, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let adjusted_time = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let open = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let high = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                let low = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(3, &self))?;
                let close = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(4, &self))?;
                let tick_volume = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(5, &self))?;
                let spread = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(6, &self))?;
                let real_volume = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(7, &self))?;
                Ok(CandleRow {
                    adjusted_time,
                    open,
                    high,
                    low,
                    close,
                    tick_volume,
                    spread,
                    real_volume,
                })
            }
        }

        deserializer.deserialize_tuple(8, RowVisitor)
    }
}
