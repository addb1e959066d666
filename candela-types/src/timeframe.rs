//! Timeframe codes accepted by candle queries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CandelaError;

/// Chart periodicity accepted by candle queries.
///
/// The code set is closed: minutes (`M1`..`M30`), hours (`H1`..`H12`),
/// then daily, weekly, and monthly. Request validation rejects anything
/// else with [`CandelaError::InvalidTimeFrame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeFrame {
    /// 1-minute bars.
    M1,
    /// 2-minute bars.
    M2,
    /// 3-minute bars.
    M3,
    /// 4-minute bars.
    M4,
    /// 5-minute bars.
    M5,
    /// 6-minute bars.
    M6,
    /// 10-minute bars.
    M10,
    /// 12-minute bars.
    M12,
    /// 15-minute bars.
    M15,
    /// 20-minute bars.
    M20,
    /// 30-minute bars.
    M30,
    /// 1-hour bars.
    H1,
    /// 2-hour bars.
    H2,
    /// 3-hour bars.
    H3,
    /// 4-hour bars.
    H4,
    /// 6-hour bars.
    H6,
    /// 8-hour bars.
    H8,
    /// 12-hour bars.
    H12,
    /// Daily bars.
    D1,
    /// Weekly bars.
    W1,
    /// Monthly bars.
    MN1,
}

impl TimeFrame {
    /// Every supported code, in ascending periodicity order.
    pub const ALL: &'static [Self] = &[
        Self::M1,
        Self::M2,
        Self::M3,
        Self::M4,
        Self::M5,
        Self::M6,
        Self::M10,
        Self::M12,
        Self::M15,
        Self::M20,
        Self::M30,
        Self::H1,
        Self::H2,
        Self::H3,
        Self::H4,
        Self::H6,
        Self::H8,
        Self::H12,
        Self::D1,
        Self::W1,
        Self::MN1,
    ];

    /// Parse a textual code, e.g. `"M15"`. Codes are case-sensitive.
    ///
    /// # Errors
    /// `InvalidTimeFrame` naming the rejected code.
    pub fn from_code(code: &str) -> Result<Self, CandelaError> {
        match code {
            "M1" => Ok(Self::M1),
            "M2" => Ok(Self::M2),
            "M3" => Ok(Self::M3),
            "M4" => Ok(Self::M4),
            "M5" => Ok(Self::M5),
            "M6" => Ok(Self::M6),
            "M10" => Ok(Self::M10),
            "M12" => Ok(Self::M12),
            "M15" => Ok(Self::M15),
            "M20" => Ok(Self::M20),
            "M30" => Ok(Self::M30),
            "H1" => Ok(Self::H1),
            "H2" => Ok(Self::H2),
            "H3" => Ok(Self::H3),
            "H4" => Ok(Self::H4),
            "H6" => Ok(Self::H6),
            "H8" => Ok(Self::H8),
            "H12" => Ok(Self::H12),
            "D1" => Ok(Self::D1),
            "W1" => Ok(Self::W1),
            "MN1" => Ok(Self::MN1),
            other => Err(CandelaError::invalid_time_frame(other)),
        }
    }

    /// The textual code, e.g. `"M15"`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::M1 => "M1",
            Self::M2 => "M2",
            Self::M3 => "M3",
            Self::M4 => "M4",
            Self::M5 => "M5",
            Self::M6 => "M6",
            Self::M10 => "M10",
            Self::M12 => "M12",
            Self::M15 => "M15",
            Self::M20 => "M20",
            Self::M30 => "M30",
            Self::H1 => "H1",
            Self::H2 => "H2",
            Self::H3 => "H3",
            Self::H4 => "H4",
            Self::H6 => "H6",
            Self::H8 => "H8",
            Self::H12 => "H12",
            Self::D1 => "D1",
            Self::W1 => "W1",
            Self::MN1 => "MN1",
        }
    }

    /// The terminal's opaque numeric identifier for this periodicity.
    ///
    /// Minute codes carry their minute count; hour codes and above use
    /// the terminal's flagged constants.
    #[must_use]
    pub const fn terminal_id(self) -> u32 {
        match self {
            Self::M1 => 1,
            Self::M2 => 2,
            Self::M3 => 3,
            Self::M4 => 4,
            Self::M5 => 5,
            Self::M6 => 6,
            Self::M10 => 10,
            Self::M12 => 12,
            Self::M15 => 15,
            Self::M20 => 20,
            Self::M30 => 30,
            Self::H1 => 16385,
            Self::H2 => 16386,
            Self::H3 => 16387,
            Self::H4 => 16388,
            Self::H6 => 16390,
            Self::H8 => 16392,
            Self::H12 => 16396,
            Self::D1 => 16408,
            Self::W1 => 32769,
            Self::MN1 => 49153,
        }
    }
}

impl FromStr for TimeFrame {
    type Err = CandelaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
