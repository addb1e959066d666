use candela_core::types::{CandelaError, CandleRow, PositionRequest, RangeRequest, TimeFrame};
use candela_core::{normalize, parse_instant};
use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use crate::core::Candela;

impl Candela {
    /// Connect to the terminal unless already connected.
    ///
    /// Queries call this implicitly; exposing it lets callers front-load
    /// the handshake at startup instead of paying for it on the first
    /// request.
    ///
    /// # Errors
    /// `NotConfigured` when no usable credentials are available,
    /// `ConnectionFailed` when the terminal rejects the handshake.
    pub async fn ensure_ready(&self) -> Result<(), CandelaError> {
        self.gate
            .ensure_ready(self.credentials.as_ref(), self.terminal.as_ref())
            .await
    }

    /// Fetch candles between two instants.
    ///
    /// Behavior and trade-offs:
    /// - Both bounds accept epoch seconds or text; they are interpreted
    ///   on the caller's clock and shifted onto the terminal clock
    ///   before the fetch, so callers never see the broker timezone.
    /// - The window is inclusive on both ends, matching the terminal's
    ///   own range semantics.
    /// - Returned rows carry `adjusted_time` back on the caller's clock.
    ///
    /// # Errors
    /// Connection and offset-resolution errors first, then
    /// `InvalidTimeFrame` or `InvalidTimeFormat` for rejected inputs,
    /// `NoData` when the window matches no bars, and terminal errors
    /// pass through as `Terminal`.
    pub async fn candles_range(&self, req: &RangeRequest) -> Result<Vec<CandleRow>, CandelaError> {
        self.ensure_ready().await?;
        let delta = self.resolve_delta().await?;
        let timeframe = TimeFrame::from_code(&req.time_frame)?;
        let from = shift_onto_terminal(parse_instant(&req.time_from)?, delta)?;
        let to = shift_onto_terminal(parse_instant(&req.time_to)?, delta)?;

        let rates = self
            .terminal
            .rates_range(&req.symbol, timeframe, from, to)
            .await?;
        if rates.is_empty() {
            return Err(CandelaError::no_data(&req.symbol));
        }
        debug!(symbol = %req.symbol, timeframe = %timeframe, rows = rates.len(), "range query served");
        Ok(normalize(&rates, delta))
    }

    /// Fetch `count` candles ending `offset` bars back from the newest.
    ///
    /// Behavior and trade-offs:
    /// - `offset` 0 starts at the newest bar; larger offsets walk into
    ///   history. Position is bar-indexed, so no clock shift applies to
    ///   the request itself, only to the returned rows.
    /// - `count` is validated before `offset`, and both before the
    ///   terminal is asked for data.
    ///
    /// # Errors
    /// Connection and offset-resolution errors first, then
    /// `InvalidTimeFrame`, `InvalidCount` or `InvalidOffset` for
    /// rejected inputs, `NoData` when nothing matches, and terminal
    /// errors pass through as `Terminal`.
    pub async fn candles_from(
        &self,
        req: &PositionRequest,
    ) -> Result<Vec<CandleRow>, CandelaError> {
        self.ensure_ready().await?;
        let delta = self.resolve_delta().await?;
        let timeframe = TimeFrame::from_code(&req.time_frame)?;
        if req.count <= 0 {
            return Err(CandelaError::InvalidCount { count: req.count });
        }
        if req.offset < 0 {
            return Err(CandelaError::InvalidOffset { offset: req.offset });
        }
        let count =
            u32::try_from(req.count).map_err(|_| CandelaError::InvalidCount { count: req.count })?;
        let offset = u32::try_from(req.offset)
            .map_err(|_| CandelaError::InvalidOffset { offset: req.offset })?;

        let rates = self
            .terminal
            .rates_from(&req.symbol, timeframe, offset, count)
            .await?;
        if rates.is_empty() {
            return Err(CandelaError::no_data(&req.symbol));
        }
        debug!(symbol = %req.symbol, timeframe = %timeframe, rows = rates.len(), "position query served");
        Ok(normalize(&rates, delta))
    }
}

/// Move a caller-clock bound onto the terminal clock.
fn shift_onto_terminal(
    instant: DateTime<Utc>,
    delta: TimeDelta,
) -> Result<DateTime<Utc>, CandelaError> {
    instant
        .checked_add_signed(delta)
        .ok_or_else(|| CandelaError::invalid_time(instant.to_rfc3339()))
}
