use std::sync::{PoisonError, RwLock};

use candela_core::types::{CandelaError, TimeFrame};
use candela_core::{parse_offset_text, snap_to_half_hour};
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Mutex;
use tracing::info;

use crate::core::Candela;

/// Cached clock offset plus the lock that serializes resolution.
pub(crate) struct DeltaCell {
    cached: RwLock<Option<TimeDelta>>,
    resolve_lock: Mutex<()>,
}

impl DeltaCell {
    pub(crate) fn new() -> Self {
        Self {
            cached: RwLock::new(None),
            resolve_lock: Mutex::new(()),
        }
    }

    pub(crate) fn get(&self) -> Option<TimeDelta> {
        *self.cached.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn set(&self, delta: TimeDelta) {
        *self.cached.write().unwrap_or_else(PoisonError::into_inner) = Some(delta);
    }

    fn clear(&self) {
        *self.cached.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl Candela {
    /// Resolve the terminal clock offset, measuring at most once.
    ///
    /// An override configured via
    /// [`delta_override`](crate::CandelaBuilder::delta_override) is
    /// parsed instead of measured and never touches the terminal.
    /// Measurement connects, reads the newest reference bar, subtracts
    /// the host clock, and snaps the result up to its half-hour
    /// boundary. The resolved offset stays cached until
    /// [`reset_delta`](Self::reset_delta); failed attempts cache
    /// nothing, so the next caller retries.
    ///
    /// # Errors
    /// `InvalidDeltaFormat` for a malformed override; connection errors
    /// or `DeltaUnavailable` when measurement cannot produce an offset.
    pub async fn resolve_delta(&self) -> Result<TimeDelta, CandelaError> {
        if let Some(delta) = self.delta.get() {
            return Ok(delta);
        }
        let _guard = self.delta.resolve_lock.lock().await;
        // re-check under the lock; a racing caller may have resolved
        if let Some(delta) = self.delta.get() {
            return Ok(delta);
        }

        let delta = match &self.cfg.delta_override {
            Some(text) => parse_offset_text(text)?,
            None => self.measure_delta().await?,
        };
        self.delta.set(delta);
        info!(delta_secs = delta.num_seconds(), "clock offset resolved");
        Ok(delta)
    }

    /// Forget the cached clock offset; the next query resolves again.
    pub fn reset_delta(&self) {
        self.delta.clear();
    }

    /// Measure the offset as newest-reference-bar open time minus the
    /// host clock.
    async fn measure_delta(&self) -> Result<TimeDelta, CandelaError> {
        self.ensure_ready().await?;
        let symbol = &self.cfg.reference_symbol;
        let bars = self
            .terminal
            .rates_from(symbol, TimeFrame::M1, 0, 1)
            .await?;
        let Some(bar) = bars.first() else {
            return Err(CandelaError::delta_unavailable(format!(
                "no reference bar for {symbol}"
            )));
        };
        let bar_instant: DateTime<Utc> =
            DateTime::from_timestamp(bar.time, 0).ok_or_else(|| {
                CandelaError::delta_unavailable(format!(
                    "reference bar time {} is out of range",
                    bar.time
                ))
            })?;
        Ok(snap_to_half_hour(bar_instant - Utc::now()))
    }
}
