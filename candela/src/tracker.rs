use std::sync::{Arc, PoisonError, RwLock};

use candela_core::task::TaskGuard;
use candela_core::types::TimeFrame;
use chrono::{DateTime, Utc};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::core::Candela;

/// Last terminal instant published by the clock tracker.
#[derive(Clone, Default)]
pub(crate) struct SharedClock(Arc<RwLock<Option<DateTime<Utc>>>>);

impl SharedClock {
    pub(crate) fn get(&self) -> Option<DateTime<Utc>> {
        *self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, instant: DateTime<Utc>) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = Some(instant);
    }
}

/// Handle to the background clock tracker.
///
/// Dropping the handle stops the tracker; [`stop`](Self::stop) does the
/// same but waits for the task to wind down.
pub struct TrackerHandle {
    guard: TaskGuard<JoinHandle<()>, oneshot::Sender<()>>,
}

impl TrackerHandle {
    /// Stop the tracker and wait for its task to finish.
    pub async fn stop(mut self) {
        self.guard.fire_stop();
        if let Some(task) = self.guard.take_task() {
            let _ = task.await;
        }
    }
}

impl Candela {
    /// Start the background task that republishes the terminal clock.
    ///
    /// Once per `tracker_interval` the tracker reads the newest
    /// reference bar and publishes its open time into
    /// [`status`](Self::status). Until the gateway connects the tracker
    /// idles without touching the terminal, and fetch errors are logged
    /// and swallowed so a flaky terminal cannot kill the loop.
    #[must_use]
    pub fn spawn_clock_tracker(&self) -> TrackerHandle {
        let terminal = Arc::clone(&self.terminal);
        let gate = Arc::clone(&self.gate);
        let clock = self.clock.clone();
        let symbol = self.cfg.reference_symbol.clone();
        let interval = self.cfg.tracker_interval;
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        if !gate.is_ready() {
                            continue;
                        }
                        match terminal.rates_from(&symbol, TimeFrame::M1, 0, 1).await {
                            Ok(bars) => {
                                match bars.first().and_then(|bar| DateTime::from_timestamp(bar.time, 0)) {
                                    Some(instant) => clock.publish(instant),
                                    None => debug!(symbol = %symbol, "clock tick returned no usable bar"),
                                }
                            }
                            Err(e) => debug!(symbol = %symbol, error = %e, "clock tick failed"),
                        }
                    }
                }
            }
        });

        TrackerHandle {
            guard: TaskGuard::new(task, stop_tx),
        }
    }
}
