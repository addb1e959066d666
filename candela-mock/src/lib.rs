use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use candela_core::connector::Terminal;
use candela_core::types::{CandelaError, Rate, TimeFrame};
use chrono::{DateTime, TimeDelta, Utc};

pub mod fixtures;

/// Arguments of the most recent `rates_from` call, recorded for
/// assertions in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromCall {
    pub symbol: String,
    pub timeframe: TimeFrame,
    pub offset: u32,
    pub count: u32,
}

/// Terminal double for CI-safe tests and examples.
///
/// Behavior is fixed at build time through [`MockTerminalBuilder`]:
/// scripted bars, failure budgets for the connect sequence, and a
/// simulated clock offset for synthesized bars. Call counters let tests
/// assert how often each entry point ran. The magic symbol `"FAIL"`
/// forces a terminal error from either fetch method.
pub struct MockTerminal {
    clock_offset: TimeDelta,
    bar_staleness: TimeDelta,
    range_bars: Vec<Rate>,
    from_bars: Option<Vec<Rate>>,
    fail_initialize: AtomicUsize,
    fail_login: AtomicUsize,
    fail_shutdown: AtomicUsize,
    initialize_calls: AtomicUsize,
    login_calls: AtomicUsize,
    shutdown_calls: AtomicUsize,
    range_calls: AtomicUsize,
    from_calls: AtomicUsize,
    last_from: Mutex<Option<FromCall>>,
}

/// Builder for [`MockTerminal`]. All knobs default to "succeed with
/// synthesized data".
pub struct MockTerminalBuilder {
    clock_offset: TimeDelta,
    bar_staleness: TimeDelta,
    range_bars: Vec<Rate>,
    from_bars: Option<Vec<Rate>>,
    fail_initialize: usize,
    fail_login: usize,
    fail_shutdown: usize,
}

impl Default for MockTerminalBuilder {
    fn default() -> Self {
        Self {
            clock_offset: TimeDelta::zero(),
            bar_staleness: TimeDelta::zero(),
            range_bars: Vec::new(),
            from_bars: None,
            fail_initialize: 0,
            fail_login: 0,
            fail_shutdown: 0,
        }
    }
}

impl MockTerminalBuilder {
    /// Offset of the simulated terminal clock from UTC, applied when
    /// synthesizing bars.
    #[must_use]
    pub const fn clock_offset(mut self, offset: TimeDelta) -> Self {
        self.clock_offset = offset;
        self
    }

    /// How far the newest synthesized bar lags the simulated clock.
    #[must_use]
    pub const fn bar_staleness(mut self, staleness: TimeDelta) -> Self {
        self.bar_staleness = staleness;
        self
    }

    /// Bars served by `rates_range`, filtered to the requested window.
    #[must_use]
    pub fn range_bars(mut self, bars: Vec<Rate>) -> Self {
        self.range_bars = bars;
        self
    }

    /// Bars backing `rates_from`, oldest first. When set, position
    /// queries slice this script instead of synthesizing data.
    #[must_use]
    pub fn from_bars(mut self, bars: Vec<Rate>) -> Self {
        self.from_bars = Some(bars);
        self
    }

    /// Fail the next `n` `initialize` calls before succeeding.
    #[must_use]
    pub const fn fail_initialize_times(mut self, n: usize) -> Self {
        self.fail_initialize = n;
        self
    }

    /// Fail the next `n` `login` calls before succeeding.
    #[must_use]
    pub const fn fail_login_times(mut self, n: usize) -> Self {
        self.fail_login = n;
        self
    }

    /// Fail the next `n` `shutdown` calls before succeeding.
    #[must_use]
    pub const fn fail_shutdown_times(mut self, n: usize) -> Self {
        self.fail_shutdown = n;
        self
    }

    #[must_use]
    pub fn build(self) -> MockTerminal {
        MockTerminal {
            clock_offset: self.clock_offset,
            bar_staleness: self.bar_staleness,
            range_bars: self.range_bars,
            from_bars: self.from_bars,
            fail_initialize: AtomicUsize::new(self.fail_initialize),
            fail_login: AtomicUsize::new(self.fail_login),
            fail_shutdown: AtomicUsize::new(self.fail_shutdown),
            initialize_calls: AtomicUsize::new(0),
            login_calls: AtomicUsize::new(0),
            shutdown_calls: AtomicUsize::new(0),
            range_calls: AtomicUsize::new(0),
            from_calls: AtomicUsize::new(0),
            last_from: Mutex::new(None),
        }
    }
}

impl Default for MockTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTerminal {
    #[must_use]
    pub fn builder() -> MockTerminalBuilder {
        MockTerminalBuilder::default()
    }

    /// A terminal that always succeeds and synthesizes bars on demand.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn initialize_calls(&self) -> usize {
        self.initialize_calls.load(Ordering::SeqCst)
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn shutdown_calls(&self) -> usize {
        self.shutdown_calls.load(Ordering::SeqCst)
    }

    pub fn range_calls(&self) -> usize {
        self.range_calls.load(Ordering::SeqCst)
    }

    pub fn from_calls(&self) -> usize {
        self.from_calls.load(Ordering::SeqCst)
    }

    /// Arguments of the most recent `rates_from` call, if any.
    pub fn last_from_call(&self) -> Option<FromCall> {
        self.last_from
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Consume one unit of a failure budget. Returns `true` while the
    /// budget is non-zero.
    fn take_budget(budget: &AtomicUsize) -> bool {
        budget
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    fn forced_failure(symbol: &str, capability: &'static str) -> Result<(), CandelaError> {
        if symbol == "FAIL" {
            return Err(CandelaError::terminal(
                "candela-mock",
                format!("forced failure: {capability}"),
            ));
        }
        Ok(())
    }

    /// Minute bars ending near the simulated terminal clock, oldest
    /// first, aligned to minute boundaries.
    fn synthesize_from(&self, offset: u32, count: u32) -> Vec<Rate> {
        let now = Utc::now() + self.clock_offset - self.bar_staleness;
        let newest = now.timestamp() - now.timestamp().rem_euclid(60) - 60 * i64::from(offset);
        (0..count)
            .rev()
            .map(|back| fixtures::bar(newest - 60 * i64::from(back), 2_000.0))
            .collect()
    }
}

#[async_trait]
impl Terminal for MockTerminal {
    fn name(&self) -> &'static str {
        "candela-mock"
    }

    async fn initialize(&self, path: &str) -> Result<(), CandelaError> {
        self.initialize_calls.fetch_add(1, Ordering::SeqCst);
        if Self::take_budget(&self.fail_initialize) {
            return Err(CandelaError::terminal(
                "candela-mock",
                format!("initialize refused for {path}"),
            ));
        }
        Ok(())
    }

    async fn login(&self, login: i64, _password: &str, server: &str) -> Result<(), CandelaError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        if Self::take_budget(&self.fail_login) {
            return Err(CandelaError::terminal(
                "candela-mock",
                format!("login {login} rejected by {server}"),
            ));
        }
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), CandelaError> {
        self.shutdown_calls.fetch_add(1, Ordering::SeqCst);
        if Self::take_budget(&self.fail_shutdown) {
            return Err(CandelaError::terminal("candela-mock", "shutdown refused"));
        }
        Ok(())
    }

    async fn rates_range(
        &self,
        symbol: &str,
        _timeframe: TimeFrame,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Rate>, CandelaError> {
        self.range_calls.fetch_add(1, Ordering::SeqCst);
        Self::forced_failure(symbol, "rates_range")?;
        let lo = from.timestamp();
        let hi = to.timestamp();
        Ok(self
            .range_bars
            .iter()
            .filter(|bar| bar.time >= lo && bar.time <= hi)
            .copied()
            .collect())
    }

    async fn rates_from(
        &self,
        symbol: &str,
        timeframe: TimeFrame,
        offset: u32,
        count: u32,
    ) -> Result<Vec<Rate>, CandelaError> {
        self.from_calls.fetch_add(1, Ordering::SeqCst);
        *self
            .last_from
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(FromCall {
            symbol: symbol.to_owned(),
            timeframe,
            offset,
            count,
        });
        Self::forced_failure(symbol, "rates_from")?;
        if let Some(bars) = &self.from_bars {
            // offset counts back from the newest scripted bar
            let end = bars.len().saturating_sub(offset as usize);
            let start = end.saturating_sub(count as usize);
            return Ok(bars[start..end].to_vec());
        }
        Ok(self.synthesize_from(offset, count))
    }
}
