use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use candela_core::connector::{CredentialProvider, Terminal};
use candela_core::types::{CandelaConfig, CandelaError};

use crate::delta::DeltaCell;
use crate::gate::ConnectionGate;
use crate::tracker::SharedClock;

/// Gateway to one trading terminal: lazy connection, clock-offset
/// resolution, and the candle query surface.
pub struct Candela {
    pub(crate) terminal: Arc<dyn Terminal>,
    pub(crate) credentials: Arc<dyn CredentialProvider>,
    pub(crate) cfg: CandelaConfig,
    pub(crate) gate: Arc<ConnectionGate>,
    pub(crate) delta: DeltaCell,
    pub(crate) clock: SharedClock,
}

impl fmt::Debug for Candela {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candela")
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing a `Candela` gateway with custom configuration.
pub struct CandelaBuilder {
    terminal: Option<Arc<dyn Terminal>>,
    credentials: Option<Arc<dyn CredentialProvider>>,
    cfg: CandelaConfig,
}

impl Default for CandelaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CandelaBuilder {
    /// Create a new builder with sensible defaults.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no terminal and no credential source; both must be
    ///   attached before [`build`](Self::build) succeeds.
    /// - The clock offset is measured against `XAUUSD` unless a
    ///   different reference symbol or an explicit override is set.
    /// - The clock tracker republishes roughly once per second until
    ///   [`tracker_interval`](Self::tracker_interval) changes it.
    #[must_use]
    pub fn new() -> Self {
        Self {
            terminal: None,
            credentials: None,
            cfg: CandelaConfig::default(),
        }
    }

    /// Attach the terminal backend every query goes through.
    ///
    /// Behavior and trade-offs:
    /// - Nothing connects at build time; the initialize/login sequence
    ///   runs on the first call that needs the terminal.
    /// - Exactly one terminal is supported; attaching again replaces the
    ///   previous one.
    #[must_use]
    pub fn with_terminal(mut self, terminal: Arc<dyn Terminal>) -> Self {
        self.terminal = Some(terminal);
        self
    }

    /// Attach the source consulted for credentials on first use.
    ///
    /// Behavior and trade-offs:
    /// - The source is re-read on every connect attempt, so credentials
    ///   supplied after a failed attempt are picked up without a rebuild.
    /// - A source that returns `None` keeps the gateway in the
    ///   not-configured state rather than failing permanently.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Symbol whose newest bar anchors clock-offset measurement and the
    /// background clock tracker.
    ///
    /// Behavior and trade-offs:
    /// - Pick an instrument that trades around the clock; a stale
    ///   reference bar skews the measured offset downward, which the
    ///   half-hour snap absorbs only up to 30 minutes.
    #[must_use]
    pub fn reference_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.cfg.reference_symbol = symbol.into();
        self
    }

    /// Fix the clock offset from text instead of measuring it.
    ///
    /// Behavior and trade-offs:
    /// - Accepts minutes (`"-120"`) or clock form (`"-02:00"`); see
    ///   [`candela_core::parse_offset_text`] for the full grammar.
    /// - With an override set, offset resolution never touches the
    ///   terminal, so queries can validate input before connecting.
    #[must_use]
    pub fn delta_override(mut self, text: impl Into<String>) -> Self {
        self.cfg.delta_override = Some(text.into());
        self
    }

    /// Republish cadence of the background clock tracker started by
    /// [`Candela::spawn_clock_tracker`].
    #[must_use]
    pub const fn tracker_interval(mut self, interval: Duration) -> Self {
        self.cfg.tracker_interval = interval;
        self
    }

    /// Build the `Candela` gateway.
    ///
    /// # Errors
    /// Returns `NotConfigured` if no terminal or no credential source
    /// has been attached.
    pub fn build(self) -> Result<Candela, CandelaError> {
        let Some(terminal) = self.terminal else {
            return Err(CandelaError::not_configured(
                "no terminal attached; add one via with_terminal(...)",
            ));
        };
        let Some(credentials) = self.credentials else {
            return Err(CandelaError::not_configured(
                "no credential source attached; add one via with_credentials(...)",
            ));
        };
        Ok(Candela {
            terminal,
            credentials,
            cfg: self.cfg,
            gate: Arc::new(ConnectionGate::new()),
            delta: DeltaCell::new(),
            clock: SharedClock::default(),
        })
    }
}

impl Candela {
    /// Start building a new `Candela` gateway.
    ///
    /// Typical usage attaches a terminal and a credential source, then
    /// queries candles:
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use candela::{Candela, EnvCredentials, RangeRequest};
    ///
    /// let candela = Candela::builder()
    ///     .with_terminal(Arc::new(Mt5Terminal::new()))
    ///     .with_credentials(Arc::new(EnvCredentials::new()))
    ///     .build()?;
    ///
    /// let rows = candela
    ///     .candles_range(&RangeRequest {
    ///         symbol: "XAUUSD".into(),
    ///         time_frame: "M15".into(),
    ///         time_from: "2024-01-01 00:00:00".into(),
    ///         time_to: "2024-01-02 00:00:00".into(),
    ///     })
    ///     .await?;
    /// ```
    #[must_use]
    pub fn builder() -> CandelaBuilder {
        CandelaBuilder::new()
    }
}
