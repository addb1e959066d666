//! Configuration and status types for the candle gateway.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CandelaError;

/// Account and terminal coordinates required to connect.
///
/// The login is carried as text and parsed to a numeric account id at
/// connect time, so interactive sources can hand the value through
/// unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Filesystem path of the terminal executable.
    pub terminal_path: String,
    /// Account number, as text.
    pub login: String,
    /// Account password, used verbatim.
    pub password: String,
    /// Broker server name.
    pub server: String,
}

impl Credentials {
    /// Build a credential set from the four coordinates.
    pub fn new(
        terminal_path: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<String>,
        server: impl Into<String>,
    ) -> Self {
        Self {
            terminal_path: terminal_path.into(),
            login: login.into(),
            password: password.into(),
            server: server.into(),
        }
    }

    /// True when every field is usable: path, login, and server are
    /// non-blank after trimming and the password is non-empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.terminal_path.trim().is_empty()
            && !self.login.trim().is_empty()
            && !self.password.is_empty()
            && !self.server.trim().is_empty()
    }

    /// The login parsed as a numeric account id.
    ///
    /// # Errors
    /// `NotConfigured` when the login text is not an integer; the set is
    /// unusable no matter how often the caller retries.
    pub fn login_id(&self) -> Result<i64, CandelaError> {
        self.login.trim().parse::<i64>().map_err(|_| {
            CandelaError::not_configured(format!(
                "login {:?} is not a numeric account id",
                self.login
            ))
        })
    }
}

/// Global configuration for the `Candela` gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandelaConfig {
    /// Instrument whose newest bar is read when measuring the clock
    /// offset and when the tracker republishes the terminal time.
    pub reference_symbol: String,
    /// Explicit offset text. When set, offset measurement is skipped
    /// entirely and no terminal connection is needed to resolve it.
    pub delta_override: Option<String>,
    /// Republish cadence of the terminal-clock tracker.
    pub tracker_interval: Duration,
}

impl Default for CandelaConfig {
    fn default() -> Self {
        Self {
            reference_symbol: "XAUUSD".to_string(),
            delta_override: None,
            tracker_interval: Duration::from_secs(1),
        }
    }
}

/// Point-in-time snapshot of gateway state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Whether the terminal connection is currently up.
    pub ready: bool,
    /// Whether a complete credential set is currently available.
    pub credentials_set: bool,
    /// Resolved clock offset in seconds, once cached.
    pub delta_seconds: Option<i64>,
    /// Most recent terminal instant published by the clock tracker.
    pub terminal_time: Option<DateTime<Utc>>,
}
