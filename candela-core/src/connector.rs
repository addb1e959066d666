use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::types::{CandelaError, Credentials, Rate, TimeFrame};

/// Data-source contract for one attached trading terminal.
///
/// Implementations wrap a terminal process or bridge. All methods take
/// `&self`; a terminal that needs exclusive access must serialize
/// internally. Range bounds and bar times are expressed on the
/// terminal's own clock; shifting onto and off that clock is the
/// caller's concern.
#[async_trait]
pub trait Terminal: Send + Sync {
    /// Stable terminal name used in logs and error tags.
    fn name(&self) -> &'static str;

    /// Start, or attach to, the terminal process at `path`.
    async fn initialize(&self, path: &str) -> Result<(), CandelaError>;

    /// Authenticate the account against the broker server.
    async fn login(&self, login: i64, password: &str, server: &str) -> Result<(), CandelaError>;

    /// Tear the session down. Callers treat failures as non-fatal.
    async fn shutdown(&self) -> Result<(), CandelaError>;

    /// Every bar of `symbol` at `timeframe` between `from` and `to`,
    /// inclusive, oldest first.
    async fn rates_range(
        &self,
        symbol: &str,
        timeframe: TimeFrame,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Rate>, CandelaError>;

    /// `count` bars of `symbol` at `timeframe` ending `offset` bars back
    /// from the most recent one (offset 0 = newest), oldest first.
    async fn rates_from(
        &self,
        symbol: &str,
        timeframe: TimeFrame,
        offset: u32,
        count: u32,
    ) -> Result<Vec<Rate>, CandelaError>;
}

/// Source of the credential set read by the connection gate.
///
/// The gate reads this on every connect attempt, so an interactive
/// source can change its answer between attempts.
pub trait CredentialProvider: Send + Sync {
    /// The current credential set, or `None` when the source has none.
    fn credentials(&self) -> Option<Credentials>;
}

/// Fixed credential set captured at construction.
#[derive(Debug, Clone)]
pub struct StaticCredentials(Credentials);

impl StaticCredentials {
    /// Wrap a fixed credential set.
    #[must_use]
    pub const fn new(credentials: Credentials) -> Self {
        Self(credentials)
    }
}

impl CredentialProvider for StaticCredentials {
    fn credentials(&self) -> Option<Credentials> {
        Some(self.0.clone())
    }
}
