//! Candela fetches candle history from a MetaTrader 5 style terminal
//! while hiding the terminal's broker-local clock from callers.
//!
//! Overview
//! - Connects lazily: the initialize/login handshake runs on the first
//!   query that needs the terminal, exactly once, no matter how many
//!   callers race it.
//! - Resolves the gap between the terminal clock and the caller's clock
//!   once, from a configured override or by measuring against a
//!   reference bar, then serves it from cache.
//! - Normalizes every bar into a fixed 8-column row whose open time is
//!   shifted back onto the caller's clock.
//! - Runs an optional background tracker that republishes the terminal
//!   time into the status snapshot.
//!
//! Key behaviors and trade-offs
//! - Clock offset: brokers run terminals on exchange-local clocks that
//!   sit a whole number of half hours from UTC. Measuring against the
//!   newest reference bar and snapping up to the half-hour boundary
//!   absorbs bar staleness of up to 30 minutes; an explicit override
//!   skips measurement entirely and works before any connection exists.
//! - Validation order: queries connect and resolve the offset before
//!   validating the request, so a misconfigured terminal surfaces as a
//!   configuration error rather than masquerading as bad input.
//! - Errors: one `CandelaError` taxonomy covers configuration, the
//!   handshake, offset resolution, input validation, and terminal
//!   failures, each with an HTTP-style status code for transports.
//!
//! Examples
//! Building a gateway and fetching a range of candles:
//! ```rust,ignore
//! use std::sync::Arc;
//! use candela::{Candela, EnvCredentials, RangeRequest};
//!
//! let candela = Candela::builder()
//!     .with_terminal(Arc::new(Mt5Terminal::new()))
//!     .with_credentials(Arc::new(EnvCredentials::new()))
//!     .build()?;
//!
//! let rows = candela
//!     .candles_range(&RangeRequest {
//!         symbol: "XAUUSD".into(),
//!         time_frame: "M15".into(),
//!         time_from: "2024-01-01 00:00:00".into(),
//!         time_to: "2024-01-02 00:00:00".into(),
//!     })
//!     .await?;
//! ```
//!
//! Position queries count back from the newest bar:
//! ```rust,ignore
//! use candela::PositionRequest;
//!
//! let rows = candela
//!     .candles_from(&PositionRequest {
//!         symbol: "EURUSD".into(),
//!         time_frame: "H1".into(),
//!         offset: 0,
//!         count: 100,
//!     })
//!     .await?;
//! ```
//!
//! Tracking the terminal clock in the background:
//! ```rust,ignore
//! let tracker = candela.spawn_clock_tracker();
//! // ... poll candela.status().terminal_time ...
//! tracker.stop().await;
//! ```
//!
//! See the workspace's `demos/` member for runnable end-to-end
//! demonstrations against the scripted mock terminal.
#![warn(missing_docs)]

pub(crate) mod core;

mod candles;
mod delta;
mod env;
mod gate;
mod status;
mod tracker;

pub use crate::core::{Candela, CandelaBuilder};
pub use crate::env::{ENV_LOGIN, ENV_PASSWORD, ENV_SERVER, ENV_TERMINAL_PATH, EnvCredentials};
pub use crate::tracker::TrackerHandle;

pub use candela_core::connector::{CredentialProvider, StaticCredentials, Terminal};
pub use candela_core::{parse_instant, parse_offset_text, snap_to_half_hour};

// Re-export core types for convenience
pub use candela_core::types::{
    // Configuration and status
    CandelaConfig,
    CandelaError,
    // Payload types
    CandleRow,
    ConnectStage,
    Credentials,
    // Request types
    PositionRequest,
    RangeRequest,
    Rate,
    StatusReport,
    TimeFrame,
    TimeInput,
};
