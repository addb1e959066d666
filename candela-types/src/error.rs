use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stage of the connection handshake that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectStage {
    /// The terminal process refused to start or attach.
    Initialize,
    /// The broker rejected the account credentials.
    Login,
}

impl fmt::Display for ConnectStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Initialize => "initialize",
            Self::Login => "login",
        })
    }
}

/// Unified error type for the candela workspace.
///
/// This covers configuration faults, the two-stage connection handshake,
/// clock-offset resolution, request validation, and terminal-tagged
/// failures from the data source.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CandelaError {
    /// The credential set is absent or unusable; no connection was attempted.
    #[error("terminal not configured: {detail}")]
    NotConfigured {
        /// Which part of the configuration is missing or malformed.
        detail: String,
    },

    /// The terminal rejected the connection handshake.
    #[error("terminal {stage} failed: {detail}")]
    ConnectionFailed {
        /// Which stage of the handshake was rejected.
        stage: ConnectStage,
        /// Human-readable failure message from the terminal.
        detail: String,
    },

    /// The clock offset could not be resolved.
    #[error("clock offset unavailable: {detail}")]
    DeltaUnavailable {
        /// Why no offset could be measured.
        detail: String,
    },

    /// The configured offset text matches none of the accepted forms.
    #[error("invalid offset text: {input:?}")]
    InvalidDeltaFormat {
        /// The rejected offset text.
        input: String,
    },

    /// A time bound matched none of the accepted formats.
    #[error("invalid time: {input:?}")]
    InvalidTimeFormat {
        /// The rejected time input.
        input: String,
    },

    /// The timeframe code is not one of the supported codes.
    #[error("invalid timeframe: {code:?}. Try: M1, M5, M15, M30, H1, H4, D1, W1, MN1")]
    InvalidTimeFrame {
        /// The rejected timeframe code.
        code: String,
    },

    /// Position queries require a strictly positive bar count.
    #[error("'count' must be > 0, got {count}")]
    InvalidCount {
        /// The rejected count.
        count: i64,
    },

    /// Position queries require a non-negative start offset.
    #[error("'offset' must be >= 0, got {offset}")]
    InvalidOffset {
        /// The rejected offset.
        offset: i64,
    },

    /// The query was valid but matched no bars.
    #[error("no data for {symbol}")]
    NoData {
        /// The symbol that came back empty.
        symbol: String,
    },

    /// An opaque terminal failure outside the connection handshake.
    #[error("{terminal} failed: {detail}")]
    Terminal {
        /// Terminal name that failed.
        terminal: String,
        /// Human-readable error message.
        detail: String,
    },
}

impl CandelaError {
    /// Helper: build a `NotConfigured` error with a detail message.
    pub fn not_configured(detail: impl Into<String>) -> Self {
        Self::NotConfigured {
            detail: detail.into(),
        }
    }

    /// Helper: build a `ConnectionFailed` error for a handshake stage.
    pub fn connection_failed(stage: ConnectStage, detail: impl Into<String>) -> Self {
        Self::ConnectionFailed {
            stage,
            detail: detail.into(),
        }
    }

    /// Helper: build a `DeltaUnavailable` error with a detail message.
    pub fn delta_unavailable(detail: impl Into<String>) -> Self {
        Self::DeltaUnavailable {
            detail: detail.into(),
        }
    }

    /// Helper: build an `InvalidDeltaFormat` error naming the rejected text.
    pub fn invalid_delta(input: impl Into<String>) -> Self {
        Self::InvalidDeltaFormat {
            input: input.into(),
        }
    }

    /// Helper: build an `InvalidTimeFormat` error naming the rejected input.
    pub fn invalid_time(input: impl Into<String>) -> Self {
        Self::InvalidTimeFormat {
            input: input.into(),
        }
    }

    /// Helper: build an `InvalidTimeFrame` error naming the rejected code.
    pub fn invalid_time_frame(code: impl Into<String>) -> Self {
        Self::InvalidTimeFrame { code: code.into() }
    }

    /// Helper: build a `NoData` error for a symbol.
    pub fn no_data(symbol: impl Into<String>) -> Self {
        Self::NoData {
            symbol: symbol.into(),
        }
    }

    /// Helper: build a `Terminal` error with the terminal name and message.
    pub fn terminal(terminal: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Terminal {
            terminal: terminal.into(),
            detail: detail.into(),
        }
    }

    /// HTTP-style status code for transports that surface these errors.
    ///
    /// Configuration faults map to 503 (retryable once configured),
    /// terminal-side failures to 500, rejected inputs to 400, and an
    /// empty result to 404.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotConfigured { .. } => 503,
            Self::ConnectionFailed { .. } | Self::DeltaUnavailable { .. } | Self::Terminal { .. } => {
                500
            }
            Self::InvalidDeltaFormat { .. }
            | Self::InvalidTimeFormat { .. }
            | Self::InvalidTimeFrame { .. }
            | Self::InvalidCount { .. }
            | Self::InvalidOffset { .. } => 400,
            Self::NoData { .. } => 404,
        }
    }

    /// Returns true if the caller can fix this error by changing the request.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        self.status_code() == 400
    }
}
