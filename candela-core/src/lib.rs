//! candela-core
//!
//! Connector contracts and leaf algorithms shared across the candela
//! workspace.
//!
//! - `connector`: the `Terminal` data-source trait and credential sourcing.
//! - `timeparse`: tolerant parsing of user-supplied time bounds.
//! - `delta`: the clock-offset text grammar and half-hour snapping.
//! - `payload`: normalization of raw bars into output rows.
//! - `task`: shutdown plumbing for background task handles.
//!
//! Async runtime (Tokio)
//! ---------------------
//! This crate assumes the Tokio ecosystem as the async runtime. The
//! `task` module is written against `tokio::task::JoinHandle<()>` and
//! `tokio::sync::oneshot::Sender<()>`, so handles built on it must be
//! driven by a Tokio 1.x runtime.
//!
#![warn(missing_docs)]

/// The `Terminal` data-source trait and credential sourcing.
pub mod connector;
/// Clock-offset text grammar and half-hour snapping.
pub mod delta;
/// Normalization of raw bars into output rows.
pub mod payload;
/// Shutdown plumbing for background task handles.
pub mod task;
/// Tolerant parsing of user-supplied time bounds.
pub mod timeparse;
pub mod types;

pub use connector::{CredentialProvider, StaticCredentials, Terminal};
pub use delta::{parse_offset_text, snap_to_half_hour};
pub use payload::normalize;
pub use timeparse::parse_instant;
pub use types::*;
