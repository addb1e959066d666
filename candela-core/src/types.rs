//! Re-export of the shared DTOs from `candela-types`.
// Consolidated re-exports so downstream crates can depend on `candela-core` only

pub use candela_types::{CandelaError, ConnectStage};

pub use candela_types::{CandelaConfig, Credentials, StatusReport};

pub use candela_types::{CandleRow, Rate, TimeFrame};

pub use candela_types::{PositionRequest, RangeRequest, TimeInput};
