//! Candela-specific data transfer objects, configuration primitives, and
//! the unified error taxonomy.
#![warn(missing_docs)]

mod candle;
mod config;
mod error;
mod rate;
mod request;
mod timeframe;

pub use candle::CandleRow;
pub use config::{CandelaConfig, Credentials, StatusReport};
pub use error::{CandelaError, ConnectStage};
pub use rate::Rate;
pub use request::{PositionRequest, RangeRequest, TimeInput};
pub use timeframe::TimeFrame;
