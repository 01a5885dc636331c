//! The execution engine and the feeder/gateway boundary contracts it's
//! generic over (spec §4.9–4.11, C10–C12).

pub mod execution;
pub mod traits;

pub use execution::ExecutionEngine;
pub use traits::{Feeder, Gateway, TradeSink};
