//! Signal generation: the `Strategy` capability trait and the one concrete
//! mean-reversion implementation this core ships (spec §4.7–4.8, C7–C8).

pub mod ewma;
pub mod mean_reversion;

use crate::core::types::{Signal, TradeUpdate};

/// A strategy consumes trades and produces at most one [`Signal`] per
/// trade. Plain trait, no default methods — the teacher's const-generic,
/// zero-dispatch shape (`bog-core::engine::generic::Strategy`): a single
/// hot-path method on a concrete, usually zero-or-small-sized type, so
/// [`crate::engine::ExecutionEngine`] is generic over it and monomorphizes
/// away the dispatch instead of going through `Box<dyn Strategy>`.
pub trait Strategy {
    fn on_trade(&mut self, trade: &TradeUpdate) -> Signal;
}

pub use ewma::Ewma;
pub use mean_reversion::MeanReversion;
