//! Hot-path core of a low-latency trading engine: fixed-point market-data
//! types, a lock-free SPSC ring, a latency histogram, an L2 order book, a
//! mean-reversion strategy, pre-trade risk checks, and the execution
//! engine that composes them. No dynamic allocation, no blocking
//! synchronization, and no hidden dispatch on the path from "a trade is
//! observed" to "an order command is handed to the gateway".
//!
//! Module layout follows `bog-core`: `core` holds the types every other
//! module depends on; everything else is one concern per top-level
//! module, each generally small enough to read in one sitting.

pub mod config;
pub mod core;
pub mod engine;
pub mod logger;
pub mod orderbook;
pub mod perf;
pub mod resilience;
pub mod ring;
pub mod risk;
pub mod strategy;
pub mod telemetry;

pub use crate::core::{
    now_nanos, InvalidConfig, IoExportError, LevelUpdate, MDHeader, MDType, OrderCommand, OrderId,
    Price, Quantity, Side, Signal, SymbolId, Timestamp, TradeUpdate, PRICE_SCALE, QTY_SCALE,
};
pub use engine::{ExecutionEngine, Feeder, Gateway, TradeSink};
pub use logger::{AsyncLogger, Level as LogLevel};
pub use orderbook::L2OrderBook;
pub use resilience::KillSwitch;
pub use ring::SpscRing;
pub use risk::{RiskConfig, RiskGate};
pub use strategy::{Ewma, MeanReversion, Strategy};
pub use telemetry::{LatencyExport, LatencyHistogram};
