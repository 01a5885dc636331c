//! Fundamental types shared across every other module: fixed-point
//! arithmetic, the monotonic clock, construction-time errors, and the
//! market-data/order wire types.

pub mod clock;
pub mod errors;
pub mod fixed_point;
pub mod types;

pub use clock::{now_nanos, Timestamp};
pub use errors::{InvalidConfig, IoExportError};
pub use fixed_point::{Price, Quantity, PRICE_SCALE, QTY_SCALE};
pub use types::{
    LevelUpdate, MDHeader, MDType, OrderCommand, OrderId, Side, Signal, SymbolId, TradeUpdate,
};
