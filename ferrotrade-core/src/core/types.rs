//! Market-data and order wire types.
//!
//! All types here are `Copy`, fixed-size, and carry no heap allocation —
//! they're passed by value through the SPSC rings and the engine's hot
//! path.

use crate::core::clock::Timestamp;
use crate::core::fixed_point::{Price, Quantity};
use std::fmt;

/// Opaque per-instrument identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct SymbolId(pub u32);

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolId({})", self.0)
    }
}

/// Order identifier assigned by [`crate::engine::ExecutionEngine`]. Strictly
/// increasing, starting at 1, never reused within a process lifetime.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct OrderId(pub u64);

impl fmt::Debug for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OrderId({})", self.0)
    }
}

/// Side of an order or trade print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Side {
    #[default]
    None = 0,
    Buy = 1,
    Sell = 2,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::None => write!(f, "NONE"),
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Market-data record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MDType {
    Trade = 0,
    Bbo = 1,
    Update = 2,
    Snapshot = 3,
}

/// Common header on every market-data record.
#[derive(Debug, Clone, Copy)]
pub struct MDHeader {
    pub exchange_ts: Timestamp,
    pub local_ts: Timestamp,
    pub symbol_id: SymbolId,
    pub kind: MDType,
}

/// A trade print.
#[derive(Debug, Clone, Copy)]
pub struct TradeUpdate {
    pub header: MDHeader,
    pub price: Price,
    pub qty: Quantity,
    pub aggressor_side: Side,
}

impl TradeUpdate {
    #[inline(always)]
    pub fn symbol_id(&self) -> SymbolId {
        self.header.symbol_id
    }
}

/// A single price-level update. `qty == 0` deletes the level.
#[derive(Debug, Clone, Copy)]
pub struct LevelUpdate {
    pub header: MDHeader,
    pub price: Price,
    pub qty: Quantity,
    pub side: Side,
}

impl LevelUpdate {
    /// `qty == 0` means "delete this price level".
    #[inline(always)]
    pub fn is_delete(&self) -> bool {
        self.qty == Quantity::ZERO
    }
}

/// Strategy output. Invariant: `should_trade` implies `side` is `Buy` or
/// `Sell` and `qty > 0`.
#[derive(Debug, Clone, Copy)]
pub struct Signal {
    pub should_trade: bool,
    pub symbol_id: SymbolId,
    pub side: Side,
    pub price: Price,
    pub qty: Quantity,
    pub ref_price: Price,
}

impl Signal {
    /// A no-op signal: `should_trade = false`, all other fields zeroed.
    pub fn none(symbol_id: SymbolId) -> Self {
        Self {
            should_trade: false,
            symbol_id,
            side: Side::None,
            price: Price::ZERO,
            qty: Quantity::ZERO,
            ref_price: Price::ZERO,
        }
    }

    /// Debug-only check of the should_trade invariant; cheap enough to call
    /// from tests but not meant for the hot path.
    pub fn is_well_formed(&self) -> bool {
        if !self.should_trade {
            return true;
        }
        matches!(self.side, Side::Buy | Side::Sell) && self.qty.ticks() > 0
    }
}

/// An order ready to be handed to the [`crate::engine::Gateway`]. Invariant:
/// `order_id` is never reused within a process lifetime.
#[derive(Debug, Clone, Copy)]
pub struct OrderCommand {
    pub symbol_id: SymbolId,
    pub order_id: OrderId,
    pub price: Price,
    pub qty: Quantity,
    pub side: Side,
}
