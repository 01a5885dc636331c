//! Mean-reversion strategy (spec §4.7, C8): the one concrete [`Strategy`]
//! implementation this core ships.

use crate::core::fixed_point::Quantity;
use crate::core::types::{Signal, Side, SymbolId, TradeUpdate};
use crate::strategy::ewma::Ewma;
use crate::strategy::Strategy;

/// Fixed order size this strategy quotes at, per spec §4.7.
const FIXED_ORDER_QTY: f64 = 0.01;
const EWMA_ALPHA: f64 = 0.1;

/// Consumes trades for one target symbol, tracks an EWMA of trade price,
/// and emits at most one [`Signal`] per trade: Sell when price has run
/// `threshold` above the EWMA, Buy when it has run `threshold` below,
/// nothing otherwise. Trades for any other symbol are acknowledged with a
/// `should_trade = false` signal and otherwise ignored.
pub struct MeanReversion {
    target: SymbolId,
    threshold: f64,
    ewma: Ewma,
}

impl MeanReversion {
    pub fn new(target: SymbolId, threshold: f64) -> Self {
        Self {
            target,
            threshold,
            ewma: Ewma::new(EWMA_ALPHA).expect("EWMA_ALPHA is a fixed in-range constant"),
        }
    }

    /// Current EWMA estimate, mostly useful for diagnostics/tests.
    pub fn reference_price(&self) -> f64 {
        self.ewma.value()
    }
}

impl Strategy for MeanReversion {
    #[inline]
    fn on_trade(&mut self, trade: &TradeUpdate) -> Signal {
        if trade.symbol_id() != self.target {
            return Signal::none(trade.symbol_id());
        }

        let px = trade.price.to_float();
        let reference = self.ewma.update(px);
        let ref_price = crate::core::fixed_point::Price::from_float(reference);
        let dev = px - reference;

        if dev > self.threshold {
            Signal {
                should_trade: true,
                symbol_id: self.target,
                side: Side::Sell,
                price: trade.price,
                qty: Quantity::from_float(FIXED_ORDER_QTY),
                ref_price,
            }
        } else if dev < -self.threshold {
            Signal {
                should_trade: true,
                symbol_id: self.target,
                side: Side::Buy,
                price: trade.price,
                qty: Quantity::from_float(FIXED_ORDER_QTY),
                ref_price,
            }
        } else {
            Signal {
                should_trade: false,
                symbol_id: self.target,
                side: Side::None,
                price: trade.price,
                qty: Quantity::ZERO,
                ref_price,
            }
        }
    }
}
