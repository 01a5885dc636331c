//! Per-symbol L2 order book (spec §4.5, C6).
//!
//! The teacher's own `orderbook::l2_book::L2OrderBook` is a fixed-depth
//! array synced wholesale from an external market-data snapshot struct,
//! which doesn't fit this spec's model of incremental per-level
//! [`crate::core::LevelUpdate`] application. The ordered-map shape here
//! (keyed by [`Price`] so max/min gives BBO in `O(log L)`) follows the
//! general structure of a level book as implemented in the pack's dedicated
//! order-book crate (`joaquinbejar-OrderBook-rs`, which also tracks best
//! bid/ask via ordered maps), trimmed down to the much smaller surface this
//! spec names: `apply_update`, `get_bbo`, `get_snapshot`, no matching
//! engine, no concurrency (the book is owned by a single engine thread).

use std::collections::BTreeMap;

use crate::core::clock::Timestamp;
use crate::core::fixed_point::{Price, Quantity};
use crate::core::types::{LevelUpdate, Side};

/// A single price/quantity level as returned by [`L2OrderBook::get_snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    pub price: Price,
    pub qty: Quantity,
}

/// Per-symbol L2 book: two ordered maps from price to resting quantity,
/// one per side. Owned by a single thread; no internal synchronization.
pub struct L2OrderBook {
    bids: BTreeMap<Price, Quantity>,
    asks: BTreeMap<Price, Quantity>,
    last_update_ts: Timestamp,
}

impl L2OrderBook {
    pub fn new() -> Self {
        Self {
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            last_update_ts: Timestamp::from_nanos(0),
        }
    }

    /// Apply one incremental level update. `qty == 0` deletes the level;
    /// any other quantity inserts or overwrites it. `O(log L)` in the
    /// number of resting levels on that side.
    pub fn apply_update(&mut self, update: &LevelUpdate) {
        let side = match update.side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
            Side::None => return,
        };

        if update.is_delete() {
            side.remove(&update.price);
        } else {
            side.insert(update.price, update.qty);
        }
        self.last_update_ts = update.header.local_ts;
    }

    /// Best bid / best ask, if both sides are non-empty. No crossing filter
    /// is applied — `best_bid >= best_ask` is possible and is passed
    /// through verbatim, per spec §3.
    pub fn get_bbo(&self) -> Option<(Price, Quantity, Price, Quantity)> {
        let (&bid_px, &bid_qty) = self.bids.iter().next_back()?;
        let (&ask_px, &ask_qty) = self.asks.iter().next()?;
        Some((bid_px, bid_qty, ask_px, ask_qty))
    }

    /// Copy up to `n` levels per side into `bids_out`/`asks_out`: bids in
    /// descending price order, asks ascending. Both outputs are cleared
    /// first. Returns the number of ask levels filled — the spec leaves
    /// "number of levels filled" ambiguous between bid/ask/total; this
    /// implementation picks ask-levels-filled, per SPEC_FULL's resolution
    /// of that open question.
    pub fn get_snapshot(&self, bids_out: &mut Vec<Level>, asks_out: &mut Vec<Level>, n: usize) -> usize {
        bids_out.clear();
        asks_out.clear();

        bids_out.extend(
            self.bids
                .iter()
                .rev()
                .take(n)
                .map(|(&price, &qty)| Level { price, qty }),
        );
        asks_out.extend(
            self.asks
                .iter()
                .take(n)
                .map(|(&price, &qty)| Level { price, qty }),
        );

        asks_out.len()
    }

    /// Quantity resting at `price` on `side`, or `None` if that level is
    /// empty. Mostly useful for tests and diagnostics.
    pub fn qty_at(&self, side: Side, price: Price) -> Option<Quantity> {
        match side {
            Side::Buy => self.bids.get(&price).copied(),
            Side::Sell => self.asks.get(&price).copied(),
            Side::None => None,
        }
    }

    pub fn last_update_ts(&self) -> Timestamp {
        self.last_update_ts
    }

    pub fn bid_levels(&self) -> usize {
        self.bids.len()
    }

    pub fn ask_levels(&self) -> usize {
        self.asks.len()
    }
}

impl Default for L2OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{MDHeader, MDType, SymbolId};

    fn update(side: Side, price: f64, qty: f64) -> LevelUpdate {
        LevelUpdate {
            header: MDHeader {
                exchange_ts: Timestamp::from_nanos(0),
                local_ts: Timestamp::from_nanos(1),
                symbol_id: SymbolId(1),
                kind: MDType::Update,
            },
            price: Price::from_float(price),
            qty: Quantity::from_float(qty),
            side,
        }
    }

    /// S1 from spec §8: book lifecycle scenario.
    #[test]
    fn book_lifecycle_scenario_s1() {
        let mut book = L2OrderBook::new();
        book.apply_update(&update(Side::Buy, 100.00, 5.0));
        book.apply_update(&update(Side::Buy, 101.00, 2.0));
        book.apply_update(&update(Side::Sell, 102.00, 1.0));
        book.apply_update(&update(Side::Buy, 100.00, 0.0));

        let (bid_px, _, ask_px, _) = book.get_bbo().unwrap();
        assert_eq!(bid_px, Price::from_float(101.00));
        assert_eq!(ask_px, Price::from_float(102.00));

        let mut bids = Vec::new();
        let mut asks = Vec::new();
        let n_asks = book.get_snapshot(&mut bids, &mut asks, 10);
        assert_eq!(n_asks, 1);
        assert_eq!(bids, vec![Level { price: Price::from_float(101.00), qty: Quantity::from_float(2.0) }]);
        assert_eq!(asks, vec![Level { price: Price::from_float(102.00), qty: Quantity::from_float(1.0) }]);
    }

    #[test]
    fn delete_of_absent_level_is_a_no_op() {
        let mut book = L2OrderBook::new();
        book.apply_update(&update(Side::Buy, 50.0, 0.0));
        assert_eq!(book.bid_levels(), 0);
    }

    #[test]
    fn reapplying_a_delete_is_idempotent() {
        let mut book = L2OrderBook::new();
        book.apply_update(&update(Side::Buy, 50.0, 3.0));
        book.apply_update(&update(Side::Buy, 50.0, 0.0));
        let after_first = book.bid_levels();
        book.apply_update(&update(Side::Buy, 50.0, 0.0));
        assert_eq!(book.bid_levels(), after_first);
        assert_eq!(book.qty_at(Side::Buy, Price::from_float(50.0)), None);
    }

    #[test]
    fn bbo_is_none_when_a_side_is_empty() {
        let mut book = L2OrderBook::new();
        book.apply_update(&update(Side::Buy, 100.0, 1.0));
        assert!(book.get_bbo().is_none());
    }

    #[test]
    fn snapshot_respects_requested_depth() {
        let mut book = L2OrderBook::new();
        for i in 0..20 {
            book.apply_update(&update(Side::Buy, 100.0 - i as f64, 1.0));
            book.apply_update(&update(Side::Sell, 200.0 + i as f64, 1.0));
        }
        let mut bids = Vec::new();
        let mut asks = Vec::new();
        let n_asks = book.get_snapshot(&mut bids, &mut asks, 5);
        assert_eq!(bids.len(), 5);
        assert_eq!(asks.len(), 5);
        assert_eq!(n_asks, 5);
        // bids descending, asks ascending
        assert!(bids.windows(2).all(|w| w[0].price > w[1].price));
        assert!(asks.windows(2).all(|w| w[0].price < w[1].price));
    }

    #[test]
    fn update_qty_non_zero_is_insert_or_overwrite() {
        let mut book = L2OrderBook::new();
        book.apply_update(&update(Side::Sell, 10.0, 1.0));
        book.apply_update(&update(Side::Sell, 10.0, 7.0));
        assert_eq!(book.qty_at(Side::Sell, Price::from_float(10.0)), Some(Quantity::from_float(7.0)));
    }
}
