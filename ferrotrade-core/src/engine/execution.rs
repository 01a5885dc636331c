//! Execution engine (spec §4.9, C10): composes strategy -> risk -> gateway,
//! assigns order ids, and writes the audit trail. Grounded on
//! `bog-core::engine::generic::Engine<S, E>` — generic over `Strategy` and
//! `Gateway` type parameters per the redesign note in spec §9, so the
//! engine's hot path monomorphizes to direct calls with no virtual
//! dispatch.

use std::sync::Arc;

use crate::core::clock::now_nanos;
use crate::core::types::{OrderCommand, OrderId, TradeUpdate};
use crate::engine::traits::{Gateway, TradeSink};
use crate::logger::{AsyncLogger, Level};
use crate::risk::RiskGate;
use crate::strategy::Strategy;
use crate::telemetry::LatencyHistogram;

/// Owns one strategy and one gateway implementation (both monomorphized,
/// zero dynamic dispatch), the risk gate, the order-id counter, and a
/// shared handle to the audit logger. Not itself thread-safe: the spec is
/// explicit that this is meant to be owned by a single consumer thread,
/// the same thread that owns the feeder-side of whatever SPSC queue feeds
/// it trades.
pub struct ExecutionEngine<S: Strategy, G: Gateway> {
    strategy: S,
    gateway: G,
    risk: RiskGate,
    logger: Arc<AsyncLogger>,
    next_order_id: u64,
    latency: Option<Arc<LatencyHistogram>>,
}

impl<S: Strategy, G: Gateway> ExecutionEngine<S, G> {
    pub fn new(strategy: S, gateway: G, risk: RiskGate, logger: Arc<AsyncLogger>) -> Self {
        Self {
            strategy,
            gateway,
            risk,
            logger,
            next_order_id: 1,
            latency: None,
        }
    }

    /// Attach a latency histogram that records the `on_trade` entry-to-
    /// egress delta. Optional: the spec treats this as something a
    /// benchmark harness wires up, not a mandatory part of the engine.
    pub fn with_latency_histogram(mut self, histogram: Arc<LatencyHistogram>) -> Self {
        self.latency = Some(histogram);
        self
    }

    /// Number of order ids assigned so far (i.e. the next id minus one).
    pub fn orders_assigned(&self) -> u64 {
        self.next_order_id - 1
    }

    /// Process one trade print: strategy -> (maybe) risk -> (maybe)
    /// gateway, with an audit record written either way once an order is
    /// considered. Returns the `OrderId` assigned if a signal fired at
    /// all (whether or not risk passed it) — `None` if the strategy had
    /// nothing to do.
    pub fn on_trade(&mut self, trade: &TradeUpdate) -> Option<OrderId> {
        let start = self.latency.is_some().then(now_nanos);

        let signal = self.strategy.on_trade(trade);
        if !signal.should_trade {
            if let (Some(start), Some(hist)) = (start, &self.latency) {
                hist.record_since(start);
            }
            return None;
        }

        let order_id = OrderId(self.next_order_id);
        self.next_order_id += 1;

        let cmd = OrderCommand {
            symbol_id: signal.symbol_id,
            order_id,
            price: signal.price,
            qty: signal.qty,
            side: signal.side,
        };

        if self.risk.check_new_order(&cmd, signal.ref_price) {
            self.gateway.send_order(cmd);
            self.logger.logf(
                Level::Info,
                format_args!(
                    "ORDER_SENT id={} sym={} px={} qty={}",
                    cmd.order_id.0, cmd.symbol_id.0, cmd.price, cmd.qty
                ),
            );
        } else {
            self.logger.logf(
                Level::Warn,
                format_args!("RISK_REJECT id={} sym={}", cmd.order_id.0, cmd.symbol_id.0),
            );
        }

        if let (Some(start), Some(hist)) = (start, &self.latency) {
            hist.record_since(start);
        }

        Some(order_id)
    }
}

impl<S: Strategy, G: Gateway> TradeSink for ExecutionEngine<S, G> {
    fn on_trade(&mut self, trade: &TradeUpdate) {
        ExecutionEngine::on_trade(self, trade);
    }
}
