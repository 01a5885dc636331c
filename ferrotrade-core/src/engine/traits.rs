//! Abstract feeder/gateway boundary contracts (spec §4.11, C12).
//!
//! Matches the shape of `bog-core::engine::generic::Executor` — a plain
//! trait with one or two hot-path methods, no default bodies, implemented
//! by a concrete type the engine is generic over (full monomorphization,
//! no `Box<dyn>`). The feeder side replaces the distilled spec's
//! function-pointer callback (`set_on_trade(cb)`) with the redesign spec
//! §9 calls for: a polymorphic `TradeSink` capability the feeder is
//! generic over and invokes directly, rather than storing an opaque
//! function pointer.

use crate::core::types::{OrderCommand, OrderId, SymbolId, TradeUpdate};

/// Anything that can receive trade prints off a feeder. `ExecutionEngine`
/// is the only implementation this core ships, but the trait lets a
/// feeder be written and tested (e.g. with a recording mock) without
/// depending on the concrete engine type.
pub trait TradeSink {
    fn on_trade(&mut self, trade: &TradeUpdate);
}

/// External market-data source. Out of scope for this core (spec §1) —
/// concrete feeders live in the gateway/exchange-integration layer — but
/// the engine and its tests are written against this contract so a feeder
/// can be substituted without touching engine code.
pub trait Feeder {
    /// Run until `stop` is called (or the feed ends), pushing every trade
    /// print to `sink`. Generic over the sink type so no dynamic dispatch
    /// crosses the feeder/engine boundary.
    fn run<S: TradeSink>(&mut self, sink: &mut S);

    /// Request the feeder loop in `run` to return. Checked by the feeder's
    /// own loop; there is no forced cancellation.
    fn stop(&mut self);
}

/// Outbound order gateway. Both methods must be non-blocking — spec §5
/// requires implementations to enqueue into their own outbound SPSC ring
/// and drain it on a dedicated network thread, never to block the caller
/// (the engine thread).
pub trait Gateway {
    fn send_order(&mut self, cmd: OrderCommand);
    fn cancel_order(&mut self, order_id: OrderId, symbol_id: SymbolId);
}
