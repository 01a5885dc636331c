//! Execution Engine Benchmarks
//!
//! The critical benchmark here is `tick_to_trade_pipeline`: the full
//! strategy -> risk -> gateway path exercised by [`ExecutionEngine::on_trade`],
//! which is what `ferrotrade-bench`'s CLI harness reports percentiles for
//! against a live process. These benchmarks instead give criterion's own
//! statistical treatment over a single in-process run.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ferrotrade_core::core::clock::Timestamp;
use ferrotrade_core::core::fixed_point::{Price, Quantity};
use ferrotrade_core::core::types::{MDHeader, MDType, OrderCommand, OrderId, Side, SymbolId, TradeUpdate};
use ferrotrade_core::engine::{ExecutionEngine, Gateway};
use ferrotrade_core::logger::AsyncLogger;
use ferrotrade_core::resilience::KillSwitch;
use ferrotrade_core::risk::{RiskConfig, RiskGate};
use ferrotrade_core::strategy::MeanReversion;

struct CountingGateway {
    sent: u64,
}

impl Gateway for CountingGateway {
    fn send_order(&mut self, _cmd: OrderCommand) {
        self.sent += 1;
    }

    fn cancel_order(&mut self, _order_id: OrderId, _symbol_id: SymbolId) {}
}

fn trade(price: f64) -> TradeUpdate {
    TradeUpdate {
        header: MDHeader {
            exchange_ts: Timestamp::from_nanos(0),
            local_ts: Timestamp::from_nanos(0),
            symbol_id: SymbolId(1),
            kind: MDType::Trade,
        },
        price: Price::from_float(price),
        qty: Quantity::from_float(1.0),
        aggressor_side: Side::Buy,
    }
}

fn build_engine(log_path: &std::path::Path) -> ExecutionEngine<MeanReversion, CountingGateway> {
    let strategy = MeanReversion::new(SymbolId(1), 0.5);
    let gateway = CountingGateway { sent: 0 };
    let risk_config = RiskConfig::new(Quantity::from_float(1.0), Price::from_float(50.0), 1_000_000).unwrap();
    let risk = RiskGate::new(risk_config, KillSwitch::new()).unwrap();
    let logger = Arc::new(AsyncLogger::init(log_path).unwrap());
    ExecutionEngine::new(strategy, gateway, risk, logger)
}

fn tick_to_trade_pipeline_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/tick_to_trade_pipeline");
    group.significance_level(0.01).sample_size(10000);

    let dir = tempfile::tempdir().unwrap();
    let mut engine = build_engine(&dir.path().join("audit.log"));

    group.bench_function("on_trade", |b| {
        let mut tick = 0u64;
        b.iter(|| {
            let wobble = ((tick % 200) as f64 - 100.0) / 100.0;
            tick += 1;
            black_box(engine.on_trade(black_box(&trade(100.0 + wobble))));
        });
    });

    group.finish();
}

fn no_signal_path_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/no_signal_path");
    group.significance_level(0.01).sample_size(10000);

    let dir = tempfile::tempdir().unwrap();
    let mut engine = build_engine(&dir.path().join("audit.log"));
    // Prime the EWMA so every subsequent identical trade stays inside the
    // threshold band and the strategy never fires.
    engine.on_trade(&trade(100.0));

    group.bench_function("flat_price", |b| {
        b.iter(|| {
            black_box(engine.on_trade(black_box(&trade(100.0))));
        });
    });

    group.finish();
}

criterion_group!(benches, tick_to_trade_pipeline_bench, no_signal_path_bench);
criterion_main!(benches);
