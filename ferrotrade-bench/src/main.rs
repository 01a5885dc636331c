//! Latency benchmark harness (spec §6, external interface).
//!
//! Drives the mean-reversion strategy through a synthetic trade stream,
//! records entry-to-egress latency around `ExecutionEngine::on_trade` into
//! a [`ferrotrade_core::LatencyHistogram`], and writes a percentile/
//! histogram JSON export whose field order matches the published schema
//! exactly. Structured the way `bog-bins`'s binaries are: CLI parsing and
//! logging setup in `main`, a synthetic feed function, the engine loop.

use std::fs::File;
use std::io::Write as _;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ferrotrade_core::core::types::{MDHeader, MDType, Side, SymbolId, TradeUpdate};
use ferrotrade_core::engine::{ExecutionEngine, Gateway};
use ferrotrade_core::logger::{AsyncLogger, Level};
use ferrotrade_core::resilience::KillSwitch;
use ferrotrade_core::risk::{RiskConfig, RiskGate};
use ferrotrade_core::strategy::MeanReversion;
use ferrotrade_core::{LatencyHistogram, OrderCommand, OrderId, Price, Quantity, Timestamp};

const TARGET_SYMBOL: u32 = 1;
const BASE_PRICE: f64 = 100.0;

/// Benchmark harness for the hot-path trade-to-order latency of
/// [`ExecutionEngine::on_trade`].
#[derive(Parser, Debug)]
#[command(author, version, about = "ferrotrade-core latency benchmark harness")]
struct Args {
    /// Number of measured iterations.
    #[arg(long, default_value_t = 100_000)]
    iterations: u64,

    /// Number of unmeasured warmup iterations run before sampling begins.
    #[arg(long, default_value_t = 1_000)]
    warmup: u64,

    /// Output path for the latency JSON export.
    #[arg(long, default_value = "latency.json")]
    output: String,

    /// CPU core to pin this process to before running (reduces scheduler
    /// jitter in the measured loop). Unpinned by default.
    #[arg(short = 'c', long)]
    cpu_core: Option<usize>,
}

/// Gateway that does nothing but count — the benchmark has no real
/// network thread to drain an outbound ring, but `send_order` still must
/// be non-blocking per spec §5, which a plain counter trivially satisfies.
struct NullGateway {
    sent: u64,
    cancelled: u64,
}

impl NullGateway {
    fn new() -> Self {
        Self { sent: 0, cancelled: 0 }
    }
}

impl Gateway for NullGateway {
    fn send_order(&mut self, _cmd: OrderCommand) {
        self.sent += 1;
    }

    fn cancel_order(&mut self, _order_id: OrderId, _symbol_id: SymbolId) {
        self.cancelled += 1;
    }
}

/// Deterministic synthetic trade generator: a price that oscillates around
/// [`BASE_PRICE`] so the mean-reversion strategy actually fires on a
/// meaningful fraction of iterations instead of sitting inside its
/// threshold band forever.
fn synthetic_trade(i: u64) -> TradeUpdate {
    let wobble = ((i % 200) as f64 - 100.0) / 100.0; // in [-1.0, 1.0)
    let price = BASE_PRICE + wobble;
    TradeUpdate {
        header: MDHeader {
            exchange_ts: Timestamp::from_nanos(0),
            local_ts: Timestamp::now(),
            symbol_id: SymbolId(TARGET_SYMBOL),
            kind: MDType::Trade,
        },
        price: Price::from_float(price),
        qty: Quantity::from_float(1.0),
        aggressor_side: Side::Buy,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    if let Some(core) = args.cpu_core {
        if let Err(err) = ferrotrade_core::perf::cpu::pin_to_core(core) {
            tracing::warn!(%err, core, "failed to pin to CPU core, continuing unpinned");
        }
    }

    let kill_switch = KillSwitch::new();
    #[cfg(unix)]
    if let Err(err) = kill_switch.install_sigterm() {
        tracing::warn!(%err, "failed to install SIGTERM handler, continuing without it");
    }

    let ctrlc_kill_switch = kill_switch.clone();
    ctrlc::set_handler(move || {
        tracing::warn!("received Ctrl+C, arming kill-switch for graceful shutdown");
        ctrlc_kill_switch.trigger("Ctrl+C");
    })
    .context("failed to install Ctrl+C handler")?;

    let risk_config = RiskConfig::new(
        Quantity::from_float(1.0),
        Price::from_float(50.0),
        u32::try_from(args.iterations.max(1)).unwrap_or(u32::MAX),
    )
    .context("invalid risk configuration")?;
    let risk = RiskGate::new(risk_config, kill_switch).context("failed to build risk gate")?;

    let strategy = MeanReversion::new(SymbolId(TARGET_SYMBOL), 0.5);
    let gateway = NullGateway::new();
    let logger = Arc::new(AsyncLogger::init("ferrotrade-bench-audit.log").context("failed to open audit log")?);
    let histogram = Arc::new(LatencyHistogram::new());

    let mut engine = ExecutionEngine::new(strategy, gateway, risk, logger.clone())
        .with_latency_histogram(histogram.clone());

    tracing::info!(
        iterations = args.iterations,
        warmup = args.warmup,
        "starting benchmark"
    );

    for i in 0..args.warmup {
        engine.on_trade(&synthetic_trade(i));
    }

    for i in 0..args.iterations {
        engine.on_trade(&synthetic_trade(args.warmup + i));
    }

    logger.logf(
        Level::Info,
        format_args!(
            "benchmark complete: {} iterations, {} orders assigned",
            args.iterations,
            engine.orders_assigned()
        ),
    );

    let export = histogram.export();
    write_json(&args.output, &export).context("failed to write latency JSON export")?;

    tracing::info!(
        count = export.count,
        p50_ns = export.p50_ns,
        p99_ns = export.p99_ns,
        output = %args.output,
        "benchmark finished"
    );

    Ok(())
}

fn write_json(path: &str, export: &ferrotrade_core::LatencyExport) -> Result<()> {
    let json = serde_json::to_string_pretty(export)?;
    let mut file = File::create(path).with_context(|| format!("failed to create {path}"))?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}
