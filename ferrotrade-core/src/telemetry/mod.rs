//! Hot-path latency telemetry: a lock-free histogram with a bounded raw
//! sample reservoir (spec §4.3). This is distinct from [`crate::logger`],
//! which is the engine's domain audit trail, not a timing probe.

pub mod histogram;

pub use histogram::{HistogramCounts, LatencyExport, LatencyHistogram, DEFAULT_RESERVOIR_CAPACITY};
