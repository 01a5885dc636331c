//! Ambient performance tuning helpers: CPU pinning for the threads this
//! core's callers spawn (feeder, engine, logger, gateway-egress). Not part
//! of the hot path itself.

pub mod cpu;
