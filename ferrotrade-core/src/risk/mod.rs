//! Pre-trade risk: the stateful gate (qty cap, price-deviation band,
//! kill-switch, rate limit) and its token-bucket rate limiter.

pub mod gate;
pub mod rate_limiter;

pub use gate::{RiskConfig, RiskGate};
pub use rate_limiter::TokenBucket;
