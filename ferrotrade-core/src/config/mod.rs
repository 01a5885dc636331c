//! Construction-time configuration validation (ambient; not named as a
//! distinct component in spec.md, which instead names the parameters each
//! component validates — ring capacity, EWMA alpha, risk limits). Grounded
//! on `bog-core::config` existing as its own module even though, there
//! too, most of the actual validation lives next to the type it
//! constructs. [`RingConfig`] exists so a caller (the benchmark harness,
//! a future feeder/gateway binary) can validate a requested ring capacity
//! before spending a construction call on it; [`crate::risk::RiskConfig`]
//! and [`crate::ring::SpscRing::new`] remain the authoritative validators.

use crate::core::errors::InvalidConfig;

/// Requested capacity for one of the crate's SPSC rings (market-data
/// ingest, audit log, outbound gateway). Must be a power of two and at
/// least 2, per [`crate::ring::SpscRing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingConfig {
    pub capacity: usize,
}

impl RingConfig {
    pub fn new(capacity: usize) -> Result<Self, InvalidConfig> {
        let config = Self { capacity };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if self.capacity < 2 {
            return Err(InvalidConfig::RingCapacityTooSmall(self.capacity));
        }
        if !self.capacity.is_power_of_two() {
            return Err(InvalidConfig::RingCapacityNotPowerOfTwo(self.capacity));
        }
        Ok(())
    }
}
