//! Single-stream exponentially weighted moving average (spec §4.6, C7).
//!
//! No direct teacher analogue; implemented in the teacher's terse,
//! no-boilerplate plain-struct style (compare
//! `bog-core::risk::rate_limiter::RateLimiter`'s `new`/update-method/
//! accessor shape, minus the atomics — this type is owned by a single
//! strategy instance, never shared across threads).

use crate::core::errors::InvalidConfig;

/// Recursive filter `v <- alpha * x + (1 - alpha) * v`. The first observed
/// sample seeds `v` directly, with no decay applied (spec §3).
pub struct Ewma {
    alpha: f64,
    value: Option<f64>,
}

impl Ewma {
    /// `alpha` must be in `(0, 1]`.
    pub fn new(alpha: f64) -> Result<Self, InvalidConfig> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(InvalidConfig::EwmaAlphaOutOfRange(alpha));
        }
        Ok(Self { alpha, value: None })
    }

    /// Feed one sample. The first call sets `value` to `x` unconditionally;
    /// every subsequent call applies the recursive filter.
    #[inline]
    pub fn update(&mut self, x: f64) -> f64 {
        let next = match self.value {
            None => x,
            Some(prev) => self.alpha * x + (1.0 - self.alpha) * prev,
        };
        self.value = Some(next);
        next
    }

    /// Current estimate, or 0.0 before the first sample.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value.unwrap_or(0.0)
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }
}
