//! Scaled-integer price/quantity arithmetic.
//!
//! `Price` and `Quantity` are signed counts of ticks (1 / [`PRICE_SCALE`])
//! and base units (1 / [`QTY_SCALE`]) respectively. Conversion to and from
//! `f64` is the only place floating point enters the hot path, and it's
//! confined to construction/display, never to the arithmetic itself:
//! addition and subtraction are plain `i64` operations, no multiplication or
//! division between `Price` and `Quantity` is exposed here. Monetary
//! products (price * qty) belong at the call site, in `f64`, off the hot
//! path.

use std::fmt;
use std::ops::{Add, Sub};

/// Ticks per unit of `Price`.
pub const PRICE_SCALE: i64 = 100_000_000;
/// Base units per unit of `Quantity`.
pub const QTY_SCALE: i64 = 100_000_000;

macro_rules! fixed_point_type {
    ($name:ident, $scale:expr, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[repr(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Construct directly from a raw tick count. No validation: the
            /// caller is expected to keep values within ±9.22e10 (i64 range
            /// divided by the scale), per the domain's overflow contract.
            #[inline(always)]
            pub const fn from_ticks(ticks: i64) -> Self {
                Self(ticks)
            }

            /// Raw tick count.
            #[inline(always)]
            pub const fn ticks(self) -> i64 {
                self.0
            }

            /// Construct by rounding a float half-away-from-zero. `f64::round`
            /// already rounds half-away-from-zero, which is exactly what the
            /// domain model calls for, so no custom rounding routine is needed.
            /// NaN and infinite input map to zero ticks rather than panicking
            /// or propagating a `NaN` tick count downstream.
            #[inline]
            pub fn from_float(value: f64) -> Self {
                if !value.is_finite() {
                    return Self(0);
                }
                Self((value * $scale as f64).round() as i64)
            }

            /// Lossy conversion back to float.
            #[inline(always)]
            pub fn to_float(self) -> f64 {
                self.0 as f64 / $scale as f64
            }

            pub const ZERO: Self = Self(0);
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.to_float())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:.8}", self.to_float())
            }
        }

        impl Add for $name {
            type Output = Self;
            #[inline(always)]
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $name {
            type Output = Self;
            #[inline(always)]
            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }
    };
}

fixed_point_type!(Price, PRICE_SCALE, "A price expressed as a signed count of ticks.");
fixed_point_type!(Quantity, QTY_SCALE, "A quantity expressed as a signed count of base units.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_float_round_trip_is_within_one_tick() {
        for p in [0.0, 1.0, -1.0, 100.5, -99.99, 50_000.123_456_78] {
            let price = Price::from_float(p);
            let back = price.to_float();
            approx::assert_abs_diff_eq!(back, p, epsilon = 1.0 / PRICE_SCALE as f64 + 1e-12);
        }
    }

    #[test]
    fn from_float_rounds_half_away_from_zero() {
        // 0.5 ticks at this scale is far below representable granularity;
        // use a value that lands exactly on a half-tick boundary instead.
        let half_tick = 0.5 / PRICE_SCALE as f64;
        assert_eq!(Price::from_float(half_tick).ticks(), 1);
        assert_eq!(Price::from_float(-half_tick).ticks(), -1);
    }

    #[test]
    fn non_finite_input_maps_to_zero() {
        assert_eq!(Price::from_float(f64::NAN).ticks(), 0);
        assert_eq!(Price::from_float(f64::INFINITY).ticks(), 0);
        assert_eq!(Price::from_float(f64::NEG_INFINITY).ticks(), 0);
    }

    #[test]
    fn equality_is_tick_equality() {
        let a = Price::from_float(100.0);
        let b = Price::from_ticks(100 * PRICE_SCALE);
        assert_eq!(a, b);
    }

    #[test]
    fn ordering_and_arithmetic() {
        let a = Price::from_ticks(100);
        let b = Price::from_ticks(150);
        assert!(a < b);
        assert_eq!(a + b, Price::from_ticks(250));
        assert_eq!(b - a, Price::from_ticks(50));
    }

    #[test]
    fn prop_round_trip_within_one_tick() {
        use proptest::prelude::*;
        proptest!(|(p in -1.0e9f64..1.0e9f64)| {
            let price = Price::from_float(p);
            let back = price.to_float();
            prop_assert!((back - p).abs() <= 1.0 / PRICE_SCALE as f64 + 1e-9);
        });
    }
}
