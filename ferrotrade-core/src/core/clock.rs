//! Monotonic nanosecond clock.
//!
//! Backed by [`quanta`], which calibrates a cheap monotonic counter (TSC on
//! x86-64) against the OS clock once at startup and then reads it without a
//! syscall — the same crate the pack's own latency probe
//! (`cooprefr-bettersys/infra/latency-sweep/probe`) uses for sub-microsecond
//! timestamping. `quanta::Instant::now()` is monotonic within a process,
//! which is the only guarantee the hot path needs; it is *not* guaranteed
//! monotonic across processes or machines, which is why
//! [`crate::telemetry::LatencyHistogram::record`] clamps negative deltas
//! into the first bucket instead of assuming they can't happen.

use std::fmt;
use std::ops::Sub;
use std::sync::OnceLock;

static EPOCH: OnceLock<quanta::Instant> = OnceLock::new();

fn epoch() -> quanta::Instant {
    *EPOCH.get_or_init(quanta::Instant::now)
}

/// Nanoseconds since an unspecified monotonic epoch (first call to
/// [`Timestamp::now`] in this process).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
    #[inline(always)]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    #[inline(always)]
    pub const fn nanos(self) -> i64 {
        self.0
    }

    /// Sample the monotonic clock now.
    #[inline]
    pub fn now() -> Self {
        let elapsed = quanta::Instant::now().duration_since(epoch());
        Self(elapsed.as_nanos() as i64)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({}ns)", self.0)
    }
}

impl Sub for Timestamp {
    type Output = i64;
    #[inline(always)]
    fn sub(self, rhs: Self) -> i64 {
        self.0 - rhs.0
    }
}

/// Free function form, used on the hot path where a bare `i64` is wanted
/// without going through the `Timestamp` newtype (e.g. histogram deltas).
#[inline]
pub fn now_nanos() -> i64 {
    Timestamp::now().nanos()
}
