//! Lock-free latency histogram with a bounded raw-sample reservoir.
//!
//! Grounded on the bucketed histogram in
//! `cooprefr-bettersys/rust-backend/src/performance/latency/histogram.rs`,
//! but reworked from a `parking_lot::Mutex<HistogramInner>` into plain
//! atomics: every field this type owns (bucket counts, running count/sum,
//! min/max, and the reservoir write cursor) is written from whichever thread
//! calls [`LatencyHistogram::record`], so a lock would serialize exactly the
//! path this exists to measure.

use serde::Serialize;
use std::sync::atomic::{AtomicI64, AtomicU64, AtomicUsize, Ordering};

use crate::core::clock::now_nanos;

/// Bucket upper bounds in nanoseconds, exclusive. The last bucket is
/// effectively `+inf`.
const BUCKET_BOUNDS_NS: [i64; 7] = [100, 500, 1_000, 10_000, 100_000, 1_000_000, i64::MAX];
const BUCKET_LABELS: [&str; 7] = ["<100ns", "<500ns", "<1us", "<10us", "<100us", "<1ms", ">=1ms"];

/// Default reservoir capacity.
pub const DEFAULT_RESERVOIR_CAPACITY: usize = 100_000;

/// Maximum number of raw samples included in a JSON export.
const MAX_EXPORTED_SAMPLES: usize = 1000;

struct Buckets([AtomicU64; 7]);

impl Buckets {
    fn new() -> Self {
        Self(Default::default())
    }
}

/// Lock-free counting histogram over a fixed nanosecond bucketing, backed by
/// a capped circular store of raw samples for percentile queries.
pub struct LatencyHistogram {
    count: AtomicU64,
    sum_ns: AtomicI64,
    min_ns: AtomicI64,
    max_ns: AtomicI64,
    buckets: Buckets,
    samples: Box<[AtomicI64]>,
    write_idx: AtomicUsize,
}

impl LatencyHistogram {
    /// Build a histogram with the default reservoir capacity
    /// ([`DEFAULT_RESERVOIR_CAPACITY`]).
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_RESERVOIR_CAPACITY)
    }

    /// Build a histogram with an explicit reservoir capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut samples = Vec::with_capacity(capacity);
        samples.resize_with(capacity, || AtomicI64::new(0));
        Self {
            count: AtomicU64::new(0),
            sum_ns: AtomicI64::new(0),
            min_ns: AtomicI64::new(i64::MAX),
            max_ns: AtomicI64::new(i64::MIN),
            buckets: Buckets::new(),
            samples: samples.into_boxed_slice(),
            write_idx: AtomicUsize::new(0),
        }
    }

    /// Record one latency sample, in nanoseconds. Negative values (possible
    /// because `now_nanos` is only guaranteed monotonic within a process, see
    /// [`crate::core::clock`]) are clamped into bucket 0 but still counted
    /// and stored verbatim in the reservoir.
    #[inline]
    pub fn record(&self, latency_ns: i64) {
        self.count.fetch_add(1, Ordering::Relaxed);
        self.sum_ns.fetch_add(latency_ns, Ordering::Relaxed);

        cas_min(&self.min_ns, latency_ns);
        cas_max(&self.max_ns, latency_ns);

        let clamped = latency_ns.max(0);
        let bucket_idx = BUCKET_BOUNDS_NS
            .iter()
            .position(|&bound| clamped < bound)
            .unwrap_or(BUCKET_BOUNDS_NS.len() - 1);
        self.buckets.0[bucket_idx].fetch_add(1, Ordering::Relaxed);

        let idx = self.write_idx.fetch_add(1, Ordering::Relaxed) % self.samples.len();
        self.samples[idx].store(latency_ns, Ordering::Relaxed);
    }

    /// Record the elapsed time since `start_ns` (as returned by
    /// [`now_nanos`]).
    #[inline]
    pub fn record_since(&self, start_ns: i64) {
        self.record(now_nanos() - start_ns);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn min(&self) -> i64 {
        if self.count() == 0 {
            0
        } else {
            self.min_ns.load(Ordering::Relaxed)
        }
    }

    pub fn max(&self) -> i64 {
        if self.count() == 0 {
            0
        } else {
            self.max_ns.load(Ordering::Relaxed)
        }
    }

    pub fn mean(&self) -> f64 {
        let count = self.count();
        if count == 0 {
            0.0
        } else {
            self.sum_ns.load(Ordering::Relaxed) as f64 / count as f64
        }
    }

    /// Copy out the live sample set: `min(count, capacity)` raw samples in
    /// write order (not chronological order once the reservoir has
    /// wrapped — the same caveat the JSON export inherits).
    fn live_samples(&self) -> Vec<i64> {
        let n = (self.count() as usize).min(self.samples.len());
        self.samples[..n]
            .iter()
            .map(|s| s.load(Ordering::Relaxed))
            .collect()
    }

    /// Percentile query, `p` in `[0, 100]`. Not hot-path: sorts a copy of the
    /// live reservoir. Returns 0 if empty.
    pub fn percentile(&self, p: f64) -> f64 {
        let mut samples = self.live_samples();
        if samples.is_empty() {
            return 0.0;
        }
        samples.sort_unstable();
        percentile_of_sorted(&samples, p)
    }

    /// Snapshot all reported statistics into a serializable export matching
    /// the fixed JSON field order.
    pub fn export(&self) -> LatencyExport {
        let mut samples = self.live_samples();
        samples.sort_unstable();

        let mut histogram = Vec::with_capacity(BUCKET_LABELS.len());
        for (label, bucket) in BUCKET_LABELS.iter().zip(self.buckets.0.iter()) {
            histogram.push((*label, bucket.load(Ordering::Relaxed) as i64));
        }

        let exported_samples: Vec<i64> = self
            .live_samples()
            .into_iter()
            .take(MAX_EXPORTED_SAMPLES)
            .collect();

        LatencyExport {
            count: self.count() as i64,
            min_ns: self.min(),
            max_ns: self.max(),
            mean_ns: self.mean(),
            p50_ns: percentile_of_sorted(&samples, 50.0),
            p95_ns: percentile_of_sorted(&samples, 95.0),
            p99_ns: percentile_of_sorted(&samples, 99.0),
            p999_ns: percentile_of_sorted(&samples, 99.9),
            histogram: HistogramCounts::from_pairs(histogram),
            samples: exported_samples,
        }
    }
}

impl Default for LatencyHistogram {
    fn default() -> Self {
        Self::new()
    }
}

fn cas_min(slot: &AtomicI64, value: i64) {
    let mut current = slot.load(Ordering::Relaxed);
    while value < current {
        match slot.compare_exchange_weak(current, value, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => break,
            Err(observed) => current = observed,
        }
    }
}

fn cas_max(slot: &AtomicI64, value: i64) {
    let mut current = slot.load(Ordering::Relaxed);
    while value > current {
        match slot.compare_exchange_weak(current, value, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => break,
            Err(observed) => current = observed,
        }
    }
}

/// Linear interpolation at index `p/100 * (n-1)` within a pre-sorted slice.
/// Returns 0 for an empty slice.
fn percentile_of_sorted(sorted: &[i64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n == 1 {
        return sorted[0] as f64;
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo] as f64;
    }

    let frac = rank - lo as f64;
    let lo_v = sorted[lo] as f64;
    let hi_v = sorted[hi] as f64;
    lo_v + (hi_v - lo_v) * frac
}

/// Per-bucket counts, serialized with the exact label set the spec's JSON
/// export schema requires.
#[derive(Debug, Clone, Serialize)]
pub struct HistogramCounts {
    #[serde(rename = "<100ns")]
    pub lt_100ns: i64,
    #[serde(rename = "<500ns")]
    pub lt_500ns: i64,
    #[serde(rename = "<1us")]
    pub lt_1us: i64,
    #[serde(rename = "<10us")]
    pub lt_10us: i64,
    #[serde(rename = "<100us")]
    pub lt_100us: i64,
    #[serde(rename = "<1ms")]
    pub lt_1ms: i64,
    #[serde(rename = ">=1ms")]
    pub gte_1ms: i64,
}

impl HistogramCounts {
    fn from_pairs(pairs: Vec<(&'static str, i64)>) -> Self {
        let get = |label: &str| pairs.iter().find(|(l, _)| *l == label).map(|(_, v)| *v).unwrap_or(0);
        Self {
            lt_100ns: get("<100ns"),
            lt_500ns: get("<500ns"),
            lt_1us: get("<1us"),
            lt_10us: get("<10us"),
            lt_100us: get("<100us"),
            lt_1ms: get("<1ms"),
            gte_1ms: get(">=1ms"),
        }
    }
}

/// JSON export shape, field order fixed to match the published schema.
#[derive(Debug, Clone, Serialize)]
pub struct LatencyExport {
    pub count: i64,
    pub min_ns: i64,
    pub max_ns: i64,
    pub mean_ns: f64,
    pub p50_ns: f64,
    pub p95_ns: f64,
    pub p99_ns: f64,
    pub p999_ns: f64,
    pub histogram: HistogramCounts,
    pub samples: Vec<i64>,
}
