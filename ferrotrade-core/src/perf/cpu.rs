//! CPU affinity for dedicated-core threads (spec §5: "multiple OS threads
//! pinned to dedicated CPU cores"). Grounded on
//! `bog-core::perf::cpu::pin_to_core`, same crate (`core_affinity`) and
//! call pattern.

use anyhow::{bail, Result};
use core_affinity::CoreId;

/// Pin the calling thread to `core`. Prevents the OS scheduler from
/// migrating it between cores, which would otherwise evict caches and
/// introduce latency jitter on the hot path.
pub fn pin_to_core(core: usize) -> Result<()> {
    if core_affinity::set_for_current(CoreId { id: core }) {
        tracing::info!(core, "pinned thread to CPU core");
        Ok(())
    } else {
        bail!("failed to pin thread to core {core}")
    }
}

/// Number of CPU cores the OS reports as available.
pub fn num_cores() -> usize {
    core_affinity::get_core_ids().map(|ids| ids.len()).unwrap_or(1)
}
