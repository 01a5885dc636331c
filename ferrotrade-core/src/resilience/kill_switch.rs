//! Global kill-switch flag (spec §4.10, C11).
//!
//! Grounded on `bog-core::resilience::kill_switch::KillSwitch`, trimmed from
//! its four-state machine (Running/Paused/ShuttingDown/EmergencyStop) down to
//! the two states the spec actually calls for: Disarmed/Armed. A single
//! `AtomicBool` behind an `Arc` handle — cloning the handle shares the flag,
//! there is no process-level `static`. The armed reason is deliberately not
//! stored here; the spec places that responsibility on the caller.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A shared, cloneable handle to one process-wide kill-switch flag.
///
/// Any thread may call [`KillSwitch::trigger`] or [`KillSwitch::reset`]; any
/// thread may call [`KillSwitch::is_armed`]. All three go through acquire or
/// release atomics — there is no lock.
#[derive(Clone)]
pub struct KillSwitch {
    armed: Arc<AtomicBool>,
}

impl KillSwitch {
    /// A fresh, disarmed kill-switch.
    pub fn new() -> Self {
        Self {
            armed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Arm the switch. `reason` is accepted for the caller's own logging; the
    /// kill-switch itself does not retain it.
    pub fn trigger(&self, reason: &str) {
        tracing::warn!(reason, "kill-switch armed");
        self.armed.store(true, Ordering::Release);
    }

    /// Disarm the switch, resuming normal trading.
    pub fn reset(&self) {
        tracing::info!("kill-switch disarmed");
        self.armed.store(false, Ordering::Release);
    }

    /// Hot-path read: true if the switch is armed (all new orders must be
    /// rejected).
    #[inline(always)]
    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }

    /// Install a `SIGTERM` handler that arms the switch. Ambient convenience
    /// for binaries (the benchmark harness, or a future production engine
    /// binary); the core library itself never installs signal handlers on
    /// its own. Grounded on `bog-core::resilience::kill_switch::install`,
    /// trimmed to the single signal this spec's scope calls for.
    #[cfg(unix)]
    pub fn install_sigterm(&self) -> Result<(), std::io::Error> {
        let flag = Arc::new(AtomicBool::new(false));
        signal_hook::flag::register(signal_hook::consts::SIGTERM, flag.clone())?;

        let switch = self.clone();
        std::thread::spawn(move || loop {
            if flag.load(Ordering::Acquire) {
                switch.trigger("SIGTERM");
                return;
            }
            std::thread::sleep(std::time::Duration::from_millis(50));
        });
        Ok(())
    }
}

impl Default for KillSwitch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disarmed() {
        let ks = KillSwitch::new();
        assert!(!ks.is_armed());
    }

    #[test]
    fn trigger_and_reset_round_trip() {
        let ks = KillSwitch::new();
        ks.trigger("test");
        assert!(ks.is_armed());
        ks.reset();
        assert!(!ks.is_armed());
    }

    #[test]
    fn shared_handle_sees_writes_from_other_clone() {
        let ks = KillSwitch::new();
        let other = ks.clone();
        other.trigger("fat-finger suspected");
        assert!(ks.is_armed());
    }

    #[test]
    fn concurrent_trigger_is_observed_across_threads() {
        use std::thread;

        let ks = KillSwitch::new();
        let writer = ks.clone();
        let handle = thread::spawn(move || writer.trigger("async halt"));
        handle.join().unwrap();
        assert!(ks.is_armed());
    }
}
