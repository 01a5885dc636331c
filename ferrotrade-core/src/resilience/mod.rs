//! Process-wide safety primitives read from the hot path.

pub mod kill_switch;

pub use kill_switch::KillSwitch;
