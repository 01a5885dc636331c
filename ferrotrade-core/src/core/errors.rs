//! Construction-time error taxonomy.
//!
//! Everything here is surfaced once, at construction, never on the hot
//! path. Hot-path failures (queue full/empty, risk rejection) are signalled
//! by plain `bool`/`Option` returns instead — see the module docs on
//! [`crate::ring`] and [`crate::risk`].

use thiserror::Error;

/// Fatal misconfiguration detected when building a core component.
///
/// `PartialEq` only (not `Eq`): the `f64` fields below don't implement
/// `Eq`, and construction-time config errors are compared in tests with
/// `assert_eq!`, which only needs `PartialEq`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidConfig {
    #[error("ring capacity {0} is not a power of two")]
    RingCapacityNotPowerOfTwo(usize),

    #[error("ring capacity {0} is too small (minimum is 2)")]
    RingCapacityTooSmall(usize),

    #[error("EWMA alpha {0} is out of range (0, 1]")]
    EwmaAlphaOutOfRange(f64),

    #[error("risk limit {name} must be positive, got {value}")]
    NonPositiveRiskLimit { name: &'static str, value: i64 },
}

/// Failures writing the latency JSON export or opening the audit log file.
#[derive(Debug, Error)]
pub enum IoExportError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),
}
