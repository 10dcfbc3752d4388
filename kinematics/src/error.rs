use thiserror::Error;

pub type Result<T> = std::result::Result<T, KinematicsError>;

/// Failures of the kinematic core. Each variant carries the values needed to
/// diagnose it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KinematicsError {
    /// The shoulder/elbow/wrist triangle does not close.
    #[error("pose unreachable: no triangle with sides l1={l1}, l2={l2}, r={r}")]
    UnreachablePose { l1: f64, l2: f64, r: f64 },

    #[error("{what}: expected {expected} values, got {actual}")]
    InvalidDimension {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid sampling range: {reason}")]
    InvalidRange { reason: String },

    #[error("link {index} has invalid length {value} (must be positive and finite)")]
    InvalidLinkLength { index: usize, value: f64 },
}
