//! Error types for multiplexer host calls

use super::types::PaneId;

/// Errors reported by a multiplexer host.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// The host command ran but reported failure.
    #[error("host command failed: {0}")]
    CommandFailed(String),

    /// The host command could not be started.
    #[error("failed to run host command: {0}")]
    Spawn(#[from] std::io::Error),

    /// The host answered with output that could not be parsed.
    #[error("unexpected host output: {0}")]
    Parse(String),

    /// The pane does not exist (any more).
    #[error("pane not found: {0}")]
    PaneNotFound(PaneId),

    /// The host refused the operation.
    #[error("host rejected operation: {0}")]
    Rejected(String),
}

/// Result type for host calls
pub type HostResult<T> = Result<T, HostError>;
