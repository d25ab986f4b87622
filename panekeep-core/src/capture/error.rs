//! Error types for layout capture

use crate::host::HostError;

/// Errors that can occur while capturing a live layout.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// The host could not enumerate its panes.
    #[error("failed to list panes: {0}")]
    Host(#[from] HostError),

    /// The requested tab, window or workspace does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Result type for capture operations
pub type CaptureResult<T> = Result<T, CaptureError>;
