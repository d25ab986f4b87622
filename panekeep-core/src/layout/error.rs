//! Error types for layout reconstruction
//!
//! Activation and split failures are recovered from inside the restore loop
//! (the affected splits are skipped); only [`RestoreError`] reaches callers.

use crate::capture::CaptureError;
use crate::host::{HostError, PaneId};
use crate::store::StoreError;

/// Errors that can occur while making a pane the active one.
#[derive(Debug, thiserror::Error)]
pub enum ActivationError {
    /// There is no pane to activate.
    #[error("no pane to activate")]
    NoPane,

    /// The pane no longer exists in the host.
    #[error("pane is gone: {0}")]
    PaneGone(PaneId),

    /// The host failed while activating or confirming focus.
    #[error("activation failed: {0}")]
    Host(#[from] HostError),

    /// Focus was requested but never confirmed.
    #[error("timed out waiting for {0} to become active")]
    TimedOut(PaneId),
}

/// Errors that can occur while splitting a pane.
#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    /// The host refused or failed the split.
    #[error("split failed: {0}")]
    Host(#[from] HostError),

    /// The computed size ratio is outside (0, 1].
    #[error("invalid size ratio: {0} (must be in (0, 1])")]
    InvalidRatio(f64),
}

/// Errors that abort restoring a tab, window or workspace.
#[derive(Debug, thiserror::Error)]
pub enum RestoreError {
    /// Required input is missing (no anchor pane, no saved snapshot).
    #[error("missing dependency: {0}")]
    MissingDependency(String),

    /// The tab or window to restore into could not be created.
    #[error("failed to create tab: {0}")]
    TabCreation(String),

    /// Capturing the live layout failed.
    #[error(transparent)]
    Capture(#[from] CaptureError),

    /// Loading or saving a snapshot failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for restore operations
pub type RestoreResult<T> = Result<T, RestoreError>;
