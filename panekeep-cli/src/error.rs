//! CLI error types and exit codes.

use panekeep_core::capture::CaptureError;
use panekeep_core::error::{ConfigError, PanekeepError};
use panekeep_core::host::HostError;
use panekeep_core::layout::RestoreError;
use panekeep_core::store::{SnapshotKind, StoreError};

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, storage, usage
    pub const GENERAL_ERROR: i32 = 1;
    /// Multiplexer failure - the host could not be queried or rejected
    /// part of a restore
    pub const HOST_FAILURE: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error reported by the core library
    #[error(transparent)]
    Core(#[from] PanekeepError),

    /// No snapshot with that name
    #[error("Snapshot not found: {kind} '{name}'")]
    SnapshotNotFound {
        /// Kind that was looked up
        kind: SnapshotKind,
        /// Name that was looked up
        name: String,
    },

    /// Arguments that do not fit together
    #[error("{0}")]
    Usage(String),

    /// Some splits were skipped or failed
    #[error("Restore incomplete: {0}")]
    Incomplete(String),

    /// Output could not be serialized
    #[error("Failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),
}

macro_rules! from_core_error {
    ($($ty:ty),* $(,)?) => {$(
        impl From<$ty> for CliError {
            fn from(err: $ty) -> Self {
                Self::Core(err.into())
            }
        }
    )*};
}

from_core_error!(ConfigError, HostError, CaptureError, StoreError, RestoreError);

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (configuration, storage, usage, output)
    /// - 2: Multiplexer failure (host unreachable, incomplete restore)
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(e) if e.is_host_failure() => exit_codes::HOST_FAILURE,
            Self::Incomplete(_) => exit_codes::HOST_FAILURE,
            Self::Core(_) | Self::SnapshotNotFound { .. } | Self::Usage(_) | Self::Output(_) => {
                exit_codes::GENERAL_ERROR
            }
        }
    }
}
