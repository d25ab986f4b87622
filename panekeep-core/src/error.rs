//! Crate-level error types
//!
//! Each module reports its own error enum; [`PanekeepError`] gathers them
//! for callers that drive several stages in a row.

use std::path::PathBuf;

use thiserror::Error;

use crate::capture::CaptureError;
use crate::host::HostError;
use crate::layout::RestoreError;
use crate::store::StoreError;
use crate::tracing::TracingError;

/// Errors that can occur while loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the configuration file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for the settings schema
    #[error("Failed to parse {path}: {source}")]
    Parse {
        /// File that failed to parse
        path: PathBuf,
        /// Underlying error
        source: toml::de::Error,
    },

    /// The settings could not be serialized
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// No configuration or data directory could be determined
    #[error("Cannot determine the {0} directory")]
    NoConfigDir(&'static str),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Any error panekeep can report
#[derive(Debug, Error)]
pub enum PanekeepError {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Multiplexer error
    #[error(transparent)]
    Host(#[from] HostError),

    /// Capture error
    #[error(transparent)]
    Capture(#[from] CaptureError),

    /// Snapshot store error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Restore error
    #[error(transparent)]
    Restore(#[from] RestoreError),

    /// Logging setup error
    #[error(transparent)]
    Tracing(#[from] TracingError),
}

impl PanekeepError {
    /// True when the failure came from talking to the multiplexer.
    #[must_use]
    pub const fn is_host_failure(&self) -> bool {
        matches!(
            self,
            Self::Host(_)
                | Self::Capture(CaptureError::Host(_))
                | Self::Restore(
                    RestoreError::TabCreation(_) | RestoreError::Capture(CaptureError::Host(_))
                )
        )
    }
}

/// Result type for panekeep operations
pub type PanekeepResult<T> = Result<T, PanekeepError>;
