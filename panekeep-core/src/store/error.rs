//! Error types for the snapshot store

use super::snapshot::SnapshotKind;

/// Errors that can occur while reading or writing snapshots.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(serde_json::Error),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(serde_json::Error),

    /// Version mismatch
    #[error("Incompatible snapshot version: expected {expected}, got {actual}")]
    VersionMismatch {
        /// Expected version
        expected: u32,
        /// Actual version found
        actual: u32,
    },

    /// The file holds a different kind of snapshot than requested
    #[error("Snapshot kind mismatch: expected {expected}, got {actual}")]
    KindMismatch {
        /// Requested kind
        expected: SnapshotKind,
        /// Kind found in the file
        actual: SnapshotKind,
    },

    /// The snapshot name cannot be used as a file name
    #[error("Invalid snapshot name: {0:?}")]
    InvalidName(String),
}

/// Result type for snapshot store operations
pub type StoreResult<T> = Result<T, StoreError>;
