//! Snapshot persistence
//!
//! Snapshots are stored as pretty-printed JSON, one file per name:
//!
//! ```text
//! <root>/workspace/<name>.json
//! <root>/window/<name>.json
//! <root>/tab/<name>.json
//! ```
//!
//! Names are escaped so any string maps to a portable file name: ASCII
//! alphanumerics, `-` and `_` are kept and every other byte becomes `+XX`.

mod error;
mod snapshot;

pub use error::{StoreError, StoreResult};
pub use snapshot::{SNAPSHOT_VERSION, Snapshot, SnapshotKind, SnapshotPayload};

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::tracing::span_names;
use snapshot::SnapshotHeader;

const EXTENSION: &str = "json";

/// Escapes `name` into a file stem.
#[must_use]
pub fn encode_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for b in name.bytes() {
        if b.is_ascii_alphanumeric() || b == b'-' || b == b'_' {
            out.push(char::from(b));
        } else {
            out.push_str(&format!("+{b:02X}"));
        }
    }
    out
}

/// Reverses [`encode_name`]. Returns `None` for stems it cannot produce.
#[must_use]
pub fn decode_name(stem: &str) -> Option<String> {
    let bytes = stem.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'+' {
            let hex = std::str::from_utf8(bytes.get(i + 1..i + 3)?).ok()?;
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

/// A stored snapshot as seen by [`SnapshotStore::list`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotEntry {
    /// Decoded snapshot name
    pub name: String,
    /// File holding the snapshot
    pub path: PathBuf,
    /// Last modification time, when the filesystem reports one
    pub modified: Option<DateTime<Utc>>,
}

/// Directory-backed snapshot store.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    /// Creates a store rooted at `root`. Nothing is created until the
    /// first save.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File path of snapshot `name` of `kind`.
    #[must_use]
    pub fn path_for(&self, kind: SnapshotKind, name: &str) -> PathBuf {
        self.root
            .join(kind.dir_name())
            .join(format!("{}.{EXTENSION}", encode_name(name)))
    }

    /// Saves `payload` under `name`, replacing any previous snapshot.
    ///
    /// # Errors
    /// Returns an error if the name is empty, or if serialization or
    /// writing fails
    pub fn save(&self, name: &str, payload: impl Into<SnapshotPayload>) -> StoreResult<PathBuf> {
        if name.is_empty() {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        let snapshot = Snapshot::new(payload);
        let _span = tracing::debug_span!(span_names::SNAPSHOT_SAVE, snapshot = name).entered();
        let path = self.path_for(snapshot.kind(), name);
        let json = snapshot.to_json().map_err(StoreError::Serialization)?;

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, json)?;
        tracing::debug!(path = %path.display(), kind = %snapshot.kind(), "snapshot saved");
        Ok(path)
    }

    /// Loads snapshot `name` of `kind`; `Ok(None)` if it does not exist.
    ///
    /// # Errors
    /// Returns an error if reading or parsing fails, or if the file holds
    /// an unsupported version or a different kind
    pub fn load(&self, kind: SnapshotKind, name: &str) -> StoreResult<Option<Snapshot>> {
        let _span =
            tracing::debug_span!(span_names::SNAPSHOT_LOAD, snapshot = name, %kind).entered();
        let path = self.path_for(kind, name);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let header: SnapshotHeader =
            serde_json::from_str(&json).map_err(StoreError::Deserialization)?;
        if header.version != SNAPSHOT_VERSION {
            return Err(StoreError::VersionMismatch {
                expected: SNAPSHOT_VERSION,
                actual: header.version,
            });
        }
        if header.kind != kind {
            return Err(StoreError::KindMismatch {
                expected: kind,
                actual: header.kind,
            });
        }
        serde_json::from_str(&json)
            .map(Some)
            .map_err(StoreError::Deserialization)
    }

    /// Lists stored snapshots of `kind`, sorted by name.
    ///
    /// Files whose names were not produced by this store are skipped.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be read
    pub fn list(&self, kind: SnapshotKind) -> StoreResult<Vec<SnapshotEntry>> {
        let dir = self.root.join(kind.dir_name());
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut found = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(name) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(decode_name)
            else {
                tracing::debug!(path = %path.display(), "skipping foreign file");
                continue;
            };
            let modified = fs::metadata(&path)
                .and_then(|m| m.modified())
                .ok()
                .map(DateTime::<Utc>::from);
            found.push(SnapshotEntry {
                name,
                path,
                modified,
            });
        }
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    /// Deletes snapshot `name` of `kind`. Returns `false` if it did not
    /// exist.
    ///
    /// # Errors
    /// Returns an error if the file cannot be removed
    pub fn delete(&self, kind: SnapshotKind, name: &str) -> StoreResult<bool> {
        match fs::remove_file(self.path_for(kind, name)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
