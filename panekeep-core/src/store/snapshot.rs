//! Snapshot envelope
//!
//! A snapshot wraps a captured record with a format version and the time
//! it was saved.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{TabRecord, WindowRecord, WorkspaceRecord};

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// What a snapshot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotKind {
    /// A whole workspace
    Workspace,
    /// One window
    Window,
    /// One tab
    Tab,
}

impl SnapshotKind {
    /// All kinds, in storage order.
    pub const ALL: [Self; 3] = [Self::Workspace, Self::Window, Self::Tab];

    /// Directory name under the store root.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Workspace => "workspace",
            Self::Window => "window",
            Self::Tab => "tab",
        }
    }
}

impl fmt::Display for SnapshotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for SnapshotKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "workspace" => Ok(Self::Workspace),
            "window" => Ok(Self::Window),
            "tab" => Ok(Self::Tab),
            other => Err(format!("unknown snapshot kind: {other}")),
        }
    }
}

/// The record inside a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "lowercase")]
pub enum SnapshotPayload {
    /// A workspace
    Workspace(WorkspaceRecord),
    /// A window
    Window(WindowRecord),
    /// A tab
    Tab(TabRecord),
}

impl SnapshotPayload {
    /// Kind of the held record.
    #[must_use]
    pub const fn kind(&self) -> SnapshotKind {
        match self {
            Self::Workspace(_) => SnapshotKind::Workspace,
            Self::Window(_) => SnapshotKind::Window,
            Self::Tab(_) => SnapshotKind::Tab,
        }
    }

    /// Number of panes in the held record.
    #[must_use]
    pub fn pane_count(&self) -> usize {
        match self {
            Self::Workspace(w) => w.pane_count(),
            Self::Window(w) => w.pane_count(),
            Self::Tab(t) => t.panes.len(),
        }
    }
}

impl From<WorkspaceRecord> for SnapshotPayload {
    fn from(record: WorkspaceRecord) -> Self {
        Self::Workspace(record)
    }
}

impl From<WindowRecord> for SnapshotPayload {
    fn from(record: WindowRecord) -> Self {
        Self::Window(record)
    }
}

impl From<TabRecord> for SnapshotPayload {
    fn from(record: TabRecord) -> Self {
        Self::Tab(record)
    }
}

/// A versioned, timestamped record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Format version
    pub version: u32,
    /// When the snapshot was saved
    pub saved_at: DateTime<Utc>,
    /// The record
    #[serde(flatten)]
    pub payload: SnapshotPayload,
}

impl Snapshot {
    /// Wraps `payload` with the current version and time.
    #[must_use]
    pub fn new(payload: impl Into<SnapshotPayload>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            payload: payload.into(),
        }
    }

    /// Kind of the held record.
    #[must_use]
    pub const fn kind(&self) -> SnapshotKind {
        self.payload.kind()
    }

    /// Serializes the snapshot to pretty JSON
    ///
    /// # Errors
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Just enough of a snapshot to check compatibility before full parsing.
#[derive(Debug, Deserialize)]
pub(super) struct SnapshotHeader {
    pub version: u32,
    pub kind: SnapshotKind,
}
