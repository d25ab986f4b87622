//! Core type definitions shared by host backends
//!
//! This module contains the identifier types and request/response structs
//! exchanged with a multiplexer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Rectangle;

/// Identifier of a live pane.
///
/// Hosts report numeric or opaque ids; they are kept as strings so
/// records can store them verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PaneId(pub String);

impl PaneId {
    /// Creates a pane ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pane({})", self.0)
    }
}

/// Identifier of a live tab.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TabId(pub String);

impl TabId {
    /// Creates a tab ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tab({})", self.0)
    }
}

/// Identifier of a live window.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowId(pub String);

impl WindowId {
    /// Creates a window ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Window({})", self.0)
    }
}

/// Side of the parent on which a split places the new pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitDirection {
    /// New pane to the right of the parent.
    Right,
    /// New pane below the parent.
    Bottom,
}

impl fmt::Display for SplitDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Right => write!(f, "right"),
            Self::Bottom => write!(f, "bottom"),
        }
    }
}

/// Arguments of a split call.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitRequest {
    /// Where the new pane goes
    pub direction: SplitDirection,
    /// Working directory for the new pane
    pub cwd: Option<String>,
    /// Domain the new pane is spawned in
    pub domain: Option<String>,
    /// Fraction of the parent's extent given to the new pane, in (0, 1]
    pub size_ratio: f64,
}

/// Arguments of a tab spawn call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpawnRequest {
    /// Window to spawn into; `None` together with `new_window` opens one
    pub window: Option<WindowId>,
    /// Workspace for a new window
    pub workspace: Option<String>,
    /// Working directory of the first pane
    pub cwd: Option<String>,
    /// Open a new window instead of a tab in an existing one
    pub new_window: bool,
}

/// A freshly spawned tab and its single pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnedTab<P> {
    /// The new tab
    pub tab_id: TabId,
    /// The window holding the tab
    pub window_id: WindowId,
    /// The tab's only pane
    pub pane: P,
}

/// A pane as enumerated by a capture source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LivePane {
    /// Window holding the pane
    pub window_id: WindowId,
    /// Tab holding the pane
    pub tab_id: TabId,
    /// The pane
    pub pane_id: PaneId,
    /// Workspace of the window
    pub workspace: String,
    /// Position and size within the tab
    pub rectangle: Rectangle,
    /// Working directory URI
    pub cwd: String,
    /// Pane title
    pub title: String,
    /// Explicit tab title, empty when unset
    pub tab_title: String,
    /// Explicit window title, empty when unset
    pub window_title: String,
    /// Whether this is the active pane of its tab
    pub is_active: bool,
}
