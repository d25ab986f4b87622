//! Captured layout records
//!
//! Records are immutable snapshots: capture creates them once and the
//! restore path only reads them. Identifiers are whatever the host reported
//! at capture time and carry no meaning across runs.

use serde::{Deserialize, Serialize};

use super::geometry::Rectangle;

/// Foreground process metadata of a pane, when the host exposes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessInfo {
    /// Short process name (e.g. `nvim`)
    pub name: String,
    /// Full argument vector, program first
    #[serde(default)]
    pub argv: Vec<String>,
    /// Resolved executable path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable: Option<String>,
}

/// A single captured pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaneRecord {
    /// Host pane id at capture time
    pub id: String,
    /// Position and size
    pub rectangle: Rectangle,
    /// Working directory as a URI (`file://host/path`)
    #[serde(default)]
    pub working_directory: String,
    /// Pane title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Foreground process
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process: Option<ProcessInfo>,
    /// Whether this pane had focus in its tab
    #[serde(default)]
    pub is_active: bool,
}

impl PaneRecord {
    /// Creates a pane record with only geometry and a working directory.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        rectangle: Rectangle,
        working_directory: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            rectangle,
            working_directory: working_directory.into(),
            title: None,
            process: None,
            is_active: false,
        }
    }

    /// Sets the title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the foreground process
    #[must_use]
    pub fn with_process(mut self, process: ProcessInfo) -> Self {
        self.process = Some(process);
        self
    }
}

/// Result of checking whether a tab's rectangles tile its bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilingReport {
    /// Bounding rectangle of all panes
    pub bounds: Rectangle,
    /// Cells covered by panes and their separators
    pub covered: u64,
    /// Number of overlapping pane pairs
    pub overlaps: usize,
}

impl TilingReport {
    /// True when panes and separators cover the bounds exactly once.
    #[must_use]
    pub const fn is_tiled(&self) -> bool {
        self.overlaps == 0 && self.covered == self.bounds.area()
    }
}

/// A captured tab.
///
/// `panes[0]` anchors the layout: it is the only pane that exists when
/// reconstruction starts, every other pane is split off from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabRecord {
    /// Host tab id at capture time
    pub id: String,
    /// Tab title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Panes, anchor first
    pub panes: Vec<PaneRecord>,
}

impl TabRecord {
    /// Creates a tab record.
    #[must_use]
    pub fn new(id: impl Into<String>, panes: Vec<PaneRecord>) -> Self {
        Self {
            id: id.into(),
            title: None,
            panes,
        }
    }

    /// Sets the title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The anchor pane, if any.
    #[must_use]
    pub fn anchor(&self) -> Option<&PaneRecord> {
        self.panes.first()
    }

    /// Total width of the tiling: sum of widths of panes on the top row,
    /// saturating on malformed input.
    #[must_use]
    pub fn tab_width(&self) -> u32 {
        self.panes
            .iter()
            .filter(|p| p.rectangle.top == 0)
            .fold(0u32, |acc, p| acc.saturating_add(p.rectangle.width))
    }

    /// Total height of the tiling: sum of heights of panes in the left column.
    #[must_use]
    pub fn tab_height(&self) -> u32 {
        self.panes
            .iter()
            .filter(|p| p.rectangle.left == 0)
            .fold(0u32, |acc, p| acc.saturating_add(p.rectangle.height))
    }

    /// Index of the pane that had focus at capture time.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.panes.iter().position(|p| p.is_active)
    }

    /// Checks how well the panes tile their bounding rectangle.
    ///
    /// Each pane is credited with the separator on its right and bottom
    /// edge unless that edge lies on the bounds. Returns `None` for a tab
    /// without panes.
    #[must_use]
    pub fn tiling_report(&self) -> Option<TilingReport> {
        let bounds = Rectangle::bounding(self.panes.iter().map(|p| &p.rectangle))?;
        let padded: Vec<Rectangle> = self
            .panes
            .iter()
            .map(|p| {
                let r = p.rectangle;
                let width = if r.right() < bounds.right() {
                    r.width + 1
                } else {
                    r.width
                };
                let height = if r.bottom() < bounds.bottom() {
                    r.height + 1
                } else {
                    r.height
                };
                Rectangle::new(r.top, r.left, width, height)
            })
            .collect();

        let covered = padded.iter().map(Rectangle::area).sum();
        let mut overlaps = 0;
        for (i, a) in padded.iter().enumerate() {
            overlaps += padded[i + 1..].iter().filter(|b| a.intersects(b)).count();
        }

        Some(TilingReport {
            bounds,
            covered,
            overlaps,
        })
    }
}

/// A captured window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    /// Workspace the window belonged to
    pub workspace: String,
    /// Window title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Tabs in display order
    pub tabs: Vec<TabRecord>,
}

impl WindowRecord {
    /// Number of panes across all tabs.
    #[must_use]
    pub fn pane_count(&self) -> usize {
        self.tabs.iter().map(|t| t.panes.len()).sum()
    }
}

/// A captured workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceRecord {
    /// Workspace name
    pub name: String,
    /// Windows in host order
    pub windows: Vec<WindowRecord>,
}

impl WorkspaceRecord {
    /// Number of tabs across all windows.
    #[must_use]
    pub fn tab_count(&self) -> usize {
        self.windows.iter().map(|w| w.tabs.len()).sum()
    }

    /// Number of panes across all windows.
    #[must_use]
    pub fn pane_count(&self) -> usize {
        self.windows.iter().map(WindowRecord::pane_count).sum()
    }
}
