//! In-memory multiplexer
//!
//! `MemoryHost` keeps windows, tabs and panes in plain collections and
//! splits pane rectangles the way a terminal multiplexer does: the parent
//! keeps the left/top part, a one-cell separator follows, and the new pane
//! gets `size_ratio` of the space that remains after the separator.
//!
//! Faults can be injected per pane to exercise partial restores.

use std::collections::{BTreeMap, HashSet};

use super::error::{HostError, HostResult};
use super::types::{
    LivePane, PaneId, SpawnRequest, SpawnedTab, SplitDirection, SplitRequest, TabId, WindowId,
};
use super::wezterm::LOCAL_DOMAIN;
use super::{CaptureSource, MuxHost};
use crate::models::{Rectangle, SEPARATOR_CELLS, TabRecord};

/// Default tab size for spawned tabs (columns, rows)
pub const DEFAULT_TAB_SIZE: (u32, u32) = (80, 48);

/// State of one pane in a [`MemoryHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryPane {
    /// Pane id
    pub id: PaneId,
    /// Owning tab
    pub tab: TabId,
    /// Owning window
    pub window: WindowId,
    /// Position within the tab
    pub rectangle: Rectangle,
    /// Working directory URI
    pub cwd: String,
    /// Pane title
    pub title: String,
    /// Domain name
    pub domain: String,
}

#[derive(Debug, Clone)]
struct MemoryTab {
    title: String,
    active: Option<PaneId>,
}

#[derive(Debug, Clone)]
struct MemoryWindow {
    workspace: String,
}

/// A call made against a [`MemoryHost`], recorded in order.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    /// `activate(pane)`
    Activate(PaneId),
    /// `split(parent, request)` that produced `child`
    Split {
        /// Pane that was split
        parent: PaneId,
        /// Pane that was created
        child: PaneId,
        /// Side of the new pane
        direction: SplitDirection,
        /// Requested size ratio
        size_ratio: f64,
        /// Requested working directory
        cwd: Option<String>,
    },
    /// `spawn_tab` that produced a pane
    Spawn(PaneId),
    /// `set_tab_title`
    SetTitle(TabId, String),
    /// `send_text`
    SendText(PaneId, String),
}

/// Deterministic in-memory multiplexer.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    panes: Vec<MemoryPane>,
    tabs: BTreeMap<TabId, MemoryTab>,
    windows: BTreeMap<WindowId, MemoryWindow>,
    next_id: u64,
    tab_size: (u32, u32),
    focus_signal: bool,
    fail_activation: HashSet<PaneId>,
    fail_split: HashSet<PaneId>,
    fail_spawn: bool,
    calls: Vec<HostCall>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// Creates an empty host.
    #[must_use]
    pub fn new() -> Self {
        Self {
            panes: Vec::new(),
            tabs: BTreeMap::new(),
            windows: BTreeMap::new(),
            next_id: 0,
            tab_size: DEFAULT_TAB_SIZE,
            focus_signal: true,
            fail_activation: HashSet::new(),
            fail_split: HashSet::new(),
            fail_spawn: false,
            calls: Vec::new(),
        }
    }

    /// Sets the size of newly spawned tabs.
    #[must_use]
    pub const fn with_tab_size(mut self, cols: u32, rows: u32) -> Self {
        self.tab_size = (cols, rows);
        self
    }

    /// Controls whether `is_active` can confirm focus.
    #[must_use]
    pub const fn with_focus_signal(mut self, enabled: bool) -> Self {
        self.focus_signal = enabled;
        self
    }

    /// Makes every activation of `pane` fail.
    pub fn fail_activation_of(&mut self, pane: PaneId) {
        self.fail_activation.insert(pane);
    }

    /// Makes every split of `pane` fail.
    pub fn fail_split_of(&mut self, pane: PaneId) {
        self.fail_split.insert(pane);
    }

    /// Makes every tab spawn fail.
    pub fn fail_spawns(&mut self, fail: bool) {
        self.fail_spawn = fail;
    }

    /// Removes a pane, as if its process exited.
    pub fn close_pane(&mut self, pane: &PaneId) {
        self.panes.retain(|p| &p.id != pane);
        for tab in self.tabs.values_mut() {
            if tab.active.as_ref() == Some(pane) {
                tab.active = None;
            }
        }
    }

    /// Calls recorded so far.
    #[must_use]
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Pane state by id.
    #[must_use]
    pub fn pane(&self, id: &PaneId) -> Option<&MemoryPane> {
        self.panes.iter().find(|p| &p.id == id)
    }

    /// Panes of a tab in creation order.
    #[must_use]
    pub fn panes_in_tab(&self, tab: &TabId) -> Vec<&MemoryPane> {
        self.panes.iter().filter(|p| &p.tab == tab).collect()
    }

    /// Title of a tab.
    #[must_use]
    pub fn tab_title(&self, tab: &TabId) -> Option<&str> {
        self.tabs.get(tab).map(|t| t.title.as_str())
    }

    /// Number of live panes.
    #[must_use]
    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    /// Seeds a tab holding the panes of `record` with their captured
    /// rectangles, in a new window of `workspace`.
    pub fn insert_tab(&mut self, workspace: &str, record: &TabRecord) -> TabId {
        let window = self.new_window(workspace);
        self.insert_tab_into(&window, record)
    }

    /// Seeds a tab like [`Self::insert_tab`] into an existing window.
    pub fn insert_tab_into(&mut self, window: &WindowId, record: &TabRecord) -> TabId {
        let tab = TabId::new(self.fresh_id());
        let mut active = None;
        for p in &record.panes {
            let id = PaneId::new(self.fresh_id());
            if p.is_active {
                active = Some(id.clone());
            }
            self.panes.push(MemoryPane {
                id,
                tab: tab.clone(),
                window: window.clone(),
                rectangle: p.rectangle,
                cwd: p.working_directory.clone(),
                title: p.title.clone().unwrap_or_default(),
                domain: LOCAL_DOMAIN.to_string(),
            });
        }
        self.tabs.insert(
            tab.clone(),
            MemoryTab {
                title: record.title.clone().unwrap_or_default(),
                active,
            },
        );
        tab
    }

    /// Creates an empty window in `workspace`.
    pub fn new_window(&mut self, workspace: &str) -> WindowId {
        let window = WindowId::new(self.fresh_id());
        self.windows.insert(
            window.clone(),
            MemoryWindow {
                workspace: workspace.to_string(),
            },
        );
        window
    }

    fn fresh_id(&mut self) -> String {
        let id = self.next_id;
        self.next_id += 1;
        id.to_string()
    }

    fn pane_mut(&mut self, id: &PaneId) -> HostResult<&mut MemoryPane> {
        self.panes
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| HostError::PaneNotFound(id.clone()))
    }

    /// Divides `extent` cells into (parent, child) around a separator.
    fn divide(extent: u32, ratio: f64) -> HostResult<(u32, u32)> {
        let available = extent
            .checked_sub(SEPARATOR_CELLS)
            .filter(|a| *a >= 2)
            .ok_or_else(|| HostError::Rejected(format!("pane too small to split ({extent})")))?;
        let child = (f64::from(available) * ratio).round() as u32;
        let child = child.clamp(1, available - 1);
        Ok((available - child, child))
    }
}

impl CaptureSource for MemoryHost {
    fn list_panes(&self) -> HostResult<Vec<LivePane>> {
        Ok(self
            .panes
            .iter()
            .map(|p| {
                let tab = self.tabs.get(&p.tab);
                LivePane {
                    window_id: p.window.clone(),
                    tab_id: p.tab.clone(),
                    pane_id: p.id.clone(),
                    workspace: self
                        .windows
                        .get(&p.window)
                        .map(|w| w.workspace.clone())
                        .unwrap_or_default(),
                    rectangle: p.rectangle,
                    cwd: p.cwd.clone(),
                    title: p.title.clone(),
                    tab_title: tab.map(|t| t.title.clone()).unwrap_or_default(),
                    window_title: String::new(),
                    is_active: tab.and_then(|t| t.active.as_ref()) == Some(&p.id),
                }
            })
            .collect())
    }
}

impl MuxHost for MemoryHost {
    type Pane = PaneId;

    fn pane_id(&self, pane: &PaneId) -> PaneId {
        pane.clone()
    }

    fn lookup_pane(&self, id: &PaneId) -> HostResult<Option<PaneId>> {
        Ok(self.pane(id).map(|p| p.id.clone()))
    }

    fn activate(&mut self, pane: &PaneId) -> HostResult<()> {
        self.calls.push(HostCall::Activate(pane.clone()));
        if self.fail_activation.contains(pane) {
            return Err(HostError::Rejected(format!("cannot activate {pane}")));
        }
        let tab_id = self.pane_mut(pane)?.tab.clone();
        if let Some(tab) = self.tabs.get_mut(&tab_id) {
            tab.active = Some(pane.clone());
        }
        Ok(())
    }

    fn is_active(&self, pane: &PaneId) -> HostResult<Option<bool>> {
        if !self.focus_signal {
            return Ok(None);
        }
        let state = self
            .pane(pane)
            .ok_or_else(|| HostError::PaneNotFound(pane.clone()))?;
        Ok(Some(
            self.tabs.get(&state.tab).and_then(|t| t.active.as_ref()) == Some(pane),
        ))
    }

    fn domain_name(&self, pane: &PaneId) -> HostResult<String> {
        self.pane(pane)
            .map(|p| p.domain.clone())
            .ok_or_else(|| HostError::PaneNotFound(pane.clone()))
    }

    fn split(&mut self, pane: &PaneId, request: &SplitRequest) -> HostResult<PaneId> {
        if self.fail_split.contains(pane) {
            return Err(HostError::Rejected(format!("cannot split {pane}")));
        }
        let child_id = PaneId::new(self.fresh_id());
        let parent = self.pane_mut(pane)?;
        let r = parent.rectangle;
        let child_rect = match request.direction {
            SplitDirection::Right => {
                let (keep, give) = Self::divide(r.width, request.size_ratio)?;
                parent.rectangle.width = keep;
                Rectangle::new(r.top, r.left + keep + SEPARATOR_CELLS, give, r.height)
            }
            SplitDirection::Bottom => {
                let (keep, give) = Self::divide(r.height, request.size_ratio)?;
                parent.rectangle.height = keep;
                Rectangle::new(r.top + keep + SEPARATOR_CELLS, r.left, r.width, give)
            }
        };
        let child = MemoryPane {
            id: child_id.clone(),
            tab: parent.tab.clone(),
            window: parent.window.clone(),
            rectangle: child_rect,
            cwd: request
                .cwd
                .as_ref()
                .map(|c| format!("file://{c}"))
                .unwrap_or_else(|| parent.cwd.clone()),
            title: String::new(),
            domain: request
                .domain
                .clone()
                .unwrap_or_else(|| parent.domain.clone()),
        };
        let tab_id = child.tab.clone();
        self.panes.push(child);
        if let Some(tab) = self.tabs.get_mut(&tab_id) {
            tab.active = Some(child_id.clone());
        }
        self.calls.push(HostCall::Split {
            parent: pane.clone(),
            child: child_id.clone(),
            direction: request.direction,
            size_ratio: request.size_ratio,
            cwd: request.cwd.clone(),
        });
        Ok(child_id)
    }

    fn spawn_tab(&mut self, request: &SpawnRequest) -> HostResult<SpawnedTab<PaneId>> {
        if self.fail_spawn {
            return Err(HostError::Rejected("spawning is disabled".to_string()));
        }
        let window = match request.window.as_ref() {
            Some(w) if self.windows.contains_key(w) => w.clone(),
            Some(w) => return Err(HostError::Rejected(format!("no such window: {w}"))),
            None => {
                let workspace = request.workspace.as_deref().unwrap_or("default");
                self.new_window(workspace)
            }
        };
        let tab = TabId::new(self.fresh_id());
        let pane = PaneId::new(self.fresh_id());
        let (cols, rows) = self.tab_size;
        self.panes.push(MemoryPane {
            id: pane.clone(),
            tab: tab.clone(),
            window: window.clone(),
            rectangle: Rectangle::new(0, 0, cols, rows),
            cwd: request
                .cwd
                .as_ref()
                .map(|c| format!("file://{c}"))
                .unwrap_or_default(),
            title: String::new(),
            domain: LOCAL_DOMAIN.to_string(),
        });
        self.tabs.insert(
            tab.clone(),
            MemoryTab {
                title: String::new(),
                active: Some(pane.clone()),
            },
        );
        self.calls.push(HostCall::Spawn(pane.clone()));
        Ok(SpawnedTab {
            tab_id: tab,
            window_id: window,
            pane,
        })
    }

    fn set_tab_title(&mut self, pane: &PaneId, title: &str) -> HostResult<()> {
        let tab_id = self
            .pane(pane)
            .map(|p| p.tab.clone())
            .ok_or_else(|| HostError::PaneNotFound(pane.clone()))?;
        if let Some(tab) = self.tabs.get_mut(&tab_id) {
            tab.title = title.to_string();
        }
        self.calls.push(HostCall::SetTitle(tab_id, title.to_string()));
        Ok(())
    }

    fn send_text(&mut self, pane: &PaneId, text: &str) -> HostResult<()> {
        if self.pane(pane).is_none() {
            return Err(HostError::PaneNotFound(pane.clone()));
        }
        self.calls
            .push(HostCall::SendText(pane.clone(), text.to_string()));
        Ok(())
    }
}
