//! Restore orchestration
//!
//! Spawns tabs and windows for captured records and rebuilds each tab's
//! layout with the split planner. Failures of single activations or splits
//! are contained in the reports; only missing input and failed tab creation
//! abort a tab.

use serde::{Deserialize, Serialize};

use crate::host::{MuxHost, SpawnRequest, TabId, WindowId};
use crate::models::{PaneRecord, TabRecord, WindowRecord, WorkspaceRecord};
use crate::tracing::span_names;

use super::activation::{ActivationGuard, FocusContext};
use super::error::{ActivationError, RestoreError, RestoreResult, SplitError};
use super::executor::{SplitExecutor, resolve_working_directory};
use super::pane_state::{NoopRestorer, PaneRestorer, ProcessRestorer};
use super::planner::{FailedSplit, SkippedActivation, SplitBackend, SplitInstruction, SplitPlanner};

/// What a restore brings back besides the layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestoreOptions {
    /// Set saved tab titles
    pub restore_titles: bool,
    /// Size panes proportionally to the capture; even splits otherwise
    pub relative_sizes: bool,
    /// Relaunch allowlisted foreground processes
    pub restore_processes: bool,
    /// Programs that may be relaunched
    pub process_allowlist: Vec<String>,
    /// Focus the pane that was active at capture time
    pub activate_saved_pane: bool,
}

impl Default for RestoreOptions {
    fn default() -> Self {
        Self {
            restore_titles: true,
            relative_sizes: true,
            restore_processes: false,
            process_allowlist: Vec::new(),
            activate_saved_pane: true,
        }
    }
}

/// Where a restored tab goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreTarget<P> {
    /// Spawn a new window, optionally in a workspace
    NewWindow {
        /// Workspace of the new window
        workspace: Option<String>,
    },
    /// Spawn a new tab in an existing window
    Window(WindowId),
    /// Rebuild inside an existing pane, which stands in for the anchor
    Pane(P),
}

/// Outcome of restoring one tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabRestoreReport {
    /// Id of the tab in the record
    pub record_id: String,
    /// Spawned tab, if one was spawned
    pub tab_id: Option<TabId>,
    /// Window holding the spawned tab
    pub window_id: Option<WindowId>,
    /// Splits that created a pane, in order
    pub executed: Vec<SplitInstruction>,
    /// Panes whose splits were skipped
    pub skipped: Vec<SkippedActivation>,
    /// Splits the host rejected
    pub failed: Vec<FailedSplit>,
    /// Panes created by splitting
    pub panes_created: usize,
}

impl TabRestoreReport {
    /// True when every planned split ran.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && self.failed.is_empty()
    }
}

/// A tab that could not be restored at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabFailure {
    /// Id of the tab in the record
    pub record_id: String,
    /// Why it failed
    pub reason: String,
}

/// Outcome of restoring one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowRestoreReport {
    /// The window the tabs were restored into
    pub window_id: Option<WindowId>,
    /// Restored tabs
    pub tabs: Vec<TabRestoreReport>,
    /// Tabs that failed
    pub failures: Vec<TabFailure>,
}

impl WindowRestoreReport {
    /// Total panes created across tabs, anchors included.
    #[must_use]
    pub fn pane_count(&self) -> usize {
        self.tabs.iter().map(|t| t.panes_created + 1).sum()
    }
}

/// Outcome of restoring a workspace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkspaceRestoreReport {
    /// Workspace name
    pub workspace: String,
    /// Restored windows
    pub windows: Vec<WindowRestoreReport>,
    /// Windows that failed, with the reason
    pub failures: Vec<String>,
}

impl WorkspaceRestoreReport {
    /// True when nothing failed or was skipped.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
            && self.windows.iter().all(|w| {
                w.failures.is_empty() && w.tabs.iter().all(TabRestoreReport::is_complete)
            })
    }
}

/// Planner backend issuing real activations and splits.
struct LiveBackend<'a, 'r, H: MuxHost> {
    host: &'a mut H,
    guard: &'a ActivationGuard,
    focus: &'a mut FocusContext,
    executor: &'a SplitExecutor<'r, H>,
}

impl<H: MuxHost> SplitBackend for LiveBackend<'_, '_, H> {
    type Pane = H::Pane;

    fn activate(&mut self, pane: &H::Pane) -> Result<(), ActivationError> {
        self.guard
            .activate(&mut *self.host, &mut *self.focus, Some(pane))
    }

    fn split(
        &mut self,
        parent: &H::Pane,
        instruction: &SplitInstruction,
        target: &PaneRecord,
    ) -> Result<H::Pane, SplitError> {
        self.executor
            .execute(&mut *self.host, &mut *self.focus, parent, instruction, target)
    }
}

/// Rebuilds captured tabs, windows and workspaces on a host.
#[derive(Debug)]
pub struct Restorer<'h, H: MuxHost> {
    host: &'h mut H,
    guard: ActivationGuard,
    options: RestoreOptions,
    focus: FocusContext,
}

impl<'h, H: MuxHost> Restorer<'h, H> {
    /// Creates a restorer with default options and timings.
    #[must_use]
    pub fn new(host: &'h mut H) -> Self {
        Self {
            host,
            guard: ActivationGuard::default(),
            options: RestoreOptions::default(),
            focus: FocusContext::new(),
        }
    }

    /// Sets the activation guard
    #[must_use]
    pub const fn with_guard(mut self, guard: ActivationGuard) -> Self {
        self.guard = guard;
        self
    }

    /// Sets the restore options
    #[must_use]
    pub fn with_options(mut self, options: RestoreOptions) -> Self {
        self.options = options;
        self
    }

    /// The pane the restorer believes is active.
    #[must_use]
    pub const fn focus(&self) -> &FocusContext {
        &self.focus
    }

    /// Restores one tab.
    ///
    /// # Errors
    ///
    /// - [`RestoreError::MissingDependency`] if the tab has no panes
    /// - [`RestoreError::TabCreation`] if the tab cannot be spawned
    pub fn restore_tab(
        &mut self,
        tab: &TabRecord,
        target: RestoreTarget<H::Pane>,
    ) -> RestoreResult<TabRestoreReport> {
        let anchor_record = tab.anchor().ok_or_else(|| {
            RestoreError::MissingDependency(format!("tab {} has no panes", tab.id))
        })?;
        let _span =
            tracing::info_span!(span_names::RESTORE_TAB, tab = %tab.id, panes = tab.panes.len())
                .entered();

        let cwd = resolve_working_directory(&anchor_record.working_directory);
        let (anchor, tab_id, window_id) = match target {
            RestoreTarget::Pane(pane) => (pane, None, None),
            RestoreTarget::NewWindow { workspace } => {
                let spawned = self.spawn(SpawnRequest {
                    window: None,
                    workspace,
                    cwd,
                    new_window: true,
                })?;
                (spawned.pane, Some(spawned.tab_id), Some(spawned.window_id))
            }
            RestoreTarget::Window(window) => {
                let spawned = self.spawn(SpawnRequest {
                    window: Some(window),
                    workspace: None,
                    cwd,
                    new_window: false,
                })?;
                (spawned.pane, Some(spawned.tab_id), Some(spawned.window_id))
            }
        };
        self.focus.focus_moved_to(self.host.pane_id(&anchor));

        if self.options.restore_titles
            && let Some(title) = tab.title.as_deref()
            && let Err(e) = self.host.set_tab_title(&anchor, title)
        {
            tracing::warn!(tab = %tab.id, error = %e, "failed to set tab title");
        }

        let noop = NoopRestorer;
        let process = ProcessRestorer::new(self.options.process_allowlist.iter().cloned());
        let pane_restorer: &dyn PaneRestorer<H> = if self.options.restore_processes {
            &process
        } else {
            &noop
        };
        if let Err(e) = pane_restorer.restore_pane(&mut *self.host, &anchor, anchor_record) {
            tracing::warn!(tab = %tab.id, error = %e, "anchor pane state not restored");
        }

        let executor =
            SplitExecutor::new(pane_restorer).with_relative_sizes(self.options.relative_sizes);
        let mut backend = LiveBackend {
            host: &mut *self.host,
            guard: &self.guard,
            focus: &mut self.focus,
            executor: &executor,
        };
        let outcome = SplitPlanner::new(tab).run(&mut backend, anchor);

        if self.options.activate_saved_pane
            && let Some(saved) = tab.active_index()
            && let Some(pos) = outcome.records.iter().position(|&r| r == saved)
            && let Err(e) =
                self.guard
                    .activate(&mut *self.host, &mut self.focus, outcome.panes.get(pos))
        {
            tracing::warn!(tab = %tab.id, error = %e, "failed to focus saved pane");
        }

        let report = TabRestoreReport {
            record_id: tab.id.clone(),
            tab_id,
            window_id,
            panes_created: outcome.executed.len(),
            executed: outcome.executed,
            skipped: outcome.skipped,
            failed: outcome.failed,
        };
        tracing::info!(
            tab = %tab.id,
            panes_created = report.panes_created,
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "tab restored"
        );
        Ok(report)
    }

    /// Restores every tab of a window into one new window.
    ///
    /// The first tab spawns the window; failed tabs are reported and the
    /// rest are still restored. `workspace` overrides the recorded one.
    ///
    /// # Errors
    ///
    /// Returns [`RestoreError::MissingDependency`] if the window has no tabs.
    pub fn restore_window(
        &mut self,
        window: &WindowRecord,
        workspace: Option<&str>,
    ) -> RestoreResult<WindowRestoreReport> {
        if window.tabs.is_empty() {
            return Err(RestoreError::MissingDependency(
                "window has no tabs".to_string(),
            ));
        }
        let workspace = workspace.unwrap_or(&window.workspace).to_string();

        let mut report = WindowRestoreReport {
            window_id: None,
            tabs: Vec::new(),
            failures: Vec::new(),
        };
        for tab in &window.tabs {
            let target = report.window_id.clone().map_or_else(
                || RestoreTarget::NewWindow {
                    workspace: Some(workspace.clone()),
                },
                RestoreTarget::Window,
            );
            match self.restore_tab(tab, target) {
                Ok(tab_report) => {
                    if report.window_id.is_none() {
                        report.window_id.clone_from(&tab_report.window_id);
                    }
                    report.tabs.push(tab_report);
                }
                Err(e) => {
                    tracing::warn!(tab = %tab.id, error = %e, "tab not restored");
                    report.failures.push(TabFailure {
                        record_id: tab.id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        Ok(report)
    }

    /// Restores every window of a workspace.
    ///
    /// # Errors
    ///
    /// Returns [`RestoreError::MissingDependency`] if the workspace has no
    /// windows.
    pub fn restore_workspace(
        &mut self,
        workspace: &WorkspaceRecord,
    ) -> RestoreResult<WorkspaceRestoreReport> {
        if workspace.windows.is_empty() {
            return Err(RestoreError::MissingDependency(format!(
                "workspace {} has no windows",
                workspace.name
            )));
        }
        let _span =
            tracing::info_span!(span_names::RESTORE_WORKSPACE, workspace = %workspace.name)
                .entered();

        let mut report = WorkspaceRestoreReport {
            workspace: workspace.name.clone(),
            windows: Vec::new(),
            failures: Vec::new(),
        };
        for window in &workspace.windows {
            match self.restore_window(window, Some(&workspace.name)) {
                Ok(w) => report.windows.push(w),
                Err(e) => {
                    tracing::warn!(error = %e, "window not restored");
                    report.failures.push(e.to_string());
                }
            }
        }
        tracing::info!(
            workspace = %workspace.name,
            windows = report.windows.len(),
            "workspace restored"
        );
        Ok(report)
    }

    fn spawn(
        &mut self,
        request: SpawnRequest,
    ) -> RestoreResult<crate::host::SpawnedTab<H::Pane>> {
        self.host
            .spawn_tab(&request)
            .map_err(|e| RestoreError::TabCreation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{CaptureSource, HostCall, MemoryHost};
    use crate::layout::activation::ActivationConfig;
    use crate::models::{ProcessInfo, Rectangle};

    fn pane(id: &str, top: u32, left: u32, width: u32, height: u32) -> PaneRecord {
        PaneRecord::new(id, Rectangle::new(top, left, width, height), "file:///tmp")
    }

    fn three_pane_tab() -> TabRecord {
        TabRecord::new(
            "7",
            vec![
                pane("0", 0, 0, 40, 24),
                pane("1", 0, 41, 39, 24),
                pane("2", 25, 0, 80, 23),
            ],
        )
        .with_title("editor")
    }

    fn restorer(host: &mut MemoryHost) -> Restorer<'_, MemoryHost> {
        Restorer::new(host).with_guard(ActivationGuard::new(ActivationConfig::immediate()))
    }

    #[test]
    fn restores_three_pane_tab() {
        let mut host = MemoryHost::new();
        let report = restorer(&mut host)
            .restore_tab(
                &three_pane_tab(),
                RestoreTarget::NewWindow { workspace: None },
            )
            .unwrap();

        assert_eq!(report.panes_created, 2);
        assert!(report.is_complete());
        let tab_id = report.tab_id.clone().unwrap();
        assert_eq!(host.panes_in_tab(&tab_id).len(), 3);
        assert_eq!(host.tab_title(&tab_id), Some("editor"));
    }

    #[test]
    fn split_calls_follow_plan_order() {
        let mut host = MemoryHost::new();
        restorer(&mut host)
            .restore_tab(
                &three_pane_tab(),
                RestoreTarget::NewWindow { workspace: None },
            )
            .unwrap();
        let directions: Vec<_> = host
            .calls()
            .iter()
            .filter_map(|c| match c {
                HostCall::Split { direction, .. } => Some(*direction),
                _ => None,
            })
            .collect();
        assert_eq!(
            directions,
            vec![
                crate::host::SplitDirection::Right,
                crate::host::SplitDirection::Bottom
            ]
        );
    }

    #[test]
    fn empty_tab_is_missing_dependency() {
        let mut host = MemoryHost::new();
        let err = restorer(&mut host)
            .restore_tab(
                &TabRecord::new("x", Vec::new()),
                RestoreTarget::NewWindow { workspace: None },
            )
            .unwrap_err();
        assert!(matches!(err, RestoreError::MissingDependency(_)));
        assert_eq!(host.pane_count(), 0);
    }

    #[test]
    fn spawn_failure_is_tab_creation_error() {
        let mut host = MemoryHost::new();
        host.fail_spawns(true);
        let err = restorer(&mut host)
            .restore_tab(
                &three_pane_tab(),
                RestoreTarget::NewWindow { workspace: None },
            )
            .unwrap_err();
        assert!(matches!(err, RestoreError::TabCreation(_)));
    }

    #[test]
    fn restores_into_existing_pane() {
        let mut host = MemoryHost::new();
        let spawned = host.spawn_tab(&SpawnRequest::default()).unwrap();
        let report = restorer(&mut host)
            .restore_tab(&three_pane_tab(), RestoreTarget::Pane(spawned.pane))
            .unwrap();
        assert_eq!(report.tab_id, None);
        assert_eq!(host.panes_in_tab(&spawned.tab_id).len(), 3);
    }

    #[test]
    fn failed_activation_is_contained() {
        let mut host = MemoryHost::new();
        let spawned = host.spawn_tab(&SpawnRequest::default()).unwrap();
        host.fail_activation_of(spawned.pane.clone());
        let report = restorer(&mut host)
            .restore_tab(&three_pane_tab(), RestoreTarget::Pane(spawned.pane))
            .unwrap();
        assert_eq!(report.panes_created, 0);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].targets, vec![1, 2]);
    }

    #[test]
    fn saved_active_pane_gets_focus() {
        let mut tab = three_pane_tab();
        tab.panes[1].is_active = true;
        let mut host = MemoryHost::new();
        let mut restorer = restorer(&mut host);
        let report = restorer
            .restore_tab(&tab, RestoreTarget::NewWindow { workspace: None })
            .unwrap();
        let focused = restorer.focus().active().cloned().unwrap();
        drop(restorer);

        let live = host.list_panes().unwrap();
        let active: Vec<_> = live.iter().filter(|p| p.is_active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].pane_id, focused);
        assert!(active[0].rectangle.left > 0);
        assert!(report.is_complete());
    }

    #[test]
    fn relaunches_allowlisted_processes() {
        let mut tab = three_pane_tab();
        tab.panes[2].process = Some(ProcessInfo {
            name: "htop".into(),
            argv: vec!["htop".into()],
            executable: None,
        });
        let options = RestoreOptions {
            restore_processes: true,
            process_allowlist: vec!["htop".into()],
            ..RestoreOptions::default()
        };
        let mut host = MemoryHost::new();
        restorer(&mut host)
            .with_options(options)
            .restore_tab(&tab, RestoreTarget::NewWindow { workspace: None })
            .unwrap();
        let sent: Vec<_> = host
            .calls()
            .iter()
            .filter_map(|c| match c {
                HostCall::SendText(_, text) => Some(text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(sent, vec!["htop\n".to_string()]);
    }

    #[test]
    fn window_tabs_share_one_window() {
        let window = WindowRecord {
            workspace: "dev".into(),
            title: None,
            tabs: vec![three_pane_tab(), TabRecord::new("8", vec![pane("9", 0, 0, 80, 48)])],
        };
        let mut host = MemoryHost::new();
        let report = restorer(&mut host).restore_window(&window, None).unwrap();
        assert_eq!(report.tabs.len(), 2);
        assert_eq!(report.pane_count(), 4);
        assert_eq!(report.tabs[0].window_id, report.tabs[1].window_id);

        let live = host.list_panes().unwrap();
        assert!(live.iter().all(|p| p.workspace == "dev"));
    }

    #[test]
    fn window_collects_tab_failures() {
        let window = WindowRecord {
            workspace: "dev".into(),
            title: None,
            tabs: vec![TabRecord::new("empty", Vec::new()), three_pane_tab()],
        };
        let mut host = MemoryHost::new();
        let report = restorer(&mut host).restore_window(&window, None).unwrap();
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].record_id, "empty");
        assert_eq!(report.tabs.len(), 1);
    }

    #[test]
    fn workspace_restores_each_window() {
        let ws = WorkspaceRecord {
            name: "dev".into(),
            windows: vec![
                WindowRecord {
                    workspace: "dev".into(),
                    title: None,
                    tabs: vec![three_pane_tab()],
                },
                WindowRecord {
                    workspace: "dev".into(),
                    title: None,
                    tabs: vec![TabRecord::new("8", vec![pane("9", 0, 0, 80, 48)])],
                },
            ],
        };
        let mut host = MemoryHost::new();
        let report = restorer(&mut host).restore_workspace(&ws).unwrap();
        assert_eq!(report.windows.len(), 2);
        assert!(report.is_complete());
        assert_ne!(report.windows[0].window_id, report.windows[1].window_id);
        assert_eq!(host.pane_count(), 4);
    }

    #[test]
    fn empty_workspace_is_missing_dependency() {
        let ws = WorkspaceRecord {
            name: "dev".into(),
            windows: Vec::new(),
        };
        let mut host = MemoryHost::new();
        assert!(matches!(
            restorer(&mut host).restore_workspace(&ws),
            Err(RestoreError::MissingDependency(_))
        ));
    }
}
