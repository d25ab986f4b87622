//! Layout capture
//!
//! Groups the flat pane list reported by a [`CaptureSource`] into tab,
//! window and workspace records. Host order is preserved, except that the
//! pane at the tab's origin is moved to the front so it can anchor
//! reconstruction.

mod error;

pub use error::{CaptureError, CaptureResult};

use crate::host::{CaptureSource, LivePane, PaneId, TabId, WindowId};
use crate::models::{PaneRecord, TabRecord, WindowRecord, WorkspaceRecord};

/// Captures one tab.
///
/// # Errors
///
/// Returns [`CaptureError::NotFound`] if the host has no pane in `tab`, or
/// [`CaptureError::Host`] if the host cannot be queried.
pub fn capture_tab<S: CaptureSource + ?Sized>(source: &S, tab: &TabId) -> CaptureResult<TabRecord> {
    let panes = source.list_panes()?;
    let in_tab: Vec<&LivePane> = panes.iter().filter(|p| &p.tab_id == tab).collect();
    if in_tab.is_empty() {
        return Err(CaptureError::NotFound(tab.to_string()));
    }
    Ok(tab_record(tab, &in_tab))
}

/// Captures the tab holding `pane`.
///
/// # Errors
///
/// Returns [`CaptureError::NotFound`] if the host does not know `pane`.
pub fn capture_tab_of<S: CaptureSource + ?Sized>(
    source: &S,
    pane: &PaneId,
) -> CaptureResult<TabRecord> {
    let panes = source.list_panes()?;
    let tab = panes
        .iter()
        .find(|p| &p.pane_id == pane)
        .map(|p| p.tab_id.clone())
        .ok_or_else(|| CaptureError::NotFound(pane.to_string()))?;
    let in_tab: Vec<&LivePane> = panes.iter().filter(|p| p.tab_id == tab).collect();
    Ok(tab_record(&tab, &in_tab))
}

/// Captures one window with all its tabs.
///
/// # Errors
///
/// Returns [`CaptureError::NotFound`] if the host has no pane in `window`.
pub fn capture_window<S: CaptureSource + ?Sized>(
    source: &S,
    window: &WindowId,
) -> CaptureResult<WindowRecord> {
    let panes = source.list_panes()?;
    let in_window: Vec<&LivePane> = panes.iter().filter(|p| &p.window_id == window).collect();
    if in_window.is_empty() {
        return Err(CaptureError::NotFound(window.to_string()));
    }
    Ok(window_record(&in_window))
}

/// Captures every window of a workspace.
///
/// # Errors
///
/// Returns [`CaptureError::NotFound`] if no window belongs to `workspace`.
pub fn capture_workspace<S: CaptureSource + ?Sized>(
    source: &S,
    workspace: &str,
) -> CaptureResult<WorkspaceRecord> {
    let panes = source.list_panes()?;
    let in_workspace: Vec<&LivePane> = panes.iter().filter(|p| p.workspace == workspace).collect();
    if in_workspace.is_empty() {
        return Err(CaptureError::NotFound(format!("workspace {workspace}")));
    }
    let windows = group_by(&in_workspace, |p| p.window_id.clone())
        .into_iter()
        .map(|(_, panes)| window_record(&panes))
        .collect();
    Ok(WorkspaceRecord {
        name: workspace.to_string(),
        windows,
    })
}

/// Names of all workspaces with at least one pane, in host order.
///
/// # Errors
///
/// Returns [`CaptureError::Host`] if the host cannot be queried.
pub fn list_workspaces<S: CaptureSource + ?Sized>(source: &S) -> CaptureResult<Vec<String>> {
    let mut names: Vec<String> = Vec::new();
    for pane in source.list_panes()? {
        if !names.contains(&pane.workspace) {
            names.push(pane.workspace);
        }
    }
    Ok(names)
}

/// Groups `panes` by `key`, in order of first appearance.
fn group_by<'a, K: PartialEq>(
    panes: &[&'a LivePane],
    key: impl Fn(&LivePane) -> K,
) -> Vec<(K, Vec<&'a LivePane>)> {
    let mut groups: Vec<(K, Vec<&'a LivePane>)> = Vec::new();
    for pane in panes {
        let k = key(pane);
        match groups.iter_mut().find(|(g, _)| *g == k) {
            Some((_, members)) => members.push(pane),
            None => groups.push((k, vec![pane])),
        }
    }
    groups
}

fn window_record(panes: &[&LivePane]) -> WindowRecord {
    let first = panes[0];
    let tabs = group_by(panes, |p| p.tab_id.clone())
        .into_iter()
        .map(|(tab, members)| tab_record(&tab, &members))
        .collect();
    WindowRecord {
        workspace: first.workspace.clone(),
        title: non_empty(&first.window_title),
        tabs,
    }
}

fn tab_record(tab: &TabId, panes: &[&LivePane]) -> TabRecord {
    let mut records: Vec<PaneRecord> = panes.iter().map(|p| pane_record(p)).collect();
    match records
        .iter()
        .position(|p| p.rectangle.top == 0 && p.rectangle.left == 0)
    {
        Some(0) => {}
        Some(i) => {
            let anchor = records.remove(i);
            records.insert(0, anchor);
        }
        None => tracing::warn!(tab = %tab, "no pane at the tab origin"),
    }
    TabRecord {
        id: tab.as_str().to_string(),
        title: panes.first().and_then(|p| non_empty(&p.tab_title)),
        panes: records,
    }
}

fn pane_record(pane: &LivePane) -> PaneRecord {
    PaneRecord {
        id: pane.pane_id.as_str().to_string(),
        rectangle: pane.rectangle,
        working_directory: pane.cwd.clone(),
        title: non_empty(&pane.title),
        process: None,
        is_active: pane.is_active,
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
