//! Restore snapshot command.

use panekeep_core::layout::{
    RestoreTarget, Restorer, TabRestoreReport, WindowRestoreReport, WorkspaceRestoreReport,
};
use panekeep_core::store::SnapshotPayload;

use crate::cli::Scope;
use crate::error::CliError;
use crate::util::{Context, activation_guard, current_pane, load_snapshot, wezterm};

/// Parameters for the restore command
pub struct RestoreParams<'a> {
    pub name: &'a str,
    pub scope: Scope,
    pub here: bool,
    pub pane: Option<&'a str>,
    pub workspace: Option<&'a str>,
}

/// Restore snapshot command handler
pub fn cmd_restore(ctx: &Context, params: &RestoreParams<'_>) -> Result<(), CliError> {
    if params.here && params.scope != Scope::Tab {
        return Err(CliError::Usage(
            "--here only applies to tab snapshots".to_string(),
        ));
    }
    let snapshot = load_snapshot(&ctx.store, params.scope.into(), params.name)?;

    let mut host = wezterm(&ctx.settings);
    let mut restorer = Restorer::new(&mut host)
        .with_guard(activation_guard(&ctx.settings))
        .with_options(ctx.settings.restore.clone());

    let (created, problems) = match &snapshot.payload {
        SnapshotPayload::Tab(tab) => {
            let target = if params.here {
                RestoreTarget::Pane(current_pane(params.pane)?)
            } else {
                RestoreTarget::NewWindow {
                    workspace: params.workspace.map(str::to_string),
                }
            };
            let report = restorer.restore_tab(tab, target)?;
            print_tab(&report);
            (report.panes_created + 1, tab_problems(&report))
        }
        SnapshotPayload::Window(window) => {
            let report = restorer.restore_window(window, params.workspace)?;
            print_window(&report);
            (report.pane_count(), window_problems(&report))
        }
        SnapshotPayload::Workspace(workspace) => {
            let report = restorer.restore_workspace(workspace)?;
            for window in &report.windows {
                print_window(window);
            }
            let created = report.windows.iter().map(WindowRestoreReport::pane_count).sum();
            (created, workspace_problems(&report))
        }
    };

    println!(
        "Restored {} '{}': {created} of {} panes",
        params.scope,
        params.name,
        snapshot.payload.pane_count()
    );
    if problems.is_empty() {
        Ok(())
    } else {
        Err(CliError::Incomplete(problems.join("; ")))
    }
}

fn print_tab(report: &TabRestoreReport) {
    let tab = report
        .tab_id
        .as_ref()
        .map_or_else(|| "current pane".to_string(), ToString::to_string);
    println!(
        "  tab {} -> {tab}: {} split(s)",
        report.record_id,
        report.executed.len()
    );
    for skipped in &report.skipped {
        println!(
            "    skipped records {:?}: {}",
            skipped.targets, skipped.reason
        );
    }
    for failed in &report.failed {
        println!(
            "    failed record {}: {}",
            failed.instruction.target, failed.reason
        );
    }
}

fn print_window(report: &WindowRestoreReport) {
    if let Some(window) = &report.window_id {
        println!("window {window}");
    }
    for tab in &report.tabs {
        print_tab(tab);
    }
    for failure in &report.failures {
        println!("  tab {} not restored: {}", failure.record_id, failure.reason);
    }
}

fn tab_problems(report: &TabRestoreReport) -> Vec<String> {
    let mut problems = Vec::new();
    if !report.skipped.is_empty() {
        let count: usize = report.skipped.iter().map(|s| s.targets.len()).sum();
        problems.push(format!("tab {}: {count} split(s) skipped", report.record_id));
    }
    if !report.failed.is_empty() {
        problems.push(format!(
            "tab {}: {} split(s) failed",
            report.record_id,
            report.failed.len()
        ));
    }
    problems
}

fn window_problems(report: &WindowRestoreReport) -> Vec<String> {
    report
        .tabs
        .iter()
        .flat_map(tab_problems)
        .chain(
            report
                .failures
                .iter()
                .map(|f| format!("tab {} not restored", f.record_id)),
        )
        .collect()
}

fn workspace_problems(report: &WorkspaceRestoreReport) -> Vec<String> {
    report
        .windows
        .iter()
        .flat_map(window_problems)
        .chain(report.failures.iter().cloned())
        .collect()
}
