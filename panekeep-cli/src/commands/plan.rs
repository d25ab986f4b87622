//! Plan snapshot command.
//!
//! Prints the split sequence a restore would issue. With `--simulate` the
//! sequence is replayed on an in-memory multiplexer sized like the saved
//! tab, and the rebuilt geometry is shown next to the saved one.

use std::fmt::Write as _;

use panekeep_core::capture::capture_tab;
use panekeep_core::host::{DEFAULT_TAB_SIZE, MemoryHost};
use panekeep_core::layout::{
    ActivationConfig, ActivationGuard, RestoreOptions, RestoreTarget, Restorer, SplitInstruction,
    plan_tab,
};
use panekeep_core::models::{Rectangle, TabRecord};
use panekeep_core::store::SnapshotPayload;
use serde::Serialize;

use crate::cli::{OutputFormat, Scope};
use crate::error::CliError;
use crate::util::{Context, load_snapshot};

/// Plan of one tab
#[derive(Debug, Serialize)]
pub struct TabPlan {
    pub tab: String,
    pub panes: usize,
    pub instructions: Vec<SplitInstruction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulation: Option<Simulation>,
}

/// Outcome of replaying a plan in memory
#[derive(Debug, Serialize)]
pub struct Simulation {
    pub complete: bool,
    pub tiled: bool,
    pub panes: Vec<SimulatedPane>,
}

/// A rebuilt pane next to the rectangle it stands for
#[derive(Debug, Serialize)]
pub struct SimulatedPane {
    pub record: usize,
    pub saved: Rectangle,
    pub restored: Rectangle,
}

/// Plan snapshot command handler
pub fn cmd_plan(
    ctx: &Context,
    name: &str,
    scope: Scope,
    simulate: bool,
    format: OutputFormat,
) -> Result<(), CliError> {
    let snapshot = load_snapshot(&ctx.store, scope.into(), name)?;
    let plans = tabs_of(&snapshot.payload)
        .into_iter()
        .map(|tab| plan(tab, simulate, ctx.settings.restore.relative_sizes))
        .collect::<Result<Vec<_>, _>>()?;

    match format {
        OutputFormat::Text => println!("{}", format_text(&plans)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plans)?),
    }
    Ok(())
}

/// Every tab of a payload, in record order
pub fn tabs_of(payload: &SnapshotPayload) -> Vec<&TabRecord> {
    match payload {
        SnapshotPayload::Tab(tab) => vec![tab],
        SnapshotPayload::Window(window) => window.tabs.iter().collect(),
        SnapshotPayload::Workspace(workspace) => workspace
            .windows
            .iter()
            .flat_map(|w| w.tabs.iter())
            .collect(),
    }
}

fn plan(tab: &TabRecord, simulate: bool, relative_sizes: bool) -> Result<TabPlan, CliError> {
    let simulation = if simulate {
        Some(simulate_tab(tab, relative_sizes)?)
    } else {
        None
    };
    Ok(TabPlan {
        tab: tab.id.clone(),
        panes: tab.panes.len(),
        instructions: plan_tab(tab),
        simulation,
    })
}

fn simulate_tab(tab: &TabRecord, relative_sizes: bool) -> Result<Simulation, CliError> {
    let (cols, rows) = Rectangle::bounding(tab.panes.iter().map(|p| &p.rectangle))
        .map_or(DEFAULT_TAB_SIZE, |b| (b.right(), b.bottom()));
    let mut host = MemoryHost::new().with_tab_size(cols, rows);
    let options = RestoreOptions {
        relative_sizes,
        ..RestoreOptions::default()
    };
    let report = Restorer::new(&mut host)
        .with_guard(ActivationGuard::new(ActivationConfig::immediate()))
        .with_options(options)
        .restore_tab(tab, RestoreTarget::NewWindow { workspace: None })?;

    let complete = report.is_complete();
    let Some(tab_id) = report.tab_id else {
        return Err(CliError::Usage("simulated tab was not created".to_string()));
    };
    let rebuilt = capture_tab(&host, &tab_id)?;
    let tiled = rebuilt.tiling_report().is_some_and(|r| r.is_tiled());

    // Panes are captured in creation order: the anchor, then one per
    // executed split.
    let records = std::iter::once(0).chain(report.executed.iter().map(|i| i.target));
    let panes = records
        .zip(&rebuilt.panes)
        .map(|(record, pane)| SimulatedPane {
            record,
            saved: tab.panes[record].rectangle,
            restored: pane.rectangle,
        })
        .collect();

    Ok(Simulation {
        complete,
        tiled,
        panes,
    })
}

/// Formats plans as text
#[must_use]
pub fn format_text(plans: &[TabPlan]) -> String {
    let mut output = String::new();
    for plan in plans {
        let _ = writeln!(output, "Tab {} ({} panes)", plan.tab, plan.panes);
        if plan.instructions.is_empty() {
            let _ = writeln!(output, "  no splits");
        }
        for (step, i) in plan.instructions.iter().enumerate() {
            let _ = writeln!(
                output,
                "  {:>2}. split pane #{} (record {}) {:<6} -> record {} ratio {:.3}",
                step + 1,
                i.parent,
                i.parent_record,
                i.direction,
                i.target,
                i.size_ratio
            );
        }
        if let Some(sim) = &plan.simulation {
            let _ = writeln!(
                output,
                "  simulated: {}, {}",
                if sim.complete { "complete" } else { "incomplete" },
                if sim.tiled { "tiled" } else { "not tiled" }
            );
            for pane in &sim.panes {
                let _ = writeln!(
                    output,
                    "    record {:>2}: saved {:<18} restored {}",
                    pane.record,
                    pane.saved.to_string(),
                    pane.restored
                );
            }
        }
    }
    output.trim_end().to_string()
}
