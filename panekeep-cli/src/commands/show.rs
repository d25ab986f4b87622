//! Show snapshot command.

use std::fmt::Write as _;

use panekeep_core::models::TabRecord;
use panekeep_core::store::{Snapshot, SnapshotPayload};

use crate::cli::{OutputFormat, Scope};
use crate::commands::plan::tabs_of;
use crate::error::CliError;
use crate::util::{Context, load_snapshot};

/// Show snapshot command handler
pub fn cmd_show(
    ctx: &Context,
    name: &str,
    scope: Scope,
    format: OutputFormat,
) -> Result<(), CliError> {
    let snapshot = load_snapshot(&ctx.store, scope.into(), name)?;
    match format {
        OutputFormat::Text => println!("{}", format_snapshot(name, &snapshot)),
        OutputFormat::Json => println!("{}", snapshot.to_json()?),
    }
    Ok(())
}

/// Formats a snapshot as text
#[must_use]
pub fn format_snapshot(name: &str, snapshot: &Snapshot) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Snapshot Details:");
    let _ = writeln!(output, "  Name:    {name}");
    let _ = writeln!(output, "  Kind:    {}", snapshot.kind());
    let _ = writeln!(output, "  Version: {}", snapshot.version);
    let _ = writeln!(
        output,
        "  Saved:   {}",
        snapshot.saved_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    match &snapshot.payload {
        SnapshotPayload::Workspace(ws) => {
            let _ = writeln!(output, "  Workspace: {}", ws.name);
            let _ = writeln!(output, "  Windows: {}", ws.windows.len());
        }
        SnapshotPayload::Window(w) => {
            let _ = writeln!(output, "  Workspace: {}", w.workspace);
            if let Some(title) = &w.title {
                let _ = writeln!(output, "  Title:   {title}");
            }
        }
        SnapshotPayload::Tab(_) => {}
    }
    let _ = writeln!(output, "  Panes:   {}", snapshot.payload.pane_count());

    for tab in tabs_of(&snapshot.payload) {
        output.push('\n');
        write_tab(&mut output, tab);
    }
    output.trim_end().to_string()
}

fn write_tab(output: &mut String, tab: &TabRecord) {
    let title = tab.title.as_deref().map(|t| format!(" '{t}'")).unwrap_or_default();
    let tiling = match tab.tiling_report() {
        Some(r) if r.is_tiled() => format!("tiled {}x{}", r.bounds.width, r.bounds.height),
        Some(r) => format!(
            "not tiled ({} of {} cells, {} overlaps)",
            r.covered,
            r.bounds.area(),
            r.overlaps
        ),
        None => "empty".to_string(),
    };
    let _ = writeln!(output, "Tab {}{title}: {} panes, {tiling}", tab.id, tab.panes.len());
    for (i, pane) in tab.panes.iter().enumerate() {
        let active = if pane.is_active { " *" } else { "" };
        let _ = writeln!(
            output,
            "  [{i}] {:<18} {}{active}",
            pane.rectangle.to_string(),
            pane.working_directory
        );
    }
}
