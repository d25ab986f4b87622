//! List snapshots command.

use std::fmt::Write as _;

use chrono::{DateTime, Local, Utc};
use panekeep_core::store::SnapshotKind;
use serde::Serialize;

use crate::cli::{OutputFormat, Scope};
use crate::error::CliError;
use crate::util::Context;

/// One listed snapshot
#[derive(Debug, Clone, Serialize)]
pub struct ListedSnapshot {
    pub kind: SnapshotKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

/// List snapshots command handler
pub fn cmd_list(ctx: &Context, scope: Option<Scope>, format: OutputFormat) -> Result<(), CliError> {
    let kinds = scope.map_or_else(|| SnapshotKind::ALL.to_vec(), |s| vec![s.into()]);

    let mut listed = Vec::new();
    for kind in kinds {
        listed.extend(
            ctx.store
                .list(kind)?
                .into_iter()
                .map(|entry| ListedSnapshot {
                    kind,
                    name: entry.name,
                    modified: entry.modified,
                }),
        );
    }

    match format {
        OutputFormat::Text => println!("{}", format_table(&listed)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&listed)?),
    }
    Ok(())
}

/// Format snapshots as a table string
#[must_use]
pub fn format_table(snapshots: &[ListedSnapshot]) -> String {
    if snapshots.is_empty() {
        return "No snapshots found.".to_string();
    }

    let mut output = String::new();
    let name_width = snapshots
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);
    let kind_width = 9;

    let _ = writeln!(output, "{:<kind_width$}  {:<name_width$}  MODIFIED", "KIND", "NAME");
    let _ = writeln!(output, "{:-<kind_width$}  {:-<name_width$}  {:-<19}", "", "", "");
    for snapshot in snapshots {
        let modified = snapshot.modified.map_or_else(
            || "-".to_string(),
            |m| m.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
        );
        let _ = writeln!(
            output,
            "{:<kind_width$}  {:<name_width$}  {modified}",
            snapshot.kind.to_string(),
            snapshot.name
        );
    }

    output.trim_end().to_string()
}
