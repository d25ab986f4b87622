//! Save snapshot command.

use panekeep_core::capture::{capture_tab_of, capture_window, capture_workspace};
use panekeep_core::store::SnapshotPayload;
use panekeep_core::tracing::span_names;

use crate::cli::Scope;
use crate::error::CliError;
use crate::util::{Context, current_pane, locate, wezterm};

/// Save snapshot command handler
pub fn cmd_save(
    ctx: &Context,
    name: &str,
    scope: Scope,
    pane: Option<&str>,
    workspace: Option<&str>,
) -> Result<(), CliError> {
    let host = wezterm(&ctx.settings);
    let _span = tracing::info_span!(span_names::CAPTURE, %scope, snapshot = name).entered();

    let payload: SnapshotPayload = match scope {
        Scope::Tab => capture_tab_of(&host, &current_pane(pane)?)?.into(),
        Scope::Window => {
            let live = locate(&host, &current_pane(pane)?)?;
            capture_window(&host, &live.window_id)?.into()
        }
        Scope::Workspace => {
            let workspace = match workspace {
                Some(w) => w.to_string(),
                None => locate(&host, &current_pane(pane)?)?.workspace,
            };
            capture_workspace(&host, &workspace)?.into()
        }
    };

    let panes = payload.pane_count();
    let path = ctx.store.save(name, payload)?;
    tracing::info!(path = %path.display(), panes, "snapshot saved");
    println!("Saved {scope} '{name}' ({panes} panes) to {}", path.display());
    Ok(())
}
