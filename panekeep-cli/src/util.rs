//! Shared utility functions used across command modules.

use std::path::Path;

use panekeep_core::capture::CaptureError;
use panekeep_core::config::{AppSettings, ConfigManager};
use panekeep_core::host::{CaptureSource, LivePane, PaneId, WezTermCli};
use panekeep_core::layout::ActivationGuard;
use panekeep_core::store::{Snapshot, SnapshotKind, SnapshotStore};

use crate::error::CliError;

/// Settings and store shared by every command
pub struct Context {
    /// Loaded settings
    pub settings: AppSettings,
    /// Snapshot store under the configured state directory
    pub store: SnapshotStore,
}

/// Creates a `ConfigManager` using the optional custom config directory
/// from CLI args.
pub fn create_config_manager(config_path: Option<&Path>) -> Result<ConfigManager, CliError> {
    match config_path {
        Some(path) => Ok(ConfigManager::with_config_dir(path)),
        None => Ok(ConfigManager::new()?),
    }
}

/// Loads settings and opens the snapshot store.
pub fn load_context(config_path: Option<&Path>) -> Result<Context, CliError> {
    let settings = create_config_manager(config_path)?.load_settings()?;
    let store = SnapshotStore::new(settings.resolved_state_dir()?);
    Ok(Context { settings, store })
}

/// WezTerm backend using the configured executable
pub fn wezterm(settings: &AppSettings) -> WezTermCli {
    WezTermCli::with_program(&settings.wezterm.program)
}

/// Activation guard with the configured timings
pub fn activation_guard(settings: &AppSettings) -> ActivationGuard {
    ActivationGuard::new(settings.activation.to_config())
}

/// The pane given on the command line or through `WEZTERM_PANE`.
pub fn current_pane(pane: Option<&str>) -> Result<PaneId, CliError> {
    pane.filter(|p| !p.is_empty()).map(PaneId::new).ok_or_else(|| {
        CliError::Usage("No pane given: pass --pane or run inside WezTerm".to_string())
    })
}

/// Looks `pane` up in the host's pane list.
pub fn locate<S: CaptureSource>(source: &S, pane: &PaneId) -> Result<LivePane, CliError> {
    source
        .list_panes()?
        .into_iter()
        .find(|p| &p.pane_id == pane)
        .ok_or_else(|| CaptureError::NotFound(pane.to_string()).into())
}

/// Loads a snapshot, treating a missing one as an error.
pub fn load_snapshot(
    store: &SnapshotStore,
    kind: SnapshotKind,
    name: &str,
) -> Result<Snapshot, CliError> {
    store
        .load(kind, name)?
        .ok_or_else(|| CliError::SnapshotNotFound {
            kind,
            name: name.to_string(),
        })
}
