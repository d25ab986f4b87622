//! WezTerm backend driving `wezterm cli`
//!
//! Every call shells out to the `wezterm` binary, which talks to the running
//! mux server through the socket named in `WEZTERM_UNIX_SOCKET`.

use std::path::PathBuf;
use std::process::Command;

use serde::Deserialize;

use super::error::{HostError, HostResult};
use super::types::{
    LivePane, PaneId, SpawnRequest, SpawnedTab, SplitDirection, SplitRequest, TabId, WindowId,
};
use super::{CaptureSource, MuxHost};
use crate::models::Rectangle;

/// Domain name reported for panes of the local mux.
///
/// `wezterm cli list` does not expose pane domains, so every pane is
/// treated as local.
pub const LOCAL_DOMAIN: &str = "local";

/// Size block of a `wezterm cli list` entry
#[derive(Debug, Deserialize)]
struct WezTermSize {
    rows: u32,
    cols: u32,
}

/// One entry of `wezterm cli list --format json`
#[derive(Debug, Deserialize)]
struct WezTermPane {
    window_id: u64,
    tab_id: u64,
    pane_id: u64,
    #[serde(default)]
    workspace: String,
    size: WezTermSize,
    #[serde(default)]
    title: String,
    #[serde(default)]
    cwd: String,
    #[serde(default)]
    left_col: u32,
    #[serde(default)]
    top_row: u32,
    #[serde(default)]
    tab_title: String,
    #[serde(default)]
    window_title: String,
    #[serde(default)]
    is_active: bool,
}

impl From<WezTermPane> for LivePane {
    fn from(p: WezTermPane) -> Self {
        Self {
            window_id: WindowId::new(p.window_id.to_string()),
            tab_id: TabId::new(p.tab_id.to_string()),
            pane_id: PaneId::new(p.pane_id.to_string()),
            workspace: p.workspace,
            rectangle: Rectangle::new(p.top_row, p.left_col, p.size.cols, p.size.rows),
            cwd: p.cwd,
            title: p.title,
            tab_title: p.tab_title,
            window_title: p.window_title,
            is_active: p.is_active,
        }
    }
}

/// Parses the JSON printed by `wezterm cli list --format json`.
///
/// # Errors
///
/// Returns [`HostError::Parse`] if the output is not the expected JSON.
pub fn parse_pane_list(json: &str) -> HostResult<Vec<LivePane>> {
    let panes: Vec<WezTermPane> =
        serde_json::from_str(json).map_err(|e| HostError::Parse(e.to_string()))?;
    Ok(panes.into_iter().map(LivePane::from).collect())
}

/// Converts a size ratio into the integer percentage `split-pane` accepts.
pub(crate) fn percent_for_ratio(ratio: f64) -> u8 {
    (ratio * 100.0).round().clamp(1.0, 99.0) as u8
}

/// WezTerm host backed by the `wezterm cli` subcommands.
#[derive(Debug, Clone)]
pub struct WezTermCli {
    program: PathBuf,
}

impl Default for WezTermCli {
    fn default() -> Self {
        Self::new()
    }
}

impl WezTermCli {
    /// Creates a backend using `wezterm` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("wezterm"),
        }
    }

    /// Creates a backend using a specific `wezterm` binary.
    #[must_use]
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Runs `wezterm cli <args>` and returns trimmed stdout.
    fn run(&self, args: &[&str]) -> HostResult<String> {
        tracing::trace!(args = ?args, "wezterm cli");
        let output = Command::new(&self.program).arg("cli").args(args).output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(HostError::CommandFailed(format!(
                "wezterm cli {}: {}",
                args.first().copied().unwrap_or_default(),
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn parse_pane_id(stdout: &str) -> HostResult<PaneId> {
        stdout
            .lines()
            .last()
            .map(str::trim)
            .filter(|s| s.parse::<u64>().is_ok())
            .map(PaneId::new)
            .ok_or_else(|| HostError::Parse(format!("expected pane id, got '{stdout}'")))
    }

    fn find(&self, id: &PaneId) -> HostResult<Option<LivePane>> {
        Ok(self.list_panes()?.into_iter().find(|p| &p.pane_id == id))
    }
}

impl CaptureSource for WezTermCli {
    fn list_panes(&self) -> HostResult<Vec<LivePane>> {
        let json = self.run(&["list", "--format", "json"])?;
        parse_pane_list(&json)
    }
}

impl MuxHost for WezTermCli {
    type Pane = PaneId;

    fn pane_id(&self, pane: &PaneId) -> PaneId {
        pane.clone()
    }

    fn lookup_pane(&self, id: &PaneId) -> HostResult<Option<PaneId>> {
        Ok(self.find(id)?.map(|p| p.pane_id))
    }

    fn activate(&mut self, pane: &PaneId) -> HostResult<()> {
        self.run(&["activate-pane", "--pane-id", pane.as_str()])
            .map(drop)
    }

    fn is_active(&self, pane: &PaneId) -> HostResult<Option<bool>> {
        match self.find(pane)? {
            Some(live) => Ok(Some(live.is_active)),
            None => Err(HostError::PaneNotFound(pane.clone())),
        }
    }

    fn domain_name(&self, _pane: &PaneId) -> HostResult<String> {
        Ok(LOCAL_DOMAIN.to_string())
    }

    fn split(&mut self, pane: &PaneId, request: &SplitRequest) -> HostResult<PaneId> {
        let percent = percent_for_ratio(request.size_ratio).to_string();
        let side = match request.direction {
            SplitDirection::Right => "--right",
            SplitDirection::Bottom => "--bottom",
        };
        let mut args = vec![
            "split-pane",
            "--pane-id",
            pane.as_str(),
            side,
            "--percent",
            percent.as_str(),
        ];
        if let Some(cwd) = request.cwd.as_deref() {
            args.extend(["--cwd", cwd]);
        }
        let stdout = self.run(&args)?;
        Self::parse_pane_id(&stdout)
    }

    fn spawn_tab(&mut self, request: &SpawnRequest) -> HostResult<SpawnedTab<PaneId>> {
        let mut args = vec!["spawn"];
        if request.new_window {
            args.push("--new-window");
        }
        if let Some(window) = request.window.as_ref() {
            args.extend(["--window-id", window.as_str()]);
        }
        if let Some(workspace) = request.workspace.as_deref() {
            args.extend(["--workspace", workspace]);
        }
        if let Some(cwd) = request.cwd.as_deref() {
            args.extend(["--cwd", cwd]);
        }
        let stdout = self.run(&args)?;
        let pane = Self::parse_pane_id(&stdout)?;
        let live = self
            .find(&pane)?
            .ok_or_else(|| HostError::PaneNotFound(pane.clone()))?;
        Ok(SpawnedTab {
            tab_id: live.tab_id,
            window_id: live.window_id,
            pane,
        })
    }

    fn set_tab_title(&mut self, pane: &PaneId, title: &str) -> HostResult<()> {
        self.run(&["set-tab-title", "--pane-id", pane.as_str(), title])
            .map(drop)
    }

    fn send_text(&mut self, pane: &PaneId, text: &str) -> HostResult<()> {
        self.run(&["send-text", "--pane-id", pane.as_str(), "--no-paste", text])
            .map(drop)
    }
}
