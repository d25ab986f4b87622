//! Per-pane state restoration
//!
//! After a split creates a pane, a [`PaneRestorer`] may bring back state the
//! layout alone does not carry. Failures here never abort a restore.

use std::path::Path;

use crate::host::{HostResult, MuxHost};
use crate::models::{PaneRecord, ProcessInfo};

/// Restores state of a freshly created pane from its record.
pub trait PaneRestorer<H: MuxHost> {
    /// Applies `record` to the live `pane`.
    ///
    /// # Errors
    ///
    /// Returns an error if a host call fails.
    fn restore_pane(&self, host: &mut H, pane: &H::Pane, record: &PaneRecord) -> HostResult<()>;
}

/// Leaves new panes untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRestorer;

impl<H: MuxHost> PaneRestorer<H> for NoopRestorer {
    fn restore_pane(&self, _host: &mut H, _pane: &H::Pane, _record: &PaneRecord) -> HostResult<()> {
        Ok(())
    }
}

/// Relaunches allowlisted foreground processes by typing their command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessRestorer {
    allowlist: Vec<String>,
}

impl ProcessRestorer {
    /// Creates a restorer relaunching only programs named in `allowlist`.
    #[must_use]
    pub fn new(allowlist: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            allowlist: allowlist.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `process` may be relaunched.
    ///
    /// Matches the process name or the file name of its executable.
    #[must_use]
    pub fn is_allowed(&self, process: &ProcessInfo) -> bool {
        let exe_name = process
            .executable
            .as_deref()
            .and_then(|e| Path::new(e).file_name())
            .and_then(|n| n.to_str());
        self.allowlist
            .iter()
            .any(|a| *a == process.name || Some(a.as_str()) == exe_name)
    }

    /// Shell command line relaunching `process`.
    #[must_use]
    pub fn command_line(process: &ProcessInfo) -> String {
        if process.argv.is_empty() {
            return shell_escape(&process.name);
        }
        process
            .argv
            .iter()
            .map(|a| shell_escape(a))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<H: MuxHost> PaneRestorer<H> for ProcessRestorer {
    fn restore_pane(&self, host: &mut H, pane: &H::Pane, record: &PaneRecord) -> HostResult<()> {
        let Some(process) = record.process.as_ref() else {
            return Ok(());
        };
        if !self.is_allowed(process) {
            tracing::debug!(process = %process.name, "process not in allowlist");
            return Ok(());
        }
        let command = Self::command_line(process);
        tracing::debug!(pane = %host.pane_id(pane), %command, "relaunching process");
        host.send_text(pane, &format!("{command}\n"))
    }
}

/// Quotes `s` for a POSIX shell unless it consists only of safe characters.
fn shell_escape(s: &str) -> String {
    let safe = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,@+%".contains(c));
    if safe {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', "'\\''"))
    }
}
