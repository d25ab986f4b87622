//! Application settings
//!
//! Every section has defaults, so a partial (or missing) `config.toml` is
//! always valid:
//!
//! ```toml
//! state_dir = "~/.local/share/panekeep"
//!
//! [activation]
//! settle_ms = 150
//!
//! [restore]
//! restore_processes = true
//! process_allowlist = ["nvim", "htop"]
//!
//! [logging]
//! level = "info"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::layout::{
    ActivationConfig, RestoreOptions,
    activation::{DEFAULT_ACTIVATION_TIMEOUT_MS, DEFAULT_POLL_INTERVAL_MS, DEFAULT_SETTLE_MS},
};
use crate::tracing::{TracingConfig, TracingLevel, TracingOutput};

/// Top-level settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Where snapshots are stored; `~` is expanded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<String>,
    /// Activation guard timings
    pub activation: ActivationSettings,
    /// What a restore brings back
    pub restore: RestoreOptions,
    /// Logging
    pub logging: LoggingSettings,
    /// WezTerm backend
    pub wezterm: WezTermSettings,
}

impl AppSettings {
    /// Resolves the snapshot directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoConfigDir`] if no `state_dir` is set and the
    /// platform data directory is unknown.
    pub fn resolved_state_dir(&self) -> ConfigResult<PathBuf> {
        if let Some(dir) = self.state_dir.as_deref() {
            return Ok(PathBuf::from(shellexpand::tilde(dir).into_owned()));
        }
        dirs::data_dir()
            .map(|d| d.join("panekeep"))
            .ok_or(ConfigError::NoConfigDir("data"))
    }
}

/// Activation guard timings, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationSettings {
    /// Delay before each activation
    pub settle_ms: u64,
    /// Interval between focus polls
    pub poll_interval_ms: u64,
    /// Give up confirming focus after this long
    pub timeout_ms: u64,
}

impl Default for ActivationSettings {
    fn default() -> Self {
        Self {
            settle_ms: DEFAULT_SETTLE_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            timeout_ms: DEFAULT_ACTIVATION_TIMEOUT_MS,
        }
    }
}

impl ActivationSettings {
    /// Converts to guard timings.
    #[must_use]
    pub const fn to_config(&self) -> ActivationConfig {
        ActivationConfig::immediate()
            .with_settle(Duration::from_millis(self.settle_ms))
            .with_poll_interval(Duration::from_millis(self.poll_interval_ms))
            .with_timeout(Duration::from_millis(self.timeout_ms))
    }
}

/// Logging settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Minimum level
    pub level: TracingLevel,
    /// Log file; stderr when unset. `~` is expanded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl LoggingSettings {
    /// Tracing configuration for these settings, with the level raised by
    /// `verbosity` steps.
    #[must_use]
    pub fn tracing_config(&self, verbosity: u8) -> TracingConfig {
        let output = self.file.as_deref().map_or(TracingOutput::Stderr, |f| {
            TracingOutput::File {
                path: PathBuf::from(shellexpand::tilde(f).into_owned()),
            }
        });
        TracingConfig::new()
            .with_level(self.level.raised(verbosity))
            .with_output(output)
    }
}

/// WezTerm backend settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WezTermSettings {
    /// `wezterm` executable
    pub program: String,
}

impl Default for WezTermSettings {
    fn default() -> Self {
        Self {
            program: "wezterm".to_string(),
        }
    }
}
