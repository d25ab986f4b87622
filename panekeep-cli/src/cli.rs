//! CLI argument parsing types using `clap`.

use std::fmt;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use panekeep_core::store::SnapshotKind;

/// `panekeep` saves and restores terminal multiplexer pane layouts
#[derive(Parser)]
#[command(name = "panekeep")]
#[command(author, version, about = "Save and restore WezTerm pane layouts")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration directory
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Capture the current layout and store it under a name
    #[command(about = "Capture a tab, window or workspace into a snapshot")]
    Save {
        /// Snapshot name
        name: String,

        /// What to capture
        #[arg(short, long, default_value = "tab", value_enum)]
        scope: Scope,

        /// Pane whose tab or window is captured
        #[arg(long, env = "WEZTERM_PANE")]
        pane: Option<String>,

        /// Workspace to capture (defaults to the pane's workspace)
        #[arg(short, long)]
        workspace: Option<String>,
    },

    /// Rebuild a stored layout
    #[command(about = "Rebuild a snapshot on the running multiplexer")]
    Restore {
        /// Snapshot name
        name: String,

        /// Snapshot kind
        #[arg(short, long, default_value = "tab", value_enum)]
        scope: Scope,

        /// Rebuild a tab snapshot inside the current pane instead of a new
        /// window
        #[arg(long)]
        here: bool,

        /// Pane used by `--here`
        #[arg(long, env = "WEZTERM_PANE")]
        pane: Option<String>,

        /// Workspace for new windows
        #[arg(short, long)]
        workspace: Option<String>,

        /// Print the split plan without touching the multiplexer
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the splits that would rebuild a snapshot
    #[command(about = "Print the split plan of a snapshot")]
    Plan {
        /// Snapshot name
        name: String,

        /// Snapshot kind
        #[arg(short, long, default_value = "tab", value_enum)]
        scope: Scope,

        /// Replay the plan on an in-memory multiplexer and report the
        /// resulting geometry
        #[arg(long)]
        simulate: bool,

        /// Output format
        #[arg(short, long, default_value = "text", value_enum)]
        format: OutputFormat,
    },

    /// List stored snapshots
    #[command(about = "List stored snapshots")]
    List {
        /// Only list snapshots of this kind
        #[arg(short, long, value_enum)]
        scope: Option<Scope>,

        /// Output format
        #[arg(short, long, default_value = "text", value_enum)]
        format: OutputFormat,
    },

    /// Show a stored snapshot
    #[command(about = "Show the contents of a snapshot")]
    Show {
        /// Snapshot name
        name: String,

        /// Snapshot kind
        #[arg(short, long, default_value = "tab", value_enum)]
        scope: Scope,

        /// Output format
        #[arg(short, long, default_value = "text", value_enum)]
        format: OutputFormat,
    },

    /// Delete a stored snapshot
    #[command(about = "Delete a snapshot")]
    Delete {
        /// Snapshot name
        name: String,

        /// Snapshot kind
        #[arg(short, long, default_value = "tab", value_enum)]
        scope: Scope,
    },

    /// List the workspaces of the running multiplexer
    #[command(about = "List live workspaces")]
    Workspaces,
}

/// What a snapshot covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scope {
    /// One tab
    Tab,
    /// One window with its tabs
    Window,
    /// Every window of a workspace
    Workspace,
}

impl From<Scope> for SnapshotKind {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Tab => Self::Tab,
            Scope::Window => Self::Window,
            Scope::Workspace => Self::Workspace,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        SnapshotKind::from(*self).fmt(f)
    }
}

/// Output format for commands that print data
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON
    Json,
}
