//! `panekeep` Core Library
//!
//! Captures the tiled pane layout of terminal multiplexer tabs, windows and
//! workspaces, stores it as JSON snapshots, and rebuilds it later by
//! replaying binary splits against a live multiplexer.
//!
//! # Crate Structure
//!
//! - [`models`] - Captured records (rectangles, panes, tabs, windows, workspaces)
//! - [`host`] - Multiplexer abstraction with WezTerm and in-memory backends
//! - [`capture`] - Live panes to records
//! - [`layout`] - Split planning, activation and restore orchestration
//! - [`store`] - Snapshot persistence
//! - [`config`] - Application settings and persistence
//! - [`tracing`] - Logging setup

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod capture;
pub mod config;
pub mod error;
pub mod host;
pub mod layout;
pub mod models;
pub mod store;
pub mod tracing;

pub use capture::{
    CaptureError, CaptureResult, capture_tab, capture_tab_of, capture_window, capture_workspace,
    list_workspaces,
};
pub use config::{AppSettings, ConfigManager};
pub use error::{ConfigError, ConfigResult, PanekeepError, PanekeepResult};
pub use host::{
    CaptureSource, HostError, HostResult, MemoryHost, MuxHost, PaneId, SplitDirection, TabId,
    WezTermCli, WindowId,
};
pub use layout::{
    ActivationConfig, ActivationError, ActivationGuard, RestoreError, RestoreOptions,
    RestoreTarget, Restorer, SplitError, SplitInstruction, SplitPlanner, TabRestoreReport,
    plan_tab,
};
pub use models::{
    PaneRecord, ProcessInfo, Rectangle, TabRecord, TilingReport, WindowRecord, WorkspaceRecord,
};
pub use store::{
    SNAPSHOT_VERSION, Snapshot, SnapshotEntry, SnapshotKind, SnapshotPayload, SnapshotStore,
    StoreError, StoreResult,
};
