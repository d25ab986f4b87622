//! Layout reconstruction
//!
//! This module rebuilds captured tab layouts on a live multiplexer:
//!
//! - [`neighbors`] finds adjacent rectangles
//! - [`planner`] orders the splits that rebuild a tab
//! - [`executor`] sizes and issues a single split
//! - [`activation`] focuses the parent before each split
//! - [`restore`] drives whole tabs, windows and workspaces

pub mod activation;
mod error;
pub mod executor;
pub mod neighbors;
pub mod pane_state;
pub mod planner;
pub mod restore;

pub use activation::{ActivationConfig, ActivationGuard, FocusContext, FocusState};
pub use error::{ActivationError, RestoreError, RestoreResult, SplitError};
pub use executor::{
    MIN_SIZE_RATIO, SplitExecutor, TabExtent, clamp_size_ratio, resolve_working_directory,
    size_ratio,
};
pub use neighbors::{find_bottom_neighbor, find_right_neighbor};
pub use pane_state::{NoopRestorer, PaneRestorer, ProcessRestorer};
pub use planner::{
    DryRun, FailedSplit, PlanOutcome, SkippedActivation, SplitBackend, SplitInstruction,
    SplitPlanner, plan_tab,
};
pub use restore::{
    RestoreOptions, RestoreTarget, Restorer, TabFailure, TabRestoreReport, WindowRestoreReport,
    WorkspaceRestoreReport,
};
