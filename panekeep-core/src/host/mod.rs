//! Multiplexer host abstraction
//!
//! Reconstruction talks to the terminal multiplexer only through the
//! [`MuxHost`] trait; capture only needs [`CaptureSource`].
//!
//! # Backends
//!
//! - [`WezTermCli`] - drives a running WezTerm through `wezterm cli`
//! - [`MemoryHost`] - in-memory multiplexer with pane geometry and fault
//!   injection, used for dry runs and tests

mod error;
mod memory;
mod types;
mod wezterm;

use std::fmt;

pub use error::{HostError, HostResult};
pub use memory::{DEFAULT_TAB_SIZE, HostCall, MemoryHost, MemoryPane};
pub use types::{
    LivePane, PaneId, SpawnRequest, SpawnedTab, SplitDirection, SplitRequest, TabId, WindowId,
};
pub use wezterm::{LOCAL_DOMAIN, WezTermCli, parse_pane_list};

/// Operations on live panes, tabs and windows.
///
/// The split primitive of most multiplexers acts on "the active pane", which
/// is why reconstruction activates the parent before every split.
pub trait MuxHost {
    /// Live pane handle
    type Pane: Clone + fmt::Debug;

    /// Returns the id of a live pane.
    fn pane_id(&self, pane: &Self::Pane) -> PaneId;

    /// Looks a pane up in the host's registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be queried.
    fn lookup_pane(&self, id: &PaneId) -> HostResult<Option<Self::Pane>>;

    /// Requests that `pane` becomes the active pane.
    ///
    /// # Errors
    ///
    /// Returns an error if the host refuses or the call fails.
    fn activate(&mut self, pane: &Self::Pane) -> HostResult<()>;

    /// Reports whether `pane` is currently active.
    ///
    /// `Ok(None)` means the host offers no way to confirm focus.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot be queried.
    fn is_active(&self, pane: &Self::Pane) -> HostResult<Option<bool>>;

    /// Name of the domain the pane runs in.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot be queried.
    fn domain_name(&self, pane: &Self::Pane) -> HostResult<String>;

    /// Splits `pane`, returning the newly created pane.
    ///
    /// # Errors
    ///
    /// Returns an error if the host refuses or the call fails.
    fn split(&mut self, pane: &Self::Pane, request: &SplitRequest) -> HostResult<Self::Pane>;

    /// Spawns a new tab (or window) holding a single pane.
    ///
    /// # Errors
    ///
    /// Returns an error if the tab could not be created.
    fn spawn_tab(&mut self, request: &SpawnRequest) -> HostResult<SpawnedTab<Self::Pane>>;

    /// Sets a tab's title.
    ///
    /// # Errors
    ///
    /// Returns an error if the host refuses or the call fails.
    fn set_tab_title(&mut self, pane: &Self::Pane, title: &str) -> HostResult<()>;

    /// Sends text to a pane as if typed.
    ///
    /// # Errors
    ///
    /// Returns an error if the host refuses or the call fails.
    fn send_text(&mut self, pane: &Self::Pane, text: &str) -> HostResult<()>;
}

/// Enumerates live panes for capture.
pub trait CaptureSource {
    /// Lists every pane the host knows about, in host order.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot be queried.
    fn list_panes(&self) -> HostResult<Vec<LivePane>>;
}
