//! Activation guard
//!
//! Multiplexer split primitives act on the active pane, and focus changes
//! propagate asynchronously. Before each split the guard makes the intended
//! parent active and waits until the host confirms it:
//!
//! ```text
//! lookup ──► settle ──► activate ──► Requested ──► Confirmed
//!                                        │
//!                                        └───────► TimedOut
//! ```
//!
//! Hosts without a focus signal get a single bounded settle wait instead of
//! polling.

use std::thread;
use std::time::{Duration, Instant};

use crate::host::{MuxHost, PaneId};

use super::error::ActivationError;

/// Default delay before requesting activation, in milliseconds
pub const DEFAULT_SETTLE_MS: u64 = 150;

/// Default interval between focus polls, in milliseconds
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 25;

/// Default time to wait for focus confirmation, in milliseconds
pub const DEFAULT_ACTIVATION_TIMEOUT_MS: u64 = 500;

/// Timing of the activation guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationConfig {
    /// Wait before requesting activation (and after it, when the host
    /// cannot confirm focus)
    pub settle: Duration,
    /// Interval between confirmation polls
    pub poll_interval: Duration,
    /// Give up confirming after this long
    pub timeout: Duration,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(DEFAULT_SETTLE_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            timeout: Duration::from_millis(DEFAULT_ACTIVATION_TIMEOUT_MS),
        }
    }
}

impl ActivationConfig {
    /// Creates a configuration with default timings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// No waiting at all; for hosts that apply focus synchronously.
    #[must_use]
    pub const fn immediate() -> Self {
        Self {
            settle: Duration::ZERO,
            poll_interval: Duration::ZERO,
            timeout: Duration::ZERO,
        }
    }

    /// Sets the settle delay
    #[must_use]
    pub const fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Sets the poll interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the confirmation timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// State of a focus request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    /// Activation requested, not yet observed
    Requested,
    /// The host reports the pane as active
    Confirmed,
    /// The host never reported the pane as active
    TimedOut,
}

/// The pane the restore loop believes is active.
///
/// Written only by successful activations and splits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusContext {
    active: Option<PaneId>,
    activations: usize,
}

impl FocusContext {
    /// Creates a context with no known active pane.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The pane last confirmed or created.
    #[must_use]
    pub fn active(&self) -> Option<&PaneId> {
        self.active.as_ref()
    }

    /// Number of confirmed activations.
    #[must_use]
    pub const fn activations(&self) -> usize {
        self.activations
    }

    /// Records a confirmed activation.
    pub fn confirm(&mut self, pane: PaneId) {
        self.active = Some(pane);
        self.activations += 1;
    }

    /// Records that a split made `pane` active.
    pub fn focus_moved_to(&mut self, pane: PaneId) {
        self.active = Some(pane);
    }
}

/// Makes panes active before they are split.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivationGuard {
    config: ActivationConfig,
}

impl ActivationGuard {
    /// Creates a guard with the given timings.
    #[must_use]
    pub const fn new(config: ActivationConfig) -> Self {
        Self { config }
    }

    /// The guard's timings.
    #[must_use]
    pub const fn config(&self) -> &ActivationConfig {
        &self.config
    }

    /// Makes `pane` the active pane and waits for the host to confirm.
    ///
    /// # Errors
    ///
    /// - [`ActivationError::NoPane`] if `pane` is `None`
    /// - [`ActivationError::PaneGone`] if the host no longer knows the pane
    /// - [`ActivationError::Host`] if any host call fails
    /// - [`ActivationError::TimedOut`] if focus is never confirmed
    pub fn activate<H: MuxHost>(
        &self,
        host: &mut H,
        focus: &mut FocusContext,
        pane: Option<&H::Pane>,
    ) -> Result<(), ActivationError> {
        let pane = pane.ok_or(ActivationError::NoPane)?;
        let id = host.pane_id(pane);
        let live = host
            .lookup_pane(&id)?
            .ok_or_else(|| ActivationError::PaneGone(id.clone()))?;

        sleep(self.config.settle);
        host.activate(&live)?;

        match self.await_focus(host, &live)? {
            FocusState::Confirmed => {
                tracing::trace!(pane = %id, "activation confirmed");
                focus.confirm(id);
                Ok(())
            }
            FocusState::Requested | FocusState::TimedOut => Err(ActivationError::TimedOut(id)),
        }
    }

    /// Polls the host until the request is confirmed or times out.
    fn await_focus<H: MuxHost>(
        &self,
        host: &H,
        pane: &H::Pane,
    ) -> Result<FocusState, ActivationError> {
        let deadline = Instant::now() + self.config.timeout;
        let mut state = FocusState::Requested;
        while state == FocusState::Requested {
            state = match host.is_active(pane)? {
                None => {
                    sleep(self.config.settle);
                    FocusState::Confirmed
                }
                Some(true) => FocusState::Confirmed,
                Some(false) if Instant::now() >= deadline => FocusState::TimedOut,
                Some(false) => {
                    sleep(self.config.poll_interval);
                    FocusState::Requested
                }
            };
        }
        Ok(state)
    }
}

fn sleep(duration: Duration) {
    if !duration.is_zero() {
        thread::sleep(duration);
    }
}
