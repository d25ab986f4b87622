//! Split executor
//!
//! Computes the size argument of a planned split, resolves the new pane's
//! working directory and issues the split against the host.

use crate::host::{MuxHost, SplitDirection, SplitRequest};
use crate::models::{PaneRecord, Rectangle, TabRecord};

use super::activation::FocusContext;
use super::error::SplitError;
use super::pane_state::PaneRestorer;
use super::planner::SplitInstruction;

/// Smallest size ratio handed to a host
pub const MIN_SIZE_RATIO: f64 = 0.01;

/// Ratio used when relative sizing is disabled
pub const EVEN_SIZE_RATIO: f64 = 0.5;

/// Overall size of a captured tab, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabExtent {
    /// Sum of widths of the top-row panes
    pub width: u32,
    /// Sum of heights of the left-column panes
    pub height: u32,
}

impl TabExtent {
    /// Extent of `tab`.
    #[must_use]
    pub fn of(tab: &TabRecord) -> Self {
        Self {
            width: tab.tab_width(),
            height: tab.tab_height(),
        }
    }
}

/// Fraction of the remaining extent the new pane should receive.
///
/// For a right split this is `1 - (target.left - parent.left) / (width -
/// parent.left)`, and the same along the vertical axis for a bottom split.
/// The result is clamped into `[MIN_SIZE_RATIO, 1]`.
#[must_use]
pub fn size_ratio(
    direction: SplitDirection,
    extent: TabExtent,
    parent: &Rectangle,
    target: &Rectangle,
) -> f64 {
    let (origin, offset, total) = match direction {
        SplitDirection::Right => (parent.left, target.left, extent.width),
        SplitDirection::Bottom => (parent.top, target.top, extent.height),
    };
    let available = f64::from(total) - f64::from(origin);
    let ratio = 1.0 - (f64::from(offset) - f64::from(origin)) / available;
    clamp_size_ratio(ratio)
}

/// Clamps `ratio` into `[MIN_SIZE_RATIO, 1]`; non-finite input yields
/// `MIN_SIZE_RATIO`.
#[must_use]
pub fn clamp_size_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() {
        ratio.clamp(MIN_SIZE_RATIO, 1.0)
    } else {
        MIN_SIZE_RATIO
    }
}

/// Extracts a local path from a working-directory URI.
///
/// Accepts `file://host/path`, `file:///path` and bare absolute paths.
/// Percent-escapes are decoded. Other schemes and empty paths yield `None`.
#[must_use]
pub fn resolve_working_directory(uri: &str) -> Option<String> {
    let uri = uri.trim();
    let path = if let Some(rest) = uri.strip_prefix("file://") {
        // Host part runs up to the first slash of the path
        &rest[rest.find('/')?..]
    } else if uri.starts_with('/') {
        uri
    } else {
        return None;
    };
    let decoded = percent_decode(path);
    if decoded.is_empty() {
        None
    } else {
        Some(decoded)
    }
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes
                .get(i + 1..i + 3)
                .filter(|h| h.iter().all(u8::is_ascii_hexdigit))
                .and_then(|h| std::str::from_utf8(h).ok());
            if let Some(b) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                out.push(b);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Carries out planned splits against a live host.
pub struct SplitExecutor<'r, H: MuxHost> {
    restorer: &'r dyn PaneRestorer<H>,
    relative_sizes: bool,
}

impl<H: MuxHost> std::fmt::Debug for SplitExecutor<'_, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplitExecutor")
            .field("relative_sizes", &self.relative_sizes)
            .finish_non_exhaustive()
    }
}

impl<'r, H: MuxHost> SplitExecutor<'r, H> {
    /// Creates an executor handing new panes to `restorer`.
    #[must_use]
    pub fn new(restorer: &'r dyn PaneRestorer<H>) -> Self {
        Self {
            restorer,
            relative_sizes: true,
        }
    }

    /// Uses even splits instead of the planned ratios when `false`.
    #[must_use]
    pub const fn with_relative_sizes(mut self, enabled: bool) -> Self {
        self.relative_sizes = enabled;
        self
    }

    /// Builds the host request for `instruction`.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::InvalidRatio`] if the instruction's ratio lies
    /// outside `(0, 1]`, or [`SplitError::Host`] if the parent's domain
    /// cannot be queried.
    pub fn request(
        &self,
        host: &H,
        parent: &H::Pane,
        instruction: &SplitInstruction,
        target: &PaneRecord,
    ) -> Result<SplitRequest, SplitError> {
        let ratio = instruction.size_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(SplitError::InvalidRatio(ratio));
        }
        let domain = host.domain_name(parent)?;
        Ok(SplitRequest {
            direction: instruction.direction,
            cwd: resolve_working_directory(&target.working_directory),
            domain: Some(domain),
            size_ratio: if self.relative_sizes {
                ratio
            } else {
                EVEN_SIZE_RATIO
            },
        })
    }

    /// Splits `parent` to create the pane described by `target`.
    ///
    /// On success the new pane becomes the active one in `focus` and is
    /// passed to the pane restorer; restorer failures are only logged.
    ///
    /// # Errors
    ///
    /// See [`Self::request`]; host split failures are returned as
    /// [`SplitError::Host`].
    pub fn execute(
        &self,
        host: &mut H,
        focus: &mut FocusContext,
        parent: &H::Pane,
        instruction: &SplitInstruction,
        target: &PaneRecord,
    ) -> Result<H::Pane, SplitError> {
        let request = self.request(host, parent, instruction, target)?;
        let pane = host.split(parent, &request)?;
        let id = host.pane_id(&pane);
        focus.focus_moved_to(id.clone());

        if let Err(e) = self.restorer.restore_pane(host, &pane, target) {
            tracing::warn!(pane = %id, record = %target.id, error = %e, "pane state not restored");
        }
        Ok(pane)
    }
}
