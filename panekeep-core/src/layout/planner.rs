//! Split planner
//!
//! Turns the flat rectangle set of a [`TabRecord`] into an ordered sequence
//! of binary splits that rebuilds the layout from its anchor pane.
//!
//! The planner walks a worklist of live panes in creation order. For each
//! pane it looks up the right and bottom neighbor of the rectangle the pane
//! stands for, and splits those off (smaller saved index first). New panes
//! are pushed to the back of the worklist and visited in turn, so the
//! resulting order is deterministic for a given record.
//!
//! ```text
//! worklist: [P0]          P0 ─right─► P1, P0 ─bottom─► P2
//! worklist: [P0, P1, P2]  P1, P2: no unclaimed neighbors
//! ```
//!
//! The walk itself is independent of what a split does: [`SplitBackend`]
//! supplies activation and splitting. [`plan_tab`] uses a dry-run backend
//! where everything succeeds; the restore path uses the live host.

use serde::{Deserialize, Serialize};

use crate::host::SplitDirection;
use crate::models::{PaneRecord, TabRecord};

use super::error::{ActivationError, SplitError};
use super::executor::{TabExtent, size_ratio};
use super::neighbors::{find_bottom_neighbor_where, find_right_neighbor_where};

/// One planned split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitInstruction {
    /// Side of the parent the new pane appears on
    pub direction: SplitDirection,
    /// Worklist index of the live parent pane
    pub parent: usize,
    /// Index in `tab.panes` of the rectangle the parent stands for
    pub parent_record: usize,
    /// Index in `tab.panes` of the rectangle to create
    pub target: usize,
    /// Fraction of the remaining extent given to the new pane
    pub size_ratio: f64,
}

/// What the planner needs from whoever carries out the splits.
pub trait SplitBackend {
    /// Handle of a pane created by this backend
    type Pane: Clone;

    /// Makes `pane` the active pane before it is split.
    ///
    /// # Errors
    ///
    /// Returns an error if the pane cannot be activated; its pending splits
    /// are then skipped.
    fn activate(&mut self, pane: &Self::Pane) -> Result<(), ActivationError>;

    /// Splits `parent` to create `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the split fails; the target is then abandoned.
    fn split(
        &mut self,
        parent: &Self::Pane,
        instruction: &SplitInstruction,
        target: &PaneRecord,
    ) -> Result<Self::Pane, SplitError>;
}

/// A split that was attempted but did not produce a pane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedSplit {
    /// The instruction that failed
    pub instruction: SplitInstruction,
    /// Why it failed
    pub reason: String,
}

/// A worklist entry whose splits were skipped because activation failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedActivation {
    /// Worklist index of the pane
    pub parent: usize,
    /// Record index of the pane
    pub parent_record: usize,
    /// Record indices whose creation was skipped
    pub targets: Vec<usize>,
    /// Why activation failed
    pub reason: String,
}

/// Result of walking the worklist.
#[derive(Debug, Clone)]
pub struct PlanOutcome<P> {
    /// Splits that produced a pane, in execution order
    pub executed: Vec<SplitInstruction>,
    /// Live panes in creation order, anchor first
    pub panes: Vec<P>,
    /// Record index each live pane stands for, parallel to `panes`
    pub records: Vec<usize>,
    /// Splits the backend rejected
    pub failed: Vec<FailedSplit>,
    /// Panes whose splits were skipped
    pub skipped: Vec<SkippedActivation>,
}

impl<P> PlanOutcome<P> {
    /// True when every split ran.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_empty()
    }
}

/// Worklist-driven split planner for one tab.
#[derive(Debug, Clone, Copy)]
pub struct SplitPlanner<'t> {
    tab: &'t TabRecord,
    extent: TabExtent,
}

impl<'t> SplitPlanner<'t> {
    /// Creates a planner, computing the tab's extent once.
    #[must_use]
    pub fn new(tab: &'t TabRecord) -> Self {
        Self {
            tab,
            extent: TabExtent::of(tab),
        }
    }

    /// Walks the worklist starting from `anchor`, the live pane standing
    /// for `tab.panes[0]`.
    pub fn run<B: SplitBackend>(&self, backend: &mut B, anchor: B::Pane) -> PlanOutcome<B::Pane> {
        let records = &self.tab.panes;
        let mut outcome = PlanOutcome {
            executed: Vec::new(),
            panes: vec![anchor],
            records: vec![0],
            failed: Vec::new(),
            skipped: Vec::new(),
        };
        if records.is_empty() {
            outcome.panes.clear();
            outcome.records.clear();
            return outcome;
        }

        // Records already standing for a live pane, or abandoned after a
        // failed split.
        let mut claimed = vec![false; records.len()];
        claimed[0] = true;

        let mut idx = 0;
        while idx < outcome.panes.len() {
            let parent_record = outcome.records[idx];
            let rect = records[parent_record].rectangle;
            let right = find_right_neighbor_where(&rect, records, |i| claimed[i]);
            let bottom = find_bottom_neighbor_where(&rect, records, |i| claimed[i]);

            let steps = match (right, bottom) {
                (None, None) => {
                    idx += 1;
                    continue;
                }
                (Some(h), Some(v)) if v < h => {
                    vec![(SplitDirection::Bottom, v), (SplitDirection::Right, h)]
                }
                (Some(h), Some(v)) => vec![(SplitDirection::Right, h), (SplitDirection::Bottom, v)],
                (Some(h), None) => vec![(SplitDirection::Right, h)],
                (None, Some(v)) => vec![(SplitDirection::Bottom, v)],
            };

            for (step, &(direction, target)) in steps.iter().enumerate() {
                // Every split moves focus, so the parent is re-activated
                // before each one.
                let parent = outcome.panes[idx].clone();
                if let Err(e) = backend.activate(&parent) {
                    tracing::warn!(
                        parent = idx,
                        record = parent_record,
                        error = %e,
                        "activation failed, skipping splits"
                    );
                    outcome.skipped.push(SkippedActivation {
                        parent: idx,
                        parent_record,
                        targets: steps[step..].iter().map(|&(_, t)| t).collect(),
                        reason: e.to_string(),
                    });
                    break;
                }

                let instruction = SplitInstruction {
                    direction,
                    parent: idx,
                    parent_record,
                    target,
                    size_ratio: size_ratio(
                        direction,
                        self.extent,
                        &rect,
                        &records[target].rectangle,
                    ),
                };
                claimed[target] = true;
                match backend.split(&parent, &instruction, &records[target]) {
                    Ok(pane) => {
                        tracing::debug!(
                            parent = idx,
                            target,
                            %direction,
                            size_ratio = instruction.size_ratio,
                            "split executed"
                        );
                        outcome.panes.push(pane);
                        outcome.records.push(target);
                        outcome.executed.push(instruction);
                    }
                    Err(e) => {
                        tracing::warn!(
                            parent = idx,
                            target,
                            %direction,
                            error = %e,
                            "split failed"
                        );
                        outcome.failed.push(FailedSplit {
                            instruction,
                            reason: e.to_string(),
                        });
                    }
                }
            }
            idx += 1;
        }

        outcome
    }
}

/// Backend in which every activation and split succeeds.
///
/// Pane handles are the record indices they stand for.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRun;

impl SplitBackend for DryRun {
    type Pane = usize;

    fn activate(&mut self, _pane: &usize) -> Result<(), ActivationError> {
        Ok(())
    }

    fn split(
        &mut self,
        _parent: &usize,
        instruction: &SplitInstruction,
        _target: &PaneRecord,
    ) -> Result<usize, SplitError> {
        Ok(instruction.target)
    }
}

/// Plans the splits that rebuild `tab` from its anchor pane.
///
/// A tab with zero or one pane needs no splits.
#[must_use]
pub fn plan_tab(tab: &TabRecord) -> Vec<SplitInstruction> {
    SplitPlanner::new(tab).run(&mut DryRun, 0).executed
}
