//! Property tests for split planning

use std::collections::{BTreeSet, HashMap};

use panekeep_core::layout::{
    ActivationError, DryRun, SplitBackend, SplitError, SplitInstruction, SplitPlanner, plan_tab,
};
use panekeep_core::models::{PaneRecord, Rectangle, TabRecord};
use panekeep_core::host::HostError;
use proptest::prelude::*;

use super::layouts::{tab_of, tiling};

/// Dry-run backend whose split towards one record index fails.
struct FailOn(usize);

impl SplitBackend for FailOn {
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
        if instruction.target == self.0 {
            Err(SplitError::Host(HostError::Rejected("injected".into())))
        } else {
            Ok(instruction.target)
        }
    }
}

/// Keeps the anchor first and reorders the rest by `keys`.
fn shuffle_tail(rects: &[Rectangle], keys: &[u32]) -> Vec<Rectangle> {
    let mut tail: Vec<(u32, Rectangle)> = rects[1..]
        .iter()
        .enumerate()
        .map(|(i, r)| (keys.get(i).copied().unwrap_or(0), *r))
        .collect();
    tail.sort_by_key(|(k, _)| *k);
    std::iter::once(rects[0])
        .chain(tail.into_iter().map(|(_, r)| r))
        .collect()
}

fn targets(plan: &[SplitInstruction]) -> BTreeSet<usize> {
    plan.iter().map(|i| i.target).collect()
}

/// Whether `record` descends from `k` in the plan's parent chain.
fn descends_from(parents: &HashMap<usize, usize>, mut record: usize, k: usize) -> bool {
    loop {
        if record == k {
            return true;
        }
        match parents.get(&record) {
            Some(&p) => record = p,
            None => return false,
        }
    }
}

// ========== Coverage ==========

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every non-anchor pane of a split-built layout is created exactly once.
    #[test]
    fn prop_plan_covers_every_pane_once(rects in tiling(12)) {
        let tab = tab_of(&rects);
        let plan = plan_tab(&tab);

        prop_assert_eq!(plan.len(), rects.len() - 1);
        let expected: BTreeSet<usize> = (1..rects.len()).collect();
        prop_assert_eq!(targets(&plan), expected);
    }

    /// Coverage does not depend on the order panes were recorded in.
    #[test]
    fn prop_plan_coverage_ignores_record_order(
        rects in tiling(10),
        keys in prop::collection::vec(any::<u32>(), 10),
    ) {
        let shuffled = shuffle_tail(&rects, &keys);
        let plan = plan_tab(&tab_of(&shuffled));

        let expected: BTreeSet<usize> = (1..shuffled.len()).collect();
        prop_assert_eq!(targets(&plan), expected);
    }

    /// A parent is always created before it is split.
    #[test]
    fn prop_parents_precede_children(rects in tiling(12)) {
        let plan = plan_tab(&tab_of(&rects));
        let mut live = vec![0usize];
        for step in &plan {
            prop_assert!(step.parent < live.len());
            prop_assert_eq!(live[step.parent], step.parent_record);
            live.push(step.target);
        }
    }
}

// ========== Determinism ==========

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Planning the same record twice, or after a JSON round trip, yields
    /// the same instructions.
    #[test]
    fn prop_plan_is_deterministic(rects in tiling(12)) {
        let tab = tab_of(&rects);
        let first = plan_tab(&tab);
        prop_assert_eq!(&first, &plan_tab(&tab));

        let json = serde_json::to_string(&tab).unwrap();
        let reloaded: TabRecord = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(&first, &plan_tab(&reloaded));
    }

    /// Planned ratios are usable split sizes.
    #[test]
    fn prop_ratios_in_unit_interval(rects in tiling(12)) {
        for step in plan_tab(&tab_of(&rects)) {
            prop_assert!(step.size_ratio > 0.0 && step.size_ratio <= 1.0, "{:?}", step);
        }
    }

    /// A single pane needs no splits whatever its size.
    #[test]
    fn prop_single_pane_is_a_leaf(w in 1u32..500, h in 1u32..300) {
        let tab = tab_of(&[Rectangle::new(0, 0, w, h)]);
        prop_assert!(plan_tab(&tab).is_empty());
    }
}

// ========== Partial failure ==========

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A failed split loses only the target and its descendants; every
    /// other pane is still created.
    #[test]
    fn prop_failed_split_is_contained(rects in tiling(12), pick in any::<prop::sample::Index>()) {
        let tab = tab_of(&rects);
        let full = plan_tab(&tab);
        prop_assume!(!full.is_empty());
        let k = full[pick.index(full.len())].target;
        let parents: HashMap<usize, usize> =
            full.iter().map(|i| (i.target, i.parent_record)).collect();

        let outcome = SplitPlanner::new(&tab).run(&mut FailOn(k), 0);

        prop_assert_eq!(outcome.failed.len(), 1);
        prop_assert_eq!(outcome.failed[0].instruction.target, k);
        prop_assert!(!outcome.records.contains(&k));
        for r in 0..rects.len() {
            if !descends_from(&parents, r, k) {
                prop_assert!(outcome.records.contains(&r), "record {} lost", r);
            }
        }
    }

    /// Records and live panes stay parallel.
    #[test]
    fn prop_outcome_records_parallel_panes(rects in tiling(12)) {
        let tab = tab_of(&rects);
        let outcome = SplitPlanner::new(&tab).run(&mut DryRun, 0);
        prop_assert!(outcome.is_complete());
        prop_assert_eq!(&outcome.panes, &outcome.records);
        prop_assert_eq!(outcome.executed.len() + 1, outcome.panes.len());
    }
}
