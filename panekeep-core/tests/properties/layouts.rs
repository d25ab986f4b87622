//! Layout generators shared by the property tests

use panekeep_core::models::{PaneRecord, Rectangle, TabRecord};
use proptest::prelude::*;

/// One random split: which pane (modulo the pane count), which side, how
/// much to give away
pub type SplitOp = (usize, bool, f64);

/// Replays `ops` on a `width` x `height` tab the way a multiplexer splits:
/// the parent keeps the top-left part, a one-cell separator follows, and
/// the new pane is appended.
pub fn build_tiling(width: u32, height: u32, ops: &[SplitOp]) -> Vec<Rectangle> {
    let mut rects = vec![Rectangle::new(0, 0, width, height)];
    for (idx, right, ratio) in ops {
        let i = idx % rects.len();
        let r = rects[i];
        let extent = if *right { r.width } else { r.height };
        if extent < 3 {
            continue;
        }
        let available = extent - 1;
        let child = ((f64::from(available) * ratio).round() as u32).clamp(1, available - 1);
        let keep = available - child;
        if *right {
            rects[i].width = keep;
            rects.push(Rectangle::new(r.top, r.left + keep + 1, child, r.height));
        } else {
            rects[i].height = keep;
            rects.push(Rectangle::new(r.top + keep + 1, r.left, r.width, child));
        }
    }
    rects
}

/// Wraps rectangles into a tab record, keeping their order.
pub fn tab_of(rects: &[Rectangle]) -> TabRecord {
    TabRecord::new(
        "generated",
        rects
            .iter()
            .enumerate()
            .map(|(i, r)| PaneRecord::new(i.to_string(), *r, "file:///tmp"))
            .collect(),
    )
}

/// Strategy for split sequences of up to `max_ops` splits
pub fn split_ops(max_ops: usize) -> impl Strategy<Value = Vec<SplitOp>> {
    prop::collection::vec((any::<usize>(), any::<bool>(), 0.2f64..0.8), 0..=max_ops)
}

/// Strategy for tiled tabs of up to `max_ops + 1` panes
pub fn tiling(max_ops: usize) -> impl Strategy<Value = Vec<Rectangle>> {
    (20u32..=240, 10u32..=120, split_ops(max_ops))
        .prop_map(|(w, h, ops)| build_tiling(w, h, &ops))
}

#[test]
fn builder_matches_hand_computed_split() {
    let ops = [(0, true, 0.5)];
    let rects = build_tiling(80, 24, &ops);
    assert_eq!(
        rects,
        vec![Rectangle::new(0, 0, 39, 24), Rectangle::new(0, 40, 40, 24)]
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Generated layouts cover their bounds exactly once.
    #[test]
    fn prop_generated_layouts_are_tiled(rects in tiling(12)) {
        let report = tab_of(&rects).tiling_report().unwrap();
        prop_assert!(report.is_tiled(), "{:?}", report);
    }
}
