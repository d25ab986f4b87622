//! Property tests for restoring into the in-memory host

use panekeep_core::host::{MemoryHost, TabId};
use panekeep_core::layout::{
    ActivationConfig, ActivationGuard, RestoreTarget, Restorer, TabRestoreReport,
};
use panekeep_core::models::{PaneRecord, Rectangle, TabRecord};
use proptest::prelude::*;

use super::layouts::{tab_of, tiling};

fn restore(host: &mut MemoryHost, tab: &TabRecord) -> TabRestoreReport {
    Restorer::new(host)
        .with_guard(ActivationGuard::new(ActivationConfig::immediate()))
        .restore_tab(tab, RestoreTarget::NewWindow { workspace: None })
        .unwrap()
}

fn restored_tab(host: &MemoryHost, tab: &TabId) -> TabRecord {
    tab_of(
        &host
            .panes_in_tab(tab)
            .iter()
            .map(|p| p.rectangle)
            .collect::<Vec<_>>(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Two side-by-side panes come back within one cell of their widths.
    #[test]
    fn prop_two_pane_width_round_trip(a in 2u32..120, b in 2u32..120, h in 2u32..60) {
        let tab = TabRecord::new(
            "t",
            vec![
                PaneRecord::new("0", Rectangle::new(0, 0, a, h), "file:///tmp"),
                PaneRecord::new("1", Rectangle::new(0, a + 1, b, h), "file:///tmp"),
            ],
        );
        let mut host = MemoryHost::new().with_tab_size(a + b + 1, h);
        let report = restore(&mut host, &tab);
        prop_assert!(report.is_complete());

        let tab_id = report.tab_id.unwrap();
        let panes = host.panes_in_tab(&tab_id);
        prop_assert_eq!(panes.len(), 2);
        let right = panes[1].rectangle;
        prop_assert!(right.width.abs_diff(b) <= 1, "wanted {}, got {}", b, right.width);
        prop_assert_eq!(right.height, h);
    }

    /// Restoring into a tab of a different width keeps the saved
    /// proportion rather than the saved cell count.
    #[test]
    fn prop_ratio_survives_resized_tab(
        a in 2u32..120,
        b in 2u32..120,
        w in 10u32..400,
        h in 2u32..60,
    ) {
        let tab = TabRecord::new(
            "t",
            vec![
                PaneRecord::new("0", Rectangle::new(0, 0, a, h), "file:///tmp"),
                PaneRecord::new("1", Rectangle::new(0, a + 1, b, h), "file:///tmp"),
            ],
        );
        let mut host = MemoryHost::new().with_tab_size(w, h);
        let report = restore(&mut host, &tab);
        prop_assert!(report.is_complete());

        let ratio = report.executed[0].size_ratio;
        let expected = (ratio * f64::from(w - 1)).round() as u32;
        let panes = host.panes_in_tab(&report.tab_id.unwrap());
        let right = panes[1].rectangle;
        prop_assert!(
            right.width.abs_diff(expected) <= 1,
            "ratio {}: wanted {}, got {}", ratio, expected, right.width
        );
        prop_assert_eq!(panes[0].rectangle.width + right.width + 1, w);
    }

    /// Same for stacked panes.
    #[test]
    fn prop_two_pane_height_round_trip(a in 2u32..60, b in 2u32..60, w in 2u32..120) {
        let tab = TabRecord::new(
            "t",
            vec![
                PaneRecord::new("0", Rectangle::new(0, 0, w, a), "file:///tmp"),
                PaneRecord::new("1", Rectangle::new(a + 1, 0, w, b), "file:///tmp"),
            ],
        );
        let mut host = MemoryHost::new().with_tab_size(w, a + b + 1);
        let report = restore(&mut host, &tab);

        let panes = host.panes_in_tab(&report.tab_id.unwrap());
        prop_assert!(panes[1].rectangle.height.abs_diff(b) <= 1);
    }

    /// Whatever the host accepts, the restored tab stays tiled and the
    /// report accounts for every pane it created.
    #[test]
    fn prop_restore_keeps_tab_tiled(rects in tiling(10)) {
        let tab = tab_of(&rects);
        let bounds = Rectangle::bounding(&rects).unwrap();
        let mut host = MemoryHost::new().with_tab_size(bounds.width, bounds.height);
        let report = restore(&mut host, &tab);

        let tab_id = report.tab_id.clone().unwrap();
        prop_assert_eq!(host.pane_count(), report.panes_created + 1);
        prop_assert_eq!(report.executed.len(), report.panes_created);

        let restored = restored_tab(&host, &tab_id);
        let tiling = restored.tiling_report().unwrap();
        prop_assert!(tiling.is_tiled(), "{:?}", tiling);
        prop_assert_eq!(tiling.bounds, bounds);
    }

    /// A one-pane tab restores without any split.
    #[test]
    fn prop_leaf_restore_spawns_only(w in 1u32..300, h in 1u32..100) {
        let tab = tab_of(&[Rectangle::new(0, 0, w, h)]);
        let mut host = MemoryHost::new();
        let report = restore(&mut host, &tab);
        prop_assert!(report.executed.is_empty());
        prop_assert_eq!(host.pane_count(), 1);
    }
}
