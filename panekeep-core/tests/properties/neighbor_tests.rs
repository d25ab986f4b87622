//! Property tests for neighbor lookups

use panekeep_core::layout::{find_bottom_neighbor, find_right_neighbor};
use panekeep_core::models::Rectangle;
use proptest::prelude::*;

use super::layouts::{tab_of, tiling};

fn is_right_of(a: &Rectangle, b: &Rectangle) -> bool {
    b.top == a.top && b.left == a.right() + 1
}

fn is_below(a: &Rectangle, b: &Rectangle) -> bool {
    b.left == a.left && b.top == a.bottom() + 1
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The right neighbor exists exactly when some pane starts one
    /// separator past the right edge on the same row.
    #[test]
    fn prop_right_neighbor_matches_geometry(rects in tiling(12)) {
        let tab = tab_of(&rects);
        for a in &rects {
            let found = find_right_neighbor(a, &tab.panes);
            let expected = rects.iter().rposition(|b| is_right_of(a, b));
            prop_assert_eq!(found, expected);
        }
    }

    /// Same for the bottom neighbor.
    #[test]
    fn prop_bottom_neighbor_matches_geometry(rects in tiling(12)) {
        let tab = tab_of(&rects);
        for a in &rects {
            let found = find_bottom_neighbor(a, &tab.panes);
            let expected = rects.iter().rposition(|b| is_below(a, b));
            prop_assert_eq!(found, expected);
        }
    }

    /// A neighbor never overlaps the pane it was found for.
    #[test]
    fn prop_neighbors_are_disjoint(rects in tiling(12)) {
        let tab = tab_of(&rects);
        for a in &rects {
            for found in [find_right_neighbor(a, &tab.panes), find_bottom_neighbor(a, &tab.panes)]
                .into_iter()
                .flatten()
            {
                prop_assert!(!a.intersects(&rects[found]));
            }
        }
    }

    /// Shifting every pane moves no neighbor relation.
    #[test]
    fn prop_neighbors_translation_invariant(rects in tiling(8), dx in 0u32..50, dy in 0u32..50) {
        let moved: Vec<Rectangle> = rects
            .iter()
            .map(|r| Rectangle::new(r.top + dy, r.left + dx, r.width, r.height))
            .collect();
        let (tab, moved_tab) = (tab_of(&rects), tab_of(&moved));
        for (a, b) in rects.iter().zip(&moved) {
            prop_assert_eq!(
                find_right_neighbor(a, &tab.panes),
                find_right_neighbor(b, &moved_tab.panes)
            );
            prop_assert_eq!(
                find_bottom_neighbor(a, &tab.panes),
                find_bottom_neighbor(b, &moved_tab.panes)
            );
        }
    }
}
