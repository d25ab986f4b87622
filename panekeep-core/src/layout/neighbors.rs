//! Geometry index: adjacent-pane queries over captured rectangles
//!
//! A pane created by splitting `r` to the right starts on the same row,
//! one separator cell past `r`'s right edge; a pane split off below starts
//! in the same column one separator row past `r`'s bottom edge.
//!
//! When several candidates match, the one with the highest index wins.
//! Only degenerate (duplicated) rectangles can produce several matches.

use crate::models::{PaneRecord, Rectangle};

fn is_right_of(r: &Rectangle, p: &Rectangle) -> bool {
    p.top == r.top && p.left == r.right_neighbor_left()
}

fn is_below(r: &Rectangle, p: &Rectangle) -> bool {
    p.left == r.left && p.top == r.bottom_neighbor_top()
}

fn last_match(
    panes: &[PaneRecord],
    skip: impl Fn(usize) -> bool,
    matches: impl Fn(&Rectangle) -> bool,
) -> Option<usize> {
    panes
        .iter()
        .enumerate()
        .rev()
        .find(|(i, p)| !skip(*i) && matches(&p.rectangle))
        .map(|(i, _)| i)
}

/// Index of the pane directly to the right of `r`.
#[must_use]
pub fn find_right_neighbor(r: &Rectangle, panes: &[PaneRecord]) -> Option<usize> {
    find_right_neighbor_where(r, panes, |_| false)
}

/// Index of the pane directly below `r`.
#[must_use]
pub fn find_bottom_neighbor(r: &Rectangle, panes: &[PaneRecord]) -> Option<usize> {
    find_bottom_neighbor_where(r, panes, |_| false)
}

/// Like [`find_right_neighbor`], ignoring indices for which `skip` is true.
pub fn find_right_neighbor_where(
    r: &Rectangle,
    panes: &[PaneRecord],
    skip: impl Fn(usize) -> bool,
) -> Option<usize> {
    last_match(panes, skip, |p| is_right_of(r, p))
}

/// Like [`find_bottom_neighbor`], ignoring indices for which `skip` is true.
pub fn find_bottom_neighbor_where(
    r: &Rectangle,
    panes: &[PaneRecord],
    skip: impl Fn(usize) -> bool,
) -> Option<usize> {
    last_match(panes, skip, |p| is_below(r, p))
}
