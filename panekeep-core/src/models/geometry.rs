//! Pane geometry in grid-cell units
//!
//! Multiplexers place a one-cell separator between adjacent panes, so two
//! panes that share an edge never touch: the right-hand pane starts at
//! `left + width + 1` of its neighbor.

use serde::{Deserialize, Serialize};

/// Width of the border drawn between two adjacent panes.
pub const SEPARATOR_CELLS: u32 = 1;

/// A pane rectangle in abstract grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rectangle {
    /// Row of the top edge.
    pub top: u32,
    /// Column of the left edge.
    pub left: u32,
    /// Width in cells (always > 0 for captured panes).
    pub width: u32,
    /// Height in cells (always > 0 for captured panes).
    pub height: u32,
}

impl Rectangle {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(top: u32, left: u32, width: u32, height: u32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Column one past the right edge, saturating at `u32::MAX`.
    #[must_use]
    pub const fn right(&self) -> u32 {
        self.left.saturating_add(self.width)
    }

    /// Row one past the bottom edge, saturating at `u32::MAX`.
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.top.saturating_add(self.height)
    }

    /// Number of cells covered.
    #[must_use]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns true if this rectangle has no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns true if the two rectangles share at least one cell.
    #[must_use]
    pub const fn intersects(&self, other: &Self) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }

    /// Column where a pane directly to the right of this one begins.
    #[must_use]
    pub const fn right_neighbor_left(&self) -> u32 {
        self.right().saturating_add(SEPARATOR_CELLS)
    }

    /// Row where a pane directly below this one begins.
    #[must_use]
    pub const fn bottom_neighbor_top(&self) -> u32 {
        self.bottom().saturating_add(SEPARATOR_CELLS)
    }

    /// Smallest rectangle containing every rectangle in `rects`.
    ///
    /// Returns `None` for an empty iterator.
    pub fn bounding<'a>(rects: impl IntoIterator<Item = &'a Self>) -> Option<Self> {
        let mut iter = rects.into_iter();
        let first = *iter.next()?;
        let (mut top, mut left, mut bottom, mut right) =
            (first.top, first.left, first.bottom(), first.right());
        for r in iter {
            top = top.min(r.top);
            left = left.min(r.left);
            bottom = bottom.max(r.bottom());
            right = right.max(r.right());
        }
        Some(Self::new(top, left, right - left, bottom - top))
    }
}

impl std::fmt::Display for Rectangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{}@({},{})",
            self.width, self.height, self.left, self.top
        )
    }
}
