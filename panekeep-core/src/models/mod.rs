//! Data model for captured layouts
//!
//! - [`Rectangle`] - pane geometry in grid cells
//! - [`PaneRecord`], [`TabRecord`], [`WindowRecord`], [`WorkspaceRecord`] -
//!   the captured record tree, serialized as-is into snapshots

mod geometry;
mod records;

pub use geometry::{Rectangle, SEPARATOR_CELLS};
pub use records::{
    PaneRecord, ProcessInfo, TabRecord, TilingReport, WindowRecord, WorkspaceRecord,
};
