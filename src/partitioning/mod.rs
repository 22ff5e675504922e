//! Spatial partitioning tools.

pub use self::cell_locator::{CellBoundsQuery, CellLocator};
pub use self::merge_points::{MergePoints, PointMerger};

mod cell_locator;
mod merge_points;
