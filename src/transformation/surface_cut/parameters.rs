use crate::math::{Real, DEFAULT_TOLERANCE};

/// Parameters of [`SurfaceCutter`](super::SurfaceCutter).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SurfaceCutParameters {
    /// Absolute distance below which two points are considered coincident.
    ///
    /// This is used for every geometric predicate as well as for merging the inserted points.
    /// Default: `1.0e-6`.
    pub tolerance: Real,
    /// When removing cells, keep those inside of the loops instead of those outside.
    ///
    /// Default: `true`.
    pub inside_out: bool,
    /// Embed the loop edges into the surface by splitting the cells they cross.
    ///
    /// Default: `true`.
    pub embed: bool,
    /// Remove the cells on one side of the loops, as selected by `inside_out`.
    ///
    /// Default: `true`.
    pub remove: bool,
    /// Run the cell-location queries and the intersection tests on several threads.
    ///
    /// This has no effect on the result. It is ignored if the `parallel` feature is disabled.
    /// Default: `true`.
    pub accelerate_cell_locator: bool,
}

impl Default for SurfaceCutParameters {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            inside_out: true,
            embed: true,
            remove: true,
            accelerate_cell_locator: true,
        }
    }
}
