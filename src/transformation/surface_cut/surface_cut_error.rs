use crate::math::Real;
use crate::shape::SurfaceMeshError;

/// Errors that can occur when cutting a surface with loops.
///
/// Degenerate geometry (sliver triangles, loop edges shorter than the tolerance, loops with
/// fewer than three distinct points) is not an error: the affected cells are left untouched.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SurfaceCutError {
    /// The surface to cut has no point.
    #[error("the surface to cut has no point.")]
    MissingSurfacePoints,
    /// The loop mesh has no point.
    #[error("the loop mesh has no point.")]
    MissingLoopPoints,
    /// The tolerance is not a strictly positive finite number.
    #[error("invalid tolerance {0}: it must be finite and strictly positive.")]
    InvalidTolerance(Real),
    /// The point merger given to [`SurfaceCutter::cut_with`](super::SurfaceCutter::cut_with)
    /// doesn't contain exactly the points of the surface.
    #[error("the point merger has {found} points instead of the {expected} points of the surface.")]
    PointMergerMismatch {
        /// The number of points of the surface.
        expected: usize,
        /// The number of points of the merger.
        found: usize,
    },
    /// One of the input meshes is malformed.
    #[error("SurfaceMeshError: {0}")]
    InvalidMesh(SurfaceMeshError),
}

impl From<SurfaceMeshError> for SurfaceCutError {
    fn from(value: SurfaceMeshError) -> Self {
        SurfaceCutError::InvalidMesh(value)
    }
}
