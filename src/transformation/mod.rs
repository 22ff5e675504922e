//! Transformation of meshes.

pub use self::surface_cut::{
    cut_surface, CutStatistics, SurfaceCutError, SurfaceCutParameters, SurfaceCutter,
};

/// Cutting of triangulated surfaces with closed loops.
pub mod surface_cut;
