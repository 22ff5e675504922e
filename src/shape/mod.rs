//! Mesh data model: points, cells and their attributes.

pub use self::attributes::{AttributeArray, Attributes};
pub use self::cell::{Cell, CellType};
pub use self::surface_mesh::{SurfaceMesh, SurfaceMeshError};

mod attributes;
mod cell;
mod surface_mesh;
