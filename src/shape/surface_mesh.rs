use super::{Attributes, Cell};
use crate::bounding_volume::Aabb;
use crate::math::{Point2, Point3, Real};

/// Indicated an inconsistency in the connectivity or the attributes of a surface mesh.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum SurfaceMeshError {
    /// A cell references a point that does not exist.
    #[error("the cell {cell} references the point {point} which does not exist.")]
    PointIndexOutOfBounds {
        /// The faulty cell.
        cell: u32,
        /// The out-of-bounds point id.
        point: u32,
    },
    /// A cell doesn't have enough points for its type.
    #[error("the cell {cell} has only {count} points.")]
    TooFewPoints {
        /// The faulty cell.
        cell: u32,
        /// The number of points of the cell.
        count: usize,
    },
    /// An attribute array doesn't have one tuple per point (or per cell).
    #[error("the attribute array `{name}` has {found} values instead of {expected}.")]
    AttributeSizeMismatch {
        /// The name of the faulty array.
        name: String,
        /// The expected number of values.
        expected: usize,
        /// The actual number of values.
        found: usize,
    },
}

/// A surface made of triangles, lines and polygons sharing a set of 3D points.
///
/// Point and cell attributes are optional named arrays with one tuple per point (resp. per cell).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SurfaceMesh {
    points: Vec<Point3<Real>>,
    cells: Vec<Cell>,
    point_data: Attributes,
    cell_data: Attributes,
}

impl SurfaceMesh {
    /// Creates a mesh from its points and cells, without any attribute.
    pub fn new(points: Vec<Point3<Real>>, cells: Vec<Cell>) -> Self {
        Self {
            points,
            cells,
            point_data: Attributes::new(),
            cell_data: Attributes::new(),
        }
    }

    /// Creates a triangle mesh from its points and index buffer.
    pub fn from_triangles(points: Vec<Point3<Real>>, triangles: &[[u32; 3]]) -> Self {
        Self::new(points, triangles.iter().map(|t| Cell::Triangle(*t)).collect())
    }

    /// Sets the per-point attributes of this mesh.
    pub fn with_point_data(mut self, point_data: Attributes) -> Self {
        self.point_data = point_data;
        self
    }

    /// Sets the per-cell attributes of this mesh.
    pub fn with_cell_data(mut self, cell_data: Attributes) -> Self {
        self.cell_data = cell_data;
        self
    }

    /// The points of this mesh.
    pub fn points(&self) -> &[Point3<Real>] {
        &self.points
    }

    /// The cells of this mesh.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The per-point attributes of this mesh.
    pub fn point_data(&self) -> &Attributes {
        &self.point_data
    }

    /// The per-cell attributes of this mesh.
    pub fn cell_data(&self) -> &Attributes {
        &self.cell_data
    }

    /// Iterates through the triangles of this mesh, skipping other cells.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.cells.iter().filter_map(|cell| match cell {
            Cell::Triangle(ids) => Some(*ids),
            _ => None,
        })
    }

    /// The projection of the point `id` on the XY plane.
    #[inline]
    pub fn point_xy(&self, id: u32) -> Point2<Real> {
        self.points[id as usize].xy()
    }

    /// The XY footprint of a cell.
    pub fn cell_aabb(&self, cell: &Cell) -> Aabb {
        Aabb::from_projected_points(cell.point_ids().iter().map(|i| &self.points[*i as usize]))
    }

    /// The XY area of every triangle of this mesh, summed.
    ///
    /// Each triangle is counted positively, regardless of its winding.
    pub fn projected_area(&self) -> Real {
        self.triangles()
            .map(|[a, b, c]| {
                let (a, b, c) = (self.point_xy(a), self.point_xy(b), self.point_xy(c));
                (b - a).perp(&(c - a)).abs() * 0.5
            })
            .sum()
    }

    /// Checks that every cell only references existing points and has enough of them, and that
    /// every attribute array has the right size.
    pub fn validate(&self) -> Result<(), SurfaceMeshError> {
        for (cell_id, cell) in self.cells.iter().enumerate() {
            let ids = cell.point_ids();

            if ids.len() < cell.min_point_count() {
                return Err(SurfaceMeshError::TooFewPoints {
                    cell: cell_id as u32,
                    count: ids.len(),
                });
            }

            if let Some(point) = ids.iter().find(|i| **i as usize >= self.points.len()) {
                return Err(SurfaceMeshError::PointIndexOutOfBounds {
                    cell: cell_id as u32,
                    point: *point,
                });
            }
        }

        self.point_data.validate(self.points.len())?;
        self.cell_data.validate(self.cells.len())
    }
}
