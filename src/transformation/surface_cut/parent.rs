use crate::bounding_volume::Aabb;
use crate::math::{Point2, Real};
use smallvec::SmallVec;

/// A polygon resulting from the split of a [`Parent`] cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Child {
    /// The ids of the points of this child, in the winding order of its parent.
    ///
    /// Children of triangles are triangles, children of lines are 2-point segments.
    pub point_ids: SmallVec<[u32; 3]>,
    /// The centroid of the XY projection of this child.
    pub centroid: Point2<Real>,
    /// The XY footprint of this child.
    pub aabb: Aabb,
}

impl Child {
    /// Creates a child from its points ids and their XY positions.
    pub fn new(point_ids: &[u32], xy: &[Point2<Real>]) -> Self {
        let centroid = xy.iter().fold(Point2::origin(), |acc, pt| acc + pt.coords)
            / xy.len().max(1) as Real;

        Self {
            point_ids: point_ids.iter().copied().collect(),
            centroid,
            aabb: Aabb::from_points(xy.iter().copied()),
        }
    }
}

/// One cell of the surface being cut, along with the children it was split into.
#[derive(Clone, Debug, PartialEq)]
pub struct Parent {
    /// The id of the cell in the input surface.
    pub cell_id: u32,
    /// The children of this cell. Empty if the cell is left untouched.
    pub children: Vec<Child>,
}

impl Parent {
    /// A parent without children.
    pub fn new(cell_id: u32) -> Self {
        Self {
            cell_id,
            children: Vec::new(),
        }
    }

    /// Was this cell split?
    pub fn is_split(&self) -> bool {
        !self.children.is_empty()
    }
}
