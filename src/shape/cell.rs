use smallvec::SmallVec;

/// The type of a [`Cell`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum CellType {
    /// A triangle.
    Triangle,
    /// A line segment or a polyline.
    Line,
    /// An arbitrary polygon.
    Polygon,
}

/// A cell of a [`SurfaceMesh`](crate::shape::SurfaceMesh), given by the ids of its points.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum Cell {
    /// A triangle. This is the only kind of cell that can be cut by loops.
    Triangle([u32; 3]),
    /// A line (two points) or a polyline (more than two points).
    ///
    /// Lines are constraints: they are split where loops cross them but are never removed.
    Line(Vec<u32>),
    /// A closed polygon with at least three points.
    ///
    /// Polygons of a loop mesh define the cutting loops. Polygons of the cut surface are passed
    /// through untouched.
    Polygon(Vec<u32>),
}

impl Cell {
    /// The type of this cell.
    pub fn cell_type(&self) -> CellType {
        match self {
            Cell::Triangle(_) => CellType::Triangle,
            Cell::Line(_) => CellType::Line,
            Cell::Polygon(_) => CellType::Polygon,
        }
    }

    /// The ids of the points of this cell.
    pub fn point_ids(&self) -> &[u32] {
        match self {
            Cell::Triangle(ids) => ids,
            Cell::Line(ids) | Cell::Polygon(ids) => ids,
        }
    }

    /// Can this cell be split by loop edges?
    pub fn is_splittable(&self) -> bool {
        matches!(self, Cell::Triangle(_) | Cell::Line(_))
    }

    /// Is this cell a closed polygon (triangles included)?
    pub fn is_closed(&self) -> bool {
        matches!(self, Cell::Triangle(_) | Cell::Polygon(_))
    }

    /// The minimum number of points this type of cell needs.
    pub fn min_point_count(&self) -> usize {
        match self {
            Cell::Triangle(_) | Cell::Polygon(_) => 3,
            Cell::Line(_) => 2,
        }
    }

    /// The edges of this cell, as pairs of point ids.
    ///
    /// Closed cells include the edge from their last point back to the first one.
    pub fn edges(&self) -> SmallVec<[[u32; 2]; 4]> {
        let ids = self.point_ids();

        if ids.len() < 2 {
            return SmallVec::new();
        }

        let mut result: SmallVec<[[u32; 2]; 4]> =
            ids.windows(2).map(|pair| [pair[0], pair[1]]).collect();

        if self.is_closed() {
            result.push([ids[ids.len() - 1], ids[0]]);
        }

        result
    }
}
