use crate::bounding_volume::Aabb;
use crate::math::{Point2, Real};
use crate::shape::SurfaceMesh;
use crate::utils::point_in_poly2d;

/// A closed polygon cutting the surface, projected on the XY plane.
#[derive(Clone, Debug, PartialEq)]
pub struct Loop {
    /// The id of the cell of the loop mesh this loop was extracted from.
    pub cell_id: u32,
    /// The vertices of the polygon. The last one is implicitly connected to the first one.
    pub points: Vec<Point2<Real>>,
    /// The bounding box of `points`.
    pub aabb: Aabb,
}

impl Loop {
    /// Builds a loop from the XY projection of the given points.
    ///
    /// Consecutive points closer than `tolerance`, including the last and first ones, are merged.
    /// Returns `None` if fewer than three distinct points remain.
    pub fn new(
        cell_id: u32,
        points: impl IntoIterator<Item = Point2<Real>>,
        tolerance: Real,
    ) -> Option<Self> {
        let tol2 = tolerance * tolerance;
        let mut cleaned: Vec<Point2<Real>> = Vec::new();

        for pt in points {
            if cleaned
                .last()
                .map_or(true, |last| na::distance_squared(last, &pt) > tol2)
            {
                cleaned.push(pt);
            }
        }

        while cleaned.len() > 1
            && na::distance_squared(&cleaned[0], &cleaned[cleaned.len() - 1]) <= tol2
        {
            let _ = cleaned.pop();
        }

        if cleaned.len() < 3 {
            return None;
        }

        Some(Self {
            cell_id,
            aabb: Aabb::from_points(cleaned.iter().copied()),
            points: cleaned,
        })
    }

    /// The edges of this loop.
    pub fn edges(&self) -> impl Iterator<Item = (Point2<Real>, Point2<Real>)> + '_ {
        self.points
            .iter()
            .zip(self.points.iter().cycle().skip(1))
            .map(|(a, b)| (*a, *b))
    }

    /// Does this loop contain `pt`?
    pub fn contains(&self, pt: &Point2<Real>) -> bool {
        self.aabb.contains_local_point(pt) && point_in_poly2d(pt, &self.points)
    }
}

/// Extracts the loops (polygons and triangles) of `loops`.
///
/// Other cells, and polygons without at least three distinct points, are skipped.
pub fn extract_loops(loops: &SurfaceMesh, tolerance: Real) -> Vec<Loop> {
    let mut result = Vec::new();

    for (cell_id, cell) in loops.cells().iter().enumerate() {
        if !cell.is_closed() {
            log::debug!("Ignoring the cell {cell_id} of the loop mesh: it is not a polygon.");
            continue;
        }

        let points = cell.point_ids().iter().map(|id| loops.point_xy(*id));

        match Loop::new(cell_id as u32, points, tolerance) {
            Some(l) => result.push(l),
            None => log::debug!(
                "Ignoring the loop {cell_id}: it has fewer than three distinct points."
            ),
        }
    }

    result
}

/// Counts the loops containing a point.
///
/// Nested or overlapping loops are combined by union: a point is inside as soon as one loop
/// contains it.
#[derive(Clone, Debug, Default)]
pub struct LoopClassifier {
    loops: Vec<Loop>,
}

impl LoopClassifier {
    /// A classifier for the given loops.
    pub fn new(loops: Vec<Loop>) -> Self {
        Self { loops }
    }

    /// The loops of this classifier.
    pub fn loops(&self) -> &[Loop] {
        &self.loops
    }

    /// The number of loops containing `pt`.
    pub fn inside_count(&self, pt: &Point2<Real>) -> usize {
        self.loops.iter().filter(|l| l.contains(pt)).count()
    }

    /// Is `pt` inside of at least one loop?
    pub fn is_inside(&self, pt: &Point2<Real>) -> bool {
        self.loops.iter().any(|l| l.contains(pt))
    }

    /// Should a cell with the given centroid be kept when removing cells?
    ///
    /// With `inside_out`, the cells inside of the loops are kept. Otherwise the cells outside of
    /// the loops are kept.
    pub fn keeps(&self, centroid: &Point2<Real>, inside_out: bool) -> bool {
        self.is_inside(centroid) == inside_out
    }
}
