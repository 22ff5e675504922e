use crate::math::{Point2, Real};

/// Tests if the given point is inside an arbitrary closed polygon with arbitrary orientation,
/// using a crossing-number strategy.
///
/// The polygon is assumed to be closed, i.e., first and last point of the polygon are implicitly
/// assumed to be connected by an edge.
///
/// Edges are treated as half-open along the `y` axis so that a polygon vertex lying exactly on
/// the horizontal ray cast from `pt` is counted once. This handles concave polygons.
pub fn point_in_poly2d(pt: &Point2<Real>, poly: &[Point2<Real>]) -> bool {
    crossing_number(pt, poly) % 2 == 1
}

/// Number of polygon edges crossed by the horizontal ray starting at `pt` toward `+x`.
pub fn crossing_number(pt: &Point2<Real>, poly: &[Point2<Real>]) -> u32 {
    if poly.is_empty() {
        return 0;
    }

    let mut crossings = 0;

    for (i, a) in poly.iter().enumerate() {
        let b = poly[(i + 1) % poly.len()];
        let seg_dir = b - a;
        let dpt = pt - a;
        let perp = dpt.perp(&seg_dir);
        crossings += match (dpt.y >= 0.0, b.y > pt.y) {
            (true, true) if perp < 0.0 => 1,
            (false, false) if perp > 0.0 => 1,
            _ => 0,
        };
    }

    crossings
}
