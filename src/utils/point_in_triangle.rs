//! Tolerance-based classification of a point against a triangle projected on the XY plane.

use crate::math::{Point2, Real};

/// Local vertex indices of the edges of a triangle.
///
/// With vertices `v0, v1, v2`, the edge `e0` is `v0 -> v1`, `e1` is `v1 -> v2` and `e2` is
/// `v2 -> v0`.
pub const TRIANGLE_EDGES: [(usize, usize); 3] = [(0, 1), (1, 2), (2, 0)];

/// Location of a point relative to a triangle.
#[derive(Eq, PartialEq, Debug, Copy, Clone)]
pub enum PointInTriangle {
    /// The point is within tolerance of the given vertex.
    OnVertex(u32),
    /// The point is within tolerance of the given edge (see [`TRIANGLE_EDGES`]) but not of any
    /// vertex.
    OnEdge(u32),
    /// The point lies strictly inside of the triangle.
    Inside,
    /// The point lies outside of the triangle.
    Outside,
    /// The triangle is a sliver: its area is smaller than the tolerance.
    Degenerate,
}

/// Twice the signed area of the triangle `a, b, c`. Positive if the triangle is counter-clockwise.
#[inline]
pub fn signed_area2(a: &Point2<Real>, b: &Point2<Real>, c: &Point2<Real>) -> Real {
    (b - a).perp(&(c - a))
}

/// Squared distance from `p` to the segment `a, b`.
pub fn distance_to_segment_squared(p: &Point2<Real>, a: &Point2<Real>, b: &Point2<Real>) -> Real {
    let ab = b - a;
    let ap = p - a;
    let len2 = ab.norm_squared();

    if len2 == 0.0 {
        return ap.norm_squared();
    }

    let t = (ap.dot(&ab) / len2).clamp(0.0, 1.0);
    (ap - ab * t).norm_squared()
}

/// Classifies the point `p` against the triangle `a, b, c`.
///
/// Vertex proximity is tested first, then edge proximity, then the side of each edge. The
/// triangle may have any orientation. `tolerance` is an absolute distance, except for the
/// degeneracy check where it bounds the triangle area.
pub fn classify_point_in_triangle2d(
    p: &Point2<Real>,
    a: &Point2<Real>,
    b: &Point2<Real>,
    c: &Point2<Real>,
    tolerance: Real,
) -> PointInTriangle {
    let area2 = signed_area2(a, b, c);

    if area2.abs() * 0.5 < tolerance {
        return PointInTriangle::Degenerate;
    }

    let vertices = [a, b, c];
    let tol2 = tolerance * tolerance;

    for (k, vtx) in vertices.iter().enumerate() {
        if na::distance_squared(p, vtx) <= tol2 {
            return PointInTriangle::OnVertex(k as u32);
        }
    }

    for (k, (i, j)) in TRIANGLE_EDGES.iter().enumerate() {
        if distance_to_segment_squared(p, vertices[*i], vertices[*j]) <= tol2 {
            return PointInTriangle::OnEdge(k as u32);
        }
    }

    // Orient the side tests so that the inside is always on the left.
    let sign = area2.signum();
    let inside = TRIANGLE_EDGES
        .iter()
        .all(|(i, j)| sign * signed_area2(vertices[*i], vertices[*j], p) > 0.0);

    if inside {
        PointInTriangle::Inside
    } else {
        PointInTriangle::Outside
    }
}

/// Barycentric coordinates of `p` relative to the triangle `a, b, c`.
///
/// Returns `None` if the triangle is flat.
pub fn barycentric_coordinates2d(
    p: &Point2<Real>,
    a: &Point2<Real>,
    b: &Point2<Real>,
    c: &Point2<Real>,
) -> Option<[Real; 3]> {
    let area2 = signed_area2(a, b, c);

    if area2 == 0.0 {
        return None;
    }

    let wa = signed_area2(b, c, p) / area2;
    let wb = signed_area2(c, a, p) / area2;
    Some([wa, wb, 1.0 - wa - wb])
}
