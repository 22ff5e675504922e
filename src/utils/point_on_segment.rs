use crate::math::{Point2, Real};

/// Location of a point relative to a segment.
#[derive(PartialEq, Debug, Copy, Clone)]
pub enum PointOnLine {
    /// The point is within tolerance of the first (0) or second (1) endpoint.
    OnVertex(u32),
    /// The point is within tolerance of the segment interior.
    ///
    /// The value is the parameter of the orthogonal projection of the point, in `(0, 1)`.
    Inside(Real),
    /// The point is farther than the tolerance from the segment.
    Outside,
}

/// Classifies `p` against the segment `a, b`.
pub fn classify_point_on_segment2d(
    p: &Point2<Real>,
    a: &Point2<Real>,
    b: &Point2<Real>,
    tolerance: Real,
) -> PointOnLine {
    let tol2 = tolerance * tolerance;

    if na::distance_squared(p, a) <= tol2 {
        return PointOnLine::OnVertex(0);
    }

    if na::distance_squared(p, b) <= tol2 {
        return PointOnLine::OnVertex(1);
    }

    let ab = b - a;
    let len2 = ab.norm_squared();

    if len2 <= tol2 {
        return PointOnLine::Outside;
    }

    let ap = p - a;
    let t = ap.dot(&ab) / len2;

    if t <= 0.0 || t >= 1.0 {
        return PointOnLine::Outside;
    }

    if (ap - ab * t).norm_squared() <= tol2 {
        PointOnLine::Inside(t)
    } else {
        PointOnLine::Outside
    }
}
