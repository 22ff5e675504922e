use crate::math::{Point2, Real};

/// Intersection between two segments `a, b` and `c, d`.
///
/// `s` is the parameter of the intersection point along the first segment, `t` along the second
/// one. Both lie in `[0, 1]`.
#[derive(PartialEq, Debug, Copy, Clone)]
pub enum IntersectType {
    /// The segments don't cross, or are parallel.
    NoIntersection,
    /// Single crossing, away from every endpoint.
    Intersect {
        /// Parameter along the first segment.
        s: Real,
        /// Parameter along the second segment.
        t: Real,
    },
    /// The crossing lands on an endpoint of at least one of the segments.
    ///
    /// No new point needs to be created for an endpoint that is already part of the mesh.
    Junction {
        /// Parameter along the first segment, snapped to 0 or 1 if `on_first` is set.
        s: Real,
        /// Parameter along the second segment, snapped to 0 or 1 if `on_second` is set.
        t: Real,
        /// The endpoint (0 for `a`, 1 for `b`) of the first segment hit by the crossing.
        on_first: Option<u32>,
        /// The endpoint (0 for `c`, 1 for `d`) of the second segment hit by the crossing.
        on_second: Option<u32>,
    },
}

/// Computes the intersection between the segments `a, b` and `c, d`.
///
/// All the tests are performed with `tolerance` as an absolute distance: the parameters are
/// allowed to go past the segment ends by `tolerance / length`, and crossings closer than
/// `tolerance` to an endpoint are reported as a [`IntersectType::Junction`]. Parallel (or
/// collinear) segments are reported as [`IntersectType::NoIntersection`]; overlaps of collinear
/// segments are better detected with
/// [`classify_point_on_segment2d`](crate::utils::classify_point_on_segment2d).
pub fn intersect_segments2d(
    a: &Point2<Real>,
    b: &Point2<Real>,
    c: &Point2<Real>,
    d: &Point2<Real>,
    tolerance: Real,
) -> IntersectType {
    let ab = b - a;
    let cd = d - c;
    let len_ab = ab.norm();
    let len_cd = cd.norm();

    if len_ab <= tolerance || len_cd <= tolerance {
        return IntersectType::NoIntersection;
    }

    let denom = ab.perp(&cd);

    // `denom / len_cd` is the distance `b` would have from the line of `cd` if `ab` started on it.
    if denom.abs() <= tolerance * len_cd || ulps_eq!(denom, 0.0) {
        return IntersectType::NoIntersection;
    }

    let ac = c - a;
    let mut s = ac.perp(&cd) / denom;
    let mut t = ac.perp(&ab) / denom;

    let s_tol = tolerance / len_ab;
    let t_tol = tolerance / len_cd;

    if s < -s_tol || s > 1.0 + s_tol || t < -t_tol || t > 1.0 + t_tol {
        return IntersectType::NoIntersection;
    }

    let pt = a + ab * s;
    let tol2 = tolerance * tolerance;

    let on_first = if na::distance_squared(&pt, a) <= tol2 {
        s = 0.0;
        Some(0)
    } else if na::distance_squared(&pt, b) <= tol2 {
        s = 1.0;
        Some(1)
    } else {
        None
    };

    let on_second = if na::distance_squared(&pt, c) <= tol2 {
        t = 0.0;
        Some(0)
    } else if na::distance_squared(&pt, d) <= tol2 {
        t = 1.0;
        Some(1)
    } else {
        None
    };

    if on_first.is_some() || on_second.is_some() {
        IntersectType::Junction {
            s: s.clamp(0.0, 1.0),
            t: t.clamp(0.0, 1.0),
            on_first,
            on_second,
        }
    } else if s <= 0.0 || s >= 1.0 || t <= 0.0 || t >= 1.0 {
        // Passing within tolerance beyond an end without touching an endpoint.
        IntersectType::NoIntersection
    } else {
        IntersectType::Intersect { s, t }
    }
}
