//! Clipping of a loop edge against a single cell of the surface.

use crate::math::{Point2, Real};
use crate::utils::{
    barycentric_coordinates2d, classify_point_in_triangle2d, classify_point_on_segment2d,
    intersect_segments2d, IntersectType, PointInTriangle, PointOnLine, TRIANGLE_EDGES,
};
use arrayvec::ArrayVec;
use ordered_float::OrderedFloat;
use smallvec::SmallVec;

/// The two loop endpoints, three edge crossings and three vertices on the loop edge.
const MAX_TRACE_POINTS: usize = 8;

/// The local indices `(lo, hi)` of the endpoints of the edge `edge` of a triangle, ordered by
/// increasing global point id.
///
/// Edge parameters are always measured from `lo` to `hi` so that the two triangles sharing an
/// edge compute the exact same coordinates for the points inserted on it.
#[inline]
pub fn canonical_edge(ids: &[u32; 3], edge: u32) -> (usize, usize) {
    let (i, j) = TRIANGLE_EDGES[edge as usize];

    if ids[i] < ids[j] {
        (i, j)
    } else {
        (j, i)
    }
}

/// Where a trace point lies on the traced triangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TraceLocation {
    /// On the vertex with the given local index. The existing point is reused.
    Vertex(u32),
    /// On the interior of an edge.
    Edge {
        /// The local index of the edge (see [`TRIANGLE_EDGES`]).
        edge: u32,
        /// The parameter along the edge, measured as defined by [`canonical_edge`].
        param: Real,
    },
    /// Strictly inside of the triangle, at the given barycentric coordinates.
    Interior([Real; 3]),
}

impl TraceLocation {
    // Vertices win over edges, edges win over the interior.
    fn priority(&self) -> u8 {
        match self {
            TraceLocation::Vertex(_) => 2,
            TraceLocation::Edge { .. } => 1,
            TraceLocation::Interior(_) => 0,
        }
    }

    fn lies_on_edge(&self, edge: usize) -> bool {
        match *self {
            TraceLocation::Vertex(v) => {
                let (i, j) = TRIANGLE_EDGES[edge];
                v as usize == i || v as usize == j
            }
            TraceLocation::Edge { edge: e, .. } => e as usize == edge,
            TraceLocation::Interior(_) => false,
        }
    }
}

/// A point where a loop edge enters, leaves or stops inside of a triangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TracePoint {
    /// The parameter of this point along the loop edge.
    pub s: Real,
    /// The XY position of this point.
    pub xy: Point2<Real>,
    /// The location of this point on the triangle.
    pub location: TraceLocation,
}

/// The part of a loop edge that lies on a triangle.
#[derive(Clone, Debug, PartialEq)]
pub struct TriangleTrace {
    /// The trace points, sorted along the loop edge, and at least `tolerance` apart.
    pub points: ArrayVec<TracePoint, MAX_TRACE_POINTS>,
    /// Do consecutive points define a chord the triangle has to be split along?
    ///
    /// This is `false` for single points and for traces running along one triangle edge.
    pub chord: bool,
}

/// A point where a loop edge crosses one segment of a line cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineSplit {
    /// The index of the segment in the polyline.
    pub segment: u32,
    /// The parameter of the split along the segment, measured from its endpoint with the lowest
    /// id to the other one.
    pub param: Real,
}

/// Result of the clipping of a loop edge against one cell.
#[derive(Clone, Debug, PartialEq)]
pub enum CellTrace {
    /// The triangle is a sliver and can't be split.
    Degenerate,
    /// The loop edge touches the triangle.
    Triangle(TriangleTrace),
    /// The loop edge crosses the line.
    Line(SmallVec<[LineSplit; 2]>),
}

/// Clips the loop edge `p, q` against the triangle with vertices `xy` and point ids `ids`.
///
/// Returns `None` if the loop edge doesn't touch the triangle, or only touches it at some of its
/// vertices (in which case nothing needs to be inserted).
pub fn trace_triangle(
    ids: &[u32; 3],
    xy: &[Point2<Real>; 3],
    p: &Point2<Real>,
    q: &Point2<Real>,
    tolerance: Real,
) -> Option<CellTrace> {
    let [a, b, c] = xy;
    let mut candidates = ArrayVec::<TracePoint, MAX_TRACE_POINTS>::new();

    for (s, endpoint) in [(0.0, p), (1.0, q)] {
        let location = match classify_point_in_triangle2d(endpoint, a, b, c, tolerance) {
            PointInTriangle::Degenerate => return Some(CellTrace::Degenerate),
            PointInTriangle::Outside => continue,
            PointInTriangle::OnVertex(k) => TraceLocation::Vertex(k),
            PointInTriangle::OnEdge(k) => {
                let (lo, hi) = canonical_edge(ids, k);
                TraceLocation::Edge {
                    edge: k,
                    param: project_on_segment(endpoint, &xy[lo], &xy[hi]),
                }
            }
            PointInTriangle::Inside => {
                let bcoords = barycentric_coordinates2d(endpoint, a, b, c)?;
                TraceLocation::Interior(bcoords)
            }
        };

        candidates.push(TracePoint {
            s,
            xy: *endpoint,
            location,
        });
    }

    for edge in 0..3u32 {
        let (lo, hi) = canonical_edge(ids, edge);

        let location = match intersect_segments2d(p, q, &xy[lo], &xy[hi], tolerance) {
            IntersectType::NoIntersection => continue,
            IntersectType::Intersect { s, t } => (s, edge_location(edge, lo, hi, t)),
            IntersectType::Junction { s, t, on_second, .. } => match on_second {
                Some(0) => (s, TraceLocation::Vertex(lo as u32)),
                Some(_) => (s, TraceLocation::Vertex(hi as u32)),
                None => (s, edge_location(edge, lo, hi, t)),
            },
        };

        let (s, location) = location;
        candidates.push(TracePoint {
            s,
            xy: location_xy(&location, xy, lo, hi),
            location,
        });
    }

    // Vertices lying on the loop edge, including the ones of edges collinear with it.
    for (k, vtx) in xy.iter().enumerate() {
        let s = match classify_point_on_segment2d(vtx, p, q, tolerance) {
            PointOnLine::OnVertex(end) => end as Real,
            PointOnLine::Inside(s) => s,
            PointOnLine::Outside => continue,
        };

        candidates.push(TracePoint {
            s,
            xy: *vtx,
            location: TraceLocation::Vertex(k as u32),
        });
    }

    candidates.sort_by_key(|pt| OrderedFloat(pt.s));

    let mut points = ArrayVec::<TracePoint, MAX_TRACE_POINTS>::new();
    let tol2 = tolerance * tolerance;

    for candidate in candidates {
        match points.last_mut() {
            Some(last) if na::distance_squared(&last.xy, &candidate.xy) <= tol2 => {
                if candidate.location.priority() > last.location.priority() {
                    *last = candidate;
                }
            }
            _ => points.push(candidate),
        }
    }

    if points
        .iter()
        .all(|pt| matches!(pt.location, TraceLocation::Vertex(_)))
    {
        // Either nothing, or only existing points that are already connected by triangle edges.
        return None;
    }

    let along_edge = (0..3).any(|e| points.iter().all(|pt| pt.location.lies_on_edge(e)));
    let chord = points.len() >= 2 && !along_edge;

    Some(CellTrace::Triangle(TriangleTrace { points, chord }))
}

/// Clips the loop edge `p, q` against the polyline with vertices `xy` and point ids `ids`.
///
/// Returns `None` if the loop edge doesn't split any segment of the polyline. Loop edges crossing
/// the polyline at one of its vertices don't split it.
pub fn trace_line(
    ids: &[u32],
    xy: &[Point2<Real>],
    p: &Point2<Real>,
    q: &Point2<Real>,
    tolerance: Real,
) -> Option<CellTrace> {
    let mut splits = SmallVec::<[LineSplit; 2]>::new();

    for (k, pair) in ids.windows(2).enumerate() {
        let (lo, hi) = if pair[0] < pair[1] {
            (xy[k], xy[k + 1])
        } else {
            (xy[k + 1], xy[k])
        };
        let len = (hi - lo).norm();

        if len <= tolerance {
            continue;
        }

        let param_tol = tolerance / len;
        let mut push_split = |param: Real| {
            let is_new = splits
                .iter()
                .all(|split| {
                    split.segment != k as u32 || (split.param - param).abs() > param_tol
                });

            if is_new {
                splits.push(LineSplit {
                    segment: k as u32,
                    param,
                });
            }
        };

        match intersect_segments2d(p, q, &lo, &hi, tolerance) {
            IntersectType::Intersect { t, .. }
            | IntersectType::Junction {
                t, on_second: None, ..
            } => push_split(t),
            IntersectType::Junction { .. } | IntersectType::NoIntersection => {}
        }

        // Loop endpoints on the segment, covering the case of collinear edges.
        for endpoint in [p, q] {
            let on_segment = classify_point_on_segment2d(endpoint, &lo, &hi, tolerance);

            if let PointOnLine::Inside(t) = on_segment {
                push_split(t);
            }
        }
    }

    (!splits.is_empty()).then_some(CellTrace::Line(splits))
}

fn edge_location(edge: u32, lo: usize, hi: usize, t: Real) -> TraceLocation {
    // A crossing snapped to an endpoint of the triangle edge is a vertex.
    if t <= 0.0 {
        TraceLocation::Vertex(lo as u32)
    } else if t >= 1.0 {
        TraceLocation::Vertex(hi as u32)
    } else {
        TraceLocation::Edge { edge, param: t }
    }
}

fn location_xy(
    location: &TraceLocation,
    xy: &[Point2<Real>; 3],
    lo: usize,
    hi: usize,
) -> Point2<Real> {
    match *location {
        TraceLocation::Vertex(k) => xy[k as usize],
        TraceLocation::Edge { param, .. } => xy[lo] + (xy[hi] - xy[lo]) * param,
        TraceLocation::Interior(w) => Point2::from(
            xy[0].coords * w[0] + xy[1].coords * w[1] + xy[2].coords * w[2],
        ),
    }
}

fn project_on_segment(pt: &Point2<Real>, a: &Point2<Real>, b: &Point2<Real>) -> Real {
    let ab = b - a;
    let len2 = ab.norm_squared();

    if len2 == 0.0 {
        0.0
    } else {
        ((pt - a).dot(&ab) / len2).clamp(0.0, 1.0)
    }
}
