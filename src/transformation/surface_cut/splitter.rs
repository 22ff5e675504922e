use super::edge_trace::{canonical_edge, trace_line, trace_triangle, CellTrace, TraceLocation};
use super::loop_classifier::Loop;
use super::parent::{Child, Parent};
use super::triangulation::ParentTriangulation;
use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::{Point2, Point3, Real};
use crate::partitioning::{CellBoundsQuery, CellLocator, MergePoints, PointMerger};
use crate::shape::{Cell, SurfaceMesh};
use hashbrown::{HashMap, HashSet};
use ordered_float::OrderedFloat;
use smallvec::{smallvec, SmallVec};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Interpolation weights of a new point, relative to points of the input surface.
pub type PointWeights = SmallVec<[(u32, Real); 3]>;

/// The traces of one loop edge on all the cells it touches, sorted by cell id.
struct LoopEdgeTraces {
    num_candidates: usize,
    traces: Vec<(u32, CellTrace)>,
}

#[derive(Default)]
struct PendingTriangle {
    points: Vec<(u32, Point2<Real>)>,
    chords: Vec<[u32; 2]>,
}

#[derive(Default)]
struct PendingLine {
    // Segment index, parameter from the first point of the segment, point id.
    splits: Vec<(u32, Real, u32)>,
}

enum PendingSplit {
    Triangle(PendingTriangle),
    Line(PendingLine),
}

/// The result of the split of all the cells of a surface by the loop edges.
pub struct SplitOutput {
    /// One parent per cell of the input surface, indexed by cell id.
    pub parents: Vec<Parent>,
    /// The input points followed by the inserted points.
    pub points: Vec<Point3<Real>>,
    /// The interpolation weights of each inserted point. The weights of the point
    /// `points[num_input_points + i]` are `new_point_weights[i]`.
    pub new_point_weights: Vec<PointWeights>,
    /// The number of (loop edge, cell) pairs returned by the cell locator.
    pub num_candidates: usize,
    /// The number of triangles that could not be split, or only partially, because they are
    /// slivers or because some of their points were refused by the triangulation.
    pub num_degenerate: usize,
}

impl SplitOutput {
    /// The output of a split that left every cell of `surface` untouched.
    pub fn untouched(surface: &SurfaceMesh) -> Self {
        Self {
            parents: (0..surface.cells().len() as u32).map(Parent::new).collect(),
            points: surface.points().to_vec(),
            new_point_weights: Vec::new(),
            num_candidates: 0,
            num_degenerate: 0,
        }
    }
}

/// Splits the cells of a surface along loop edges.
///
/// The candidate cells of each loop edge are found with any [`CellBoundsQuery`], by default a
/// [`CellLocator`].
pub struct Splitter<'a, L = CellLocator> {
    surface: &'a SurfaceMesh,
    locator: L,
    tolerance: Real,
    parallel: bool,
}

impl<'a> Splitter<'a> {
    /// Builds the cell locator of `surface`.
    ///
    /// If `parallel` is `true` and the `parallel` feature is enabled, the loop edges are traced
    /// on several threads.
    pub fn new(surface: &'a SurfaceMesh, tolerance: Real, parallel: bool) -> Self {
        Self::with_locator(surface, CellLocator::new(surface, tolerance), tolerance, parallel)
    }
}

impl<'a, L: CellBoundsQuery> Splitter<'a, L> {
    /// A splitter finding the candidate cells of `surface` with `locator`.
    ///
    /// The footprints indexed by `locator` should be loosened by `tolerance`.
    pub fn with_locator(
        surface: &'a SurfaceMesh,
        locator: L,
        tolerance: Real,
        parallel: bool,
    ) -> Self {
        Self {
            surface,
            locator,
            tolerance,
            parallel,
        }
    }

    /// Splits every cell crossed by at least one edge of `loops`.
    ///
    /// The inserted points are deduplicated with a [`MergePoints`].
    pub fn split(&self, loops: &[Loop]) -> SplitOutput {
        self.split_with(loops, MergePoints::seeded(self.surface.points(), self.tolerance))
    }

    /// Splits every cell crossed by at least one edge of `loops`, deduplicating the inserted
    /// points with `merge`.
    ///
    /// `merge` must contain exactly the points of the surface, with their original ids.
    pub fn split_with<P: PointMerger>(&self, loops: &[Loop], mut merge: P) -> SplitOutput {
        let tol2 = self.tolerance * self.tolerance;
        let edges: Vec<_> = loops
            .iter()
            .flat_map(|l| l.edges())
            .filter(|(p, q)| na::distance_squared(p, q) > tol2)
            .collect();

        let all_traces = self.trace_loop_edges(&edges);
        let num_candidates = all_traces.iter().map(|t| t.num_candidates).sum();

        let surface_points = self.surface.points();
        let mut new_point_weights = Vec::new();
        let mut pending: HashMap<u32, PendingSplit> = HashMap::new();
        let mut degenerate = HashSet::new();

        // Point insertion is serial, in loop edge order, then cell order.
        for (cell_id, trace) in all_traces.into_iter().flat_map(|t| t.traces) {
            let mut insert = |pos: Point3<Real>, weights: PointWeights| {
                let (id, inserted) = merge.insert_or_merge(pos);
                if inserted {
                    new_point_weights.push(weights);
                }
                id
            };

            match (trace, &self.surface.cells()[cell_id as usize]) {
                (CellTrace::Degenerate, _) => {
                    if degenerate.insert(cell_id) {
                        log::debug!("The triangle {cell_id} is degenerate and won't be split.");
                    }
                }
                (CellTrace::Triangle(trace), Cell::Triangle(ids)) => {
                    let corners = ParentTriangulation::corners();
                    let pending = match pending
                        .entry(cell_id)
                        .or_insert_with(|| PendingSplit::Triangle(PendingTriangle::default()))
                    {
                        PendingSplit::Triangle(pending) => pending,
                        PendingSplit::Line(_) => continue,
                    };
                    let mut chain = SmallVec::<[u32; 8]>::new();

                    for pt in &trace.points {
                        let (id, normalized) = match pt.location {
                            TraceLocation::Vertex(k) => (ids[k as usize], corners[k as usize]),
                            TraceLocation::Edge { edge, param } => {
                                let (lo, hi) = canonical_edge(ids, edge);
                                let (id_lo, id_hi) = (ids[lo], ids[hi]);
                                let pos = surface_points[id_lo as usize].lerp(
                                    &surface_points[id_hi as usize],
                                    param,
                                );
                                let id =
                                    insert(pos, smallvec![(id_lo, 1.0 - param), (id_hi, param)]);
                                (id, corners[lo] + (corners[hi] - corners[lo]) * param)
                            }
                            TraceLocation::Interior(w) => {
                                let pos = interpolate(surface_points, ids, &w);
                                let id = insert(
                                    pos,
                                    smallvec![(ids[0], w[0]), (ids[1], w[1]), (ids[2], w[2])],
                                );
                                (id, Point2::new(w[1], w[2]))
                            }
                        };

                        pending.points.push((id, normalized));
                        chain.push(id);
                    }

                    if trace.chord {
                        pending
                            .chords
                            .extend(chain.windows(2).map(|pair| [pair[0], pair[1]]));
                    }
                }
                (CellTrace::Line(splits), Cell::Line(ids)) => {
                    let pending = match pending
                        .entry(cell_id)
                        .or_insert_with(|| PendingSplit::Line(PendingLine::default()))
                    {
                        PendingSplit::Line(pending) => pending,
                        PendingSplit::Triangle(_) => continue,
                    };

                    for split in splits {
                        let (a, b) = (ids[split.segment as usize], ids[split.segment as usize + 1]);
                        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
                        let pos = surface_points[lo as usize]
                            .lerp(&surface_points[hi as usize], split.param);
                        let id = insert(pos, smallvec![(lo, 1.0 - split.param), (hi, split.param)]);
                        let local_param = if a == lo {
                            split.param
                        } else {
                            1.0 - split.param
                        };
                        pending.splits.push((split.segment, local_param, id));
                    }
                }
                (_, cell) => log::debug!(
                    "Ignoring a trace that doesn't match the type of the cell {cell_id}: {:?}",
                    cell.cell_type()
                ),
            }
        }

        let mut parents: Vec<_> = (0..self.surface.cells().len() as u32)
            .map(Parent::new)
            .collect();

        let mut split_cells: Vec<_> = pending.into_iter().collect();
        split_cells.sort_unstable_by_key(|(cell_id, _)| *cell_id);

        for (cell_id, split) in split_cells {
            let children = match (split, &self.surface.cells()[cell_id as usize]) {
                (PendingSplit::Triangle(pending), Cell::Triangle(ids)) => {
                    let (children, num_refused) =
                        self.split_triangle(*ids, pending, &mut merge, &mut new_point_weights);

                    if num_refused > 0 {
                        log::debug!(
                            "The triangle {cell_id} was split without {num_refused} of its points."
                        );
                        let _ = degenerate.insert(cell_id);
                    }

                    children
                }
                (PendingSplit::Line(pending), Cell::Line(ids)) => {
                    split_line(ids, pending, merge.points())
                }
                _ => Vec::new(),
            };

            log::trace!("Cell {cell_id} split into {} children.", children.len());
            parents[cell_id as usize].children = children;
        }

        SplitOutput {
            parents,
            points: merge.into_points(),
            new_point_weights,
            num_candidates,
            num_degenerate: degenerate.len(),
        }
    }

    #[cfg(feature = "parallel")]
    fn trace_loop_edges(&self, edges: &[(Point2<Real>, Point2<Real>)]) -> Vec<LoopEdgeTraces> {
        if self.parallel {
            edges
                .par_iter()
                .map(|(p, q)| self.trace_loop_edge(p, q))
                .collect()
        } else {
            edges
                .iter()
                .map(|(p, q)| self.trace_loop_edge(p, q))
                .collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn trace_loop_edges(&self, edges: &[(Point2<Real>, Point2<Real>)]) -> Vec<LoopEdgeTraces> {
        if self.parallel {
            log::debug!("The `parallel` feature is disabled: tracing the loop edges serially.");
        }

        edges
            .iter()
            .map(|(p, q)| self.trace_loop_edge(p, q))
            .collect()
    }

    fn trace_loop_edge(&self, p: &Point2<Real>, q: &Point2<Real>) -> LoopEdgeTraces {
        let aabb = Aabb::from_points([*p, *q]).loosened(self.tolerance);
        let candidates = self.locator.cells_within_bounds(&aabb);
        let mut traces = Vec::new();

        for cell_id in &candidates {
            let cell = &self.surface.cells()[*cell_id as usize];
            let trace = match cell {
                Cell::Triangle(ids) => {
                    let xy = ids.map(|id| self.surface.point_xy(id));
                    trace_triangle(ids, &xy, p, q, self.tolerance)
                }
                Cell::Line(ids) => {
                    let xy: SmallVec<[_; 4]> =
                        ids.iter().map(|id| self.surface.point_xy(*id)).collect();
                    trace_line(ids, &xy, p, q, self.tolerance)
                }
                Cell::Polygon(_) => None,
            };

            if let Some(trace) = trace {
                traces.push((*cell_id, trace));
            }
        }

        LoopEdgeTraces {
            num_candidates: candidates.len(),
            traces,
        }
    }

    /// Triangulates a parent with its pending points and chords.
    ///
    /// Also returns the number of pending points refused by the triangulation. The chords
    /// ending at these points are dropped.
    fn split_triangle<P: PointMerger>(
        &self,
        ids: [u32; 3],
        pending: PendingTriangle,
        merge: &mut P,
        new_point_weights: &mut Vec<PointWeights>,
    ) -> (Vec<Child>, usize) {
        let Some(mut triangulation) = ParentTriangulation::new(ids) else {
            log::debug!("Failed to initialize the triangulation of the triangle {ids:?}.");
            return (Vec::new(), pending.points.len());
        };

        let num_refused = pending
            .points
            .iter()
            .filter(|(id, normalized)| triangulation.insert(*id, *normalized).is_none())
            .count();

        if !triangulation.is_split() {
            return (Vec::new(), num_refused);
        }

        for [a, b] in &pending.chords {
            if let (Some(ha), Some(hb)) = (triangulation.handle(*a), triangulation.handle(*b)) {
                triangulation.add_chord(ha, hb);
            }
        }

        // Vertices created where chords of overlapping loops cross.
        for (handle, normalized) in triangulation.vertices_without_id() {
            let w = [1.0 - normalized.x - normalized.y, normalized.x, normalized.y];
            let pos = interpolate(merge.points(), &ids, &w);
            let (id, inserted) = merge.insert_or_merge(pos);

            if inserted {
                new_point_weights.push(smallvec![(ids[0], w[0]), (ids[1], w[1]), (ids[2], w[2])]);
            }

            triangulation.set_id(handle, id);
        }

        let points = merge.points();
        let [a, b, c] = ids.map(|id| points[id as usize].xy());
        let area = (b - a).perp(&(c - a)).abs() * 0.5;
        let min_area2 = self.tolerance * self.tolerance / area;

        let children: Vec<_> = triangulation
            .triangles(min_area2)
            .into_iter()
            .map(|tri| {
                let xy = tri.map(|id| points[id as usize].xy());
                Child::new(&tri, &xy)
            })
            .collect();

        if children.is_empty() {
            log::debug!("The triangulation of the triangle {ids:?} collapsed.");
        }

        (children, num_refused)
    }
}

fn split_line(ids: &[u32], mut pending: PendingLine, points: &[Point3<Real>]) -> Vec<Child> {
    pending
        .splits
        .sort_by_key(|(segment, param, _)| (*segment, OrderedFloat(*param)));

    let mut chain = Vec::with_capacity(ids.len() + pending.splits.len());
    let mut splits = pending.splits.iter().peekable();

    for (k, id) in ids.iter().enumerate() {
        chain.push(*id);

        while let Some((_, _, split_id)) =
            splits.next_if(|(segment, _, _)| *segment as usize == k)
        {
            chain.push(*split_id);
        }
    }

    chain.dedup();
    chain
        .windows(2)
        .map(|pair| {
            let xy = [points[pair[0] as usize].xy(), points[pair[1] as usize].xy()];
            Child::new(pair, &xy)
        })
        .collect()
}

fn interpolate(points: &[Point3<Real>], ids: &[u32; 3], w: &[Real; 3]) -> Point3<Real> {
    Point3::from(
        points[ids[0] as usize].coords * w[0]
            + points[ids[1] as usize].coords * w[1]
            + points[ids[2] as usize].coords * w[2],
    )
}
