use super::assembler::{assemble, RemovalPolicy};
use super::loop_classifier::{extract_loops, Loop, LoopClassifier};
use super::splitter::{SplitOutput, Splitter};
use super::{SurfaceCutError, SurfaceCutParameters};
use crate::partitioning::{CellBoundsQuery, PointMerger};
use crate::shape::SurfaceMesh;

/// Counters collected while cutting a surface.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CutStatistics {
    /// The number of valid loops extracted from the loop mesh.
    pub num_loops: usize,
    /// The number of (loop edge, cell) pairs whose bounding boxes overlap.
    pub num_candidates: usize,
    /// The number of points added to the surface.
    pub num_inserted_points: usize,
    /// The number of cells replaced by their children.
    pub num_split_cells: usize,
    /// The number of sliver triangles touched by a loop but left untouched.
    pub num_degenerate_cells: usize,
    /// The number of cells removed from the output.
    pub num_removed_cells: usize,
}

/// Cuts triangulated surfaces with closed loops.
///
/// The loops are projected on the surface along the `z` axis. Depending on the
/// [`SurfaceCutParameters`], their edges are embedded into the surface by splitting the cells
/// they cross, and the cells on one side of the loops are removed.
///
/// # Example
///
/// ```
/// use loopcut3d::math::Point3;
/// use loopcut3d::shape::{Cell, SurfaceMesh};
/// use loopcut3d::transformation::{SurfaceCutParameters, SurfaceCutter};
///
/// let surface = SurfaceMesh::from_triangles(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(4.0, 0.0, 0.0),
///         Point3::new(0.0, 4.0, 0.0),
///     ],
///     &[[0, 1, 2]],
/// );
/// let loops = SurfaceMesh::new(
///     vec![
///         Point3::new(1.0, 1.0, 0.0),
///         Point3::new(3.0, 1.0, 0.0),
///         Point3::new(3.0, 3.0, 0.0),
///         Point3::new(1.0, 3.0, 0.0),
///     ],
///     vec![Cell::Polygon(vec![0, 1, 2, 3])],
/// );
///
/// let cutter = SurfaceCutter::new(SurfaceCutParameters::default());
/// let (cut, stats) = cutter.cut(&surface, &loops).unwrap();
///
/// // Only the part of the triangle inside of the square is kept.
/// assert_eq!(stats.num_inserted_points, 3);
/// assert!(cut.cells().len() >= 1);
/// assert!((cut.projected_area() - 2.0).abs() < 1.0e-9);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SurfaceCutter {
    params: SurfaceCutParameters,
}

impl SurfaceCutter {
    /// A cutter configured with `params`.
    pub fn new(params: SurfaceCutParameters) -> Self {
        Self { params }
    }

    /// The parameters of this cutter.
    pub fn params(&self) -> &SurfaceCutParameters {
        &self.params
    }

    /// Cuts `surface` with the polygons (and triangles) of `loops`.
    ///
    /// Both meshes are validated first. Nothing is computed if they are invalid.
    pub fn cut(
        &self,
        surface: &SurfaceMesh,
        loops: &SurfaceMesh,
    ) -> Result<(SurfaceMesh, CutStatistics), SurfaceCutError> {
        let params = &self.params;

        self.cut_impl(surface, loops, |loops| {
            Ok(
                Splitter::new(surface, params.tolerance, params.accelerate_cell_locator)
                    .split(loops),
            )
        })
    }

    /// Cuts `surface` with the polygons (and triangles) of `loops`, using the given spatial
    /// structures instead of the default ones.
    ///
    /// `cell_locator` must index the splittable cells of `surface` by their XY footprint,
    /// loosened by the tolerance. `point_merger` must contain exactly the points of `surface`,
    /// with their original ids. Both are only used when embedding the loops.
    pub fn cut_with<L: CellBoundsQuery, P: PointMerger>(
        &self,
        surface: &SurfaceMesh,
        loops: &SurfaceMesh,
        cell_locator: L,
        point_merger: P,
    ) -> Result<(SurfaceMesh, CutStatistics), SurfaceCutError> {
        let params = &self.params;

        self.cut_impl(surface, loops, move |loops| {
            if point_merger.points() != surface.points() {
                return Err(SurfaceCutError::PointMergerMismatch {
                    expected: surface.points().len(),
                    found: point_merger.points().len(),
                });
            }

            let splitter = Splitter::with_locator(
                surface,
                cell_locator,
                params.tolerance,
                params.accelerate_cell_locator,
            );
            Ok(splitter.split_with(loops, point_merger))
        })
    }

    fn cut_impl(
        &self,
        surface: &SurfaceMesh,
        loops: &SurfaceMesh,
        split: impl FnOnce(&[Loop]) -> Result<SplitOutput, SurfaceCutError>,
    ) -> Result<(SurfaceMesh, CutStatistics), SurfaceCutError> {
        let params = &self.params;

        if !params.tolerance.is_finite() || params.tolerance <= 0.0 {
            return Err(SurfaceCutError::InvalidTolerance(params.tolerance));
        }

        if surface.points().is_empty() {
            return Err(SurfaceCutError::MissingSurfacePoints);
        }

        if loops.points().is_empty() {
            return Err(SurfaceCutError::MissingLoopPoints);
        }

        surface.validate()?;
        loops.validate()?;

        let classifier = LoopClassifier::new(extract_loops(loops, params.tolerance));
        let mut stats = CutStatistics {
            num_loops: classifier.loops().len(),
            ..CutStatistics::default()
        };

        if !params.embed && !params.remove {
            log::debug!("Neither embedding nor removing: the surface is returned unchanged.");
            return Ok((surface.clone(), stats));
        }

        let split = if params.embed {
            split(classifier.loops())?
        } else {
            SplitOutput::untouched(surface)
        };

        stats.num_candidates = split.num_candidates;
        stats.num_degenerate_cells = split.num_degenerate;
        stats.num_inserted_points = split.new_point_weights.len();
        stats.num_split_cells = split.parents.iter().filter(|p| p.is_split()).count();

        let policy = RemovalPolicy {
            remove: params.remove,
            inside_out: params.inside_out,
        };
        let (result, num_removed) = assemble(surface, split, &classifier, policy);
        stats.num_removed_cells = num_removed;

        log::debug!("Surface cut: {stats:?}");

        Ok((result, stats))
    }
}

/// Cuts `surface` with the polygons (and triangles) of `loops`.
///
/// This is a shortcut for `SurfaceCutter::new(*params).cut(surface, loops)` that drops the
/// statistics.
pub fn cut_surface(
    surface: &SurfaceMesh,
    loops: &SurfaceMesh,
    params: &SurfaceCutParameters,
) -> Result<SurfaceMesh, SurfaceCutError> {
    SurfaceCutter::new(*params)
        .cut(surface, loops)
        .map(|(mesh, _)| mesh)
}
