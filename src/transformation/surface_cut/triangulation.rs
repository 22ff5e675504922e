use crate::math::{Point2, Real};
use crate::utils::{sanitize_spade_point, signed_area2};
use hashbrown::HashMap;
use spade::{
    handles::FixedVertexHandle, ConstrainedDelaunayTriangulation, Point2 as SpadePoint,
    Triangulation as _,
};

/// Constrained Delaunay triangulation of a single triangle with the points and chords inserted
/// by the loop edges crossing it.
///
/// The triangulation is computed in the normalized frame of the triangle, where its three
/// vertices are mapped to `(0, 0)`, `(1, 0)` and `(0, 1)`. The normalized coordinates `(u, v)`
/// of a point are the barycentric weights of the second and third vertices.
pub struct ParentTriangulation {
    delaunay: ConstrainedDelaunayTriangulation<SpadePoint<Real>>,
    handle_ids: Vec<Option<u32>>,
    id_handles: HashMap<u32, FixedVertexHandle>,
}

impl ParentTriangulation {
    /// Initializes the triangulation of the triangle with vertex ids `ids`.
    ///
    /// Returns `None` if spade refuses one of the vertices.
    pub fn new(ids: [u32; 3]) -> Option<Self> {
        let mut result = Self {
            delaunay: ConstrainedDelaunayTriangulation::new(),
            handle_ids: Vec::new(),
            id_handles: HashMap::new(),
        };

        for (id, corner) in ids.into_iter().zip(Self::corners()) {
            let _ = result.insert(id, corner)?;
        }

        Some(result)
    }

    /// The normalized coordinates of the vertices of the triangle.
    pub fn corners() -> [Point2<Real>; 3] {
        [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ]
    }

    /// Inserts the point with the given id and normalized coordinates.
    ///
    /// If this id was already inserted, its existing handle is returned.
    pub fn insert(&mut self, id: u32, normalized: Point2<Real>) -> Option<FixedVertexHandle> {
        if let Some(handle) = self.id_handles.get(&id) {
            return Some(*handle);
        }

        let point = sanitize_spade_point(SpadePoint::new(normalized.x, normalized.y));
        let handle = match self.delaunay.insert(point) {
            Ok(handle) => handle,
            Err(err) => {
                log::debug!("Failed to insert the point {id} at {normalized:?}: {err:?}");
                return None;
            }
        };

        if self.handle_ids.len() <= handle.index() {
            self.handle_ids.resize(handle.index() + 1, None);
        }

        // Another point with the same normalized coordinates keeps the first id.
        if self.handle_ids[handle.index()].is_none() {
            self.handle_ids[handle.index()] = Some(id);
        }

        let _ = self.id_handles.insert(id, handle);
        Some(handle)
    }

    /// The handle of the point with the given id, if it was inserted.
    pub fn handle(&self, id: u32) -> Option<FixedVertexHandle> {
        self.id_handles.get(&id).copied()
    }

    /// Adds a constraint edge between two inserted points.
    ///
    /// Constraint edges crossing previously inserted ones are split at their intersection.
    pub fn add_chord(&mut self, a: FixedVertexHandle, b: FixedVertexHandle) {
        if a != b {
            let _ = self.delaunay.add_constraint_and_split(a, b, |v| v);
        }
    }

    /// Does the triangulation contain any point other than the three triangle vertices?
    pub fn is_split(&self) -> bool {
        self.delaunay.num_vertices() > 3
    }

    /// The vertices created at the intersections of crossing constraints, with their normalized
    /// coordinates.
    ///
    /// These don't have any point id yet. One must be given with [`Self::set_id`].
    pub fn vertices_without_id(&self) -> Vec<(FixedVertexHandle, Point2<Real>)> {
        self.delaunay
            .vertices()
            .filter(|v| {
                self.handle_ids
                    .get(v.fix().index())
                    .copied()
                    .flatten()
                    .is_none()
            })
            .map(|v| {
                let pos = v.position();
                (v.fix(), Point2::new(pos.x, pos.y))
            })
            .collect()
    }

    /// Associates a point id to a vertex that was created by splitting constraints.
    pub fn set_id(&mut self, handle: FixedVertexHandle, id: u32) {
        if self.handle_ids.len() <= handle.index() {
            self.handle_ids.resize(handle.index() + 1, None);
        }

        self.handle_ids[handle.index()] = Some(id);
    }

    /// The triangles of this triangulation, as point ids in counter-clockwise order in the
    /// normalized frame.
    ///
    /// Triangles with a normalized double area smaller than `min_area2`, or with repeated ids,
    /// are skipped.
    pub fn triangles(&self, min_area2: Real) -> Vec<[u32; 3]> {
        let mut result = Vec::with_capacity(self.delaunay.num_inner_faces());

        for face in self.delaunay.inner_faces() {
            let vertices = face.vertices();
            let pts = vertices.map(|v| {
                let pos = v.position();
                Point2::new(pos.x, pos.y)
            });

            if signed_area2(&pts[0], &pts[1], &pts[2]) <= min_area2 {
                continue;
            }

            let ids = vertices.map(|v| self.handle_ids.get(v.fix().index()).copied().flatten());

            match ids {
                [Some(a), Some(b), Some(c)] if a != b && b != c && c != a => {
                    result.push([a, b, c])
                }
                _ => log::trace!("Skipping the collapsed face {ids:?}"),
            }
        }

        result
    }
}
