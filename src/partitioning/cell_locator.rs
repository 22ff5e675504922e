use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::Real;
use crate::shape::SurfaceMesh;

/// A spatial index able to find the cells of a surface whose XY footprint may intersect a box.
///
/// Queries may be run from several threads at once.
pub trait CellBoundsQuery: Sync {
    /// The ids, in increasing order and without duplicates, of the cells whose footprint
    /// intersects `aabb`.
    ///
    /// This may be conservative, but must never miss a cell actually intersecting `aabb`.
    fn cells_within_bounds(&self, aabb: &Aabb) -> Vec<u32>;
}

impl<T: CellBoundsQuery + ?Sized> CellBoundsQuery for &T {
    fn cells_within_bounds(&self, aabb: &Aabb) -> Vec<u32> {
        (**self).cells_within_bounds(aabb)
    }
}

/// The maximum number of buckets per indexed footprint.
const MAX_BUCKETS_PER_FOOTPRINT: usize = 4;

/// Finds the cells of a mesh whose XY footprint may intersect a given box.
///
/// Only splittable cells (triangles and lines) are indexed. Their footprints, loosened by the
/// tolerance, are registered in every bucket they overlap of a uniform grid covering the whole
/// mesh. The bucket size is the mean footprint size, so most footprints overlap few buckets.
#[derive(Clone, Debug)]
pub struct CellLocator {
    footprints: Vec<(u32, Aabb)>,
    bounds: Aabb,
    bucket_size: Real,
    dims: [usize; 2],
    // Bucket `b` holds the footprints `entries[offsets[b]..offsets[b + 1]]`.
    offsets: Vec<usize>,
    entries: Vec<u32>,
}

impl CellLocator {
    /// Indexes the splittable cells of `mesh`.
    pub fn new(mesh: &SurfaceMesh, tolerance: Real) -> Self {
        let footprints: Vec<_> = mesh
            .cells()
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_splittable())
            .map(|(id, cell)| (id as u32, mesh.cell_aabb(cell).loosened(tolerance)))
            .collect();

        Self::from_footprints(footprints)
    }

    /// Indexes the given `(cell id, footprint)` pairs.
    pub fn from_footprints(footprints: Vec<(u32, Aabb)>) -> Self {
        let mut bounds = Aabb::new_invalid();
        let mut size_sum = 0.0;

        for (_, aabb) in &footprints {
            bounds.merge(aabb);
            size_sum += aabb.extents().max();
        }

        let mut result = Self {
            bounds,
            bucket_size: 1.0,
            dims: [0, 0],
            offsets: vec![0],
            entries: Vec::new(),
            footprints,
        };

        if result.footprints.is_empty() {
            return result;
        }

        let extents = bounds.extents();
        let max_buckets = (result.footprints.len() * MAX_BUCKETS_PER_FOOTPRINT) as Real;
        let mut bucket_size = size_sum / result.footprints.len() as Real;

        let num_buckets = |size: Real| (extents.x / size + 1.0) * (extents.y / size + 1.0);
        if num_buckets(bucket_size) > max_buckets {
            bucket_size *= (num_buckets(bucket_size) / max_buckets).sqrt();
        }

        if !(bucket_size > 0.0 && bucket_size.is_finite()) {
            bucket_size = extents.max().max(1.0);
        }

        result.bucket_size = bucket_size;
        result.dims = [0, 1].map(|i| (extents[i] / bucket_size) as usize + 1);
        result.fill_buckets();
        result
    }

    fn fill_buckets(&mut self) {
        let mut counts = vec![0usize; self.dims[0] * self.dims[1] + 1];

        for (_, aabb) in &self.footprints {
            if let Some(range) = self.bucket_range(aabb) {
                for bucket in self.buckets(range) {
                    counts[bucket + 1] += 1;
                }
            }
        }

        for i in 1..counts.len() {
            counts[i] += counts[i - 1];
        }

        let mut cursors = counts.clone();
        let mut entries = vec![0; counts[counts.len() - 1]];

        for (k, (_, aabb)) in self.footprints.iter().enumerate() {
            if let Some(range) = self.bucket_range(aabb) {
                for bucket in self.buckets(range) {
                    entries[cursors[bucket]] = k as u32;
                    cursors[bucket] += 1;
                }
            }
        }

        self.offsets = counts;
        self.entries = entries;
    }

    /// The inclusive ranges `[[x0, x1], [y0, y1]]` of buckets overlapped by `aabb`.
    fn bucket_range(&self, aabb: &Aabb) -> Option<[[usize; 2]; 2]> {
        if self.footprints.is_empty() || !self.bounds.intersects(aabb) {
            return None;
        }

        Some([0, 1].map(|i| {
            let to_bucket = |v: Real| {
                let cell = ((v - self.bounds.mins[i]) / self.bucket_size).floor();
                (cell.max(0.0) as usize).min(self.dims[i] - 1)
            };
            [to_bucket(aabb.mins[i]), to_bucket(aabb.maxs[i])]
        }))
    }

    fn buckets(&self, [[x0, x1], [y0, y1]]: [[usize; 2]; 2]) -> impl Iterator<Item = usize> {
        let width = self.dims[0];
        (y0..=y1).flat_map(move |y| (x0..=x1).map(move |x| y * width + x))
    }

    /// The number of indexed cells.
    pub fn len(&self) -> usize {
        self.footprints.len()
    }

    /// Does this locator index no cell at all?
    pub fn is_empty(&self) -> bool {
        self.footprints.is_empty()
    }

    /// The ids, in increasing order, of the cells whose footprint intersects `aabb`.
    ///
    /// This is a conservative test: the returned cells are not guaranteed to actually intersect
    /// anything contained by `aabb`.
    pub fn cells_within_bounds(&self, aabb: &Aabb) -> Vec<u32> {
        let Some(range) = self.bucket_range(aabb) else {
            return Vec::new();
        };

        let mut result = Vec::new();

        for bucket in self.buckets(range) {
            for k in &self.entries[self.offsets[bucket]..self.offsets[bucket + 1]] {
                let (cell_id, footprint) = &self.footprints[*k as usize];

                if footprint.intersects(aabb) {
                    result.push(*cell_id);
                }
            }
        }

        // A footprint is registered in every bucket it overlaps.
        result.sort_unstable();
        result.dedup();
        result
    }
}

impl CellBoundsQuery for CellLocator {
    fn cells_within_bounds(&self, aabb: &Aabb) -> Vec<u32> {
        CellLocator::cells_within_bounds(self, aabb)
    }
}
