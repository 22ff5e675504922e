use crate::math::{Point3, Real};
use hashbrown::HashMap;
use smallvec::SmallVec;

/// Grid-based point set merging points closer than a tolerance.
///
/// Space is divided in cubic cells of size `2 * tolerance`, so any point within `tolerance` of a
/// query lies in the query's cell or in one of its 26 neighbors.
#[derive(Clone, Debug)]
pub struct MergePoints {
    points: Vec<Point3<Real>>,
    cells: HashMap<[i64; 3], SmallVec<[u32; 4]>>,
    cell_size: Real,
    tolerance: Real,
}

impl MergePoints {
    /// An empty point set.
    pub fn new(tolerance: Real) -> Self {
        Self {
            points: Vec::new(),
            cells: HashMap::new(),
            cell_size: tolerance * 2.0,
            tolerance,
        }
    }

    /// A point set initialized with `points`.
    ///
    /// Every point is inserted without merging so the point `i` is given the id `i`.
    pub fn seeded(points: &[Point3<Real>], tolerance: Real) -> Self {
        let mut result = Self::new(tolerance);
        result.points.reserve(points.len());

        for pt in points {
            let _ = result.insert(*pt);
        }

        result
    }

    #[inline]
    fn cell_key(&self, pt: &Point3<Real>) -> [i64; 3] {
        let discretize = |v: Real| (v / self.cell_size).floor() as i64;
        [discretize(pt.x), discretize(pt.y), discretize(pt.z)]
    }

    fn insert(&mut self, pt: Point3<Real>) -> u32 {
        let id = self.points.len() as u32;
        let key = self.cell_key(&pt);
        self.cells.entry(key).or_default().push(id);
        self.points.push(pt);
        id
    }

    /// The id of the closest point within tolerance of `pt`, if any.
    ///
    /// When several points are equally close, the lowest id wins.
    pub fn find(&self, pt: &Point3<Real>) -> Option<u32> {
        let key = self.cell_key(pt);
        let tol2 = self.tolerance * self.tolerance;
        let mut best: Option<(Real, u32)> = None;

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(ids) = self.cells.get(&[key[0] + dx, key[1] + dy, key[2] + dz])
                    else {
                        continue;
                    };

                    for id in ids {
                        let dist2 = na::distance_squared(&self.points[*id as usize], pt);

                        if dist2 <= tol2
                            && best.map_or(true, |(d, i)| dist2 < d || (dist2 == d && *id < i))
                        {
                            best = Some((dist2, *id));
                        }
                    }
                }
            }
        }

        best.map(|(_, id)| id)
    }

    /// Returns the id of an existing point within tolerance of `pt`, or inserts `pt`.
    ///
    /// The boolean is `true` if `pt` was inserted.
    pub fn insert_or_merge(&mut self, pt: Point3<Real>) -> (u32, bool) {
        match self.find(&pt) {
            Some(id) => (id, false),
            None => (self.insert(pt), true),
        }
    }

    /// All the points of this set, indexed by their id.
    pub fn points(&self) -> &[Point3<Real>] {
        &self.points
    }

    /// Consumes this set, returning its points indexed by their id.
    pub fn into_points(self) -> Vec<Point3<Real>> {
        self.points
    }

    /// The number of points of this set.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Is this set empty?
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A point set able to deduplicate the points created while cutting a surface.
///
/// Before the cut, the set must contain exactly the points of the surface being cut, with their
/// original ids.
pub trait PointMerger {
    /// Returns the id of an existing point within tolerance of `pt`, or inserts `pt`.
    ///
    /// The boolean is `true` if `pt` was inserted, in which case its id must be the number of
    /// points before the insertion.
    fn insert_or_merge(&mut self, pt: Point3<Real>) -> (u32, bool);

    /// All the points of this set, indexed by their id.
    fn points(&self) -> &[Point3<Real>];

    /// Consumes this set, returning its points indexed by their id.
    fn into_points(self) -> Vec<Point3<Real>>
    where
        Self: Sized,
    {
        self.points().to_vec()
    }
}

impl PointMerger for MergePoints {
    fn insert_or_merge(&mut self, pt: Point3<Real>) -> (u32, bool) {
        MergePoints::insert_or_merge(self, pt)
    }

    fn points(&self) -> &[Point3<Real>] {
        &self.points
    }

    fn into_points(self) -> Vec<Point3<Real>> {
        self.points
    }
}
