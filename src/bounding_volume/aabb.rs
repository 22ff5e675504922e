//! Axis Aligned Bounding Box of a footprint on the XY plane.

use crate::bounding_volume::BoundingVolume;
use crate::math::{Point2, Point3, Real, Vector2};
use num::Bounded;

/// An Axis-Aligned Bounding Box (AABB) of a 2D footprint.
///
/// Every cell and loop edge handled by the cutter is projected on the XY plane before any
/// spatial query, so the boxes used for candidate searches are two-dimensional.
///
/// - **mins**: the corner with the smallest coordinates on each axis.
/// - **maxs**: the corner with the largest coordinates on each axis.
/// - **Invariant**: `mins.x ≤ maxs.x` and `mins.y ≤ maxs.y` for any valid box. Boxes built with
///   [`Aabb::new_invalid`] have inverted bounds and are meant to be grown with
///   [`Aabb::take_point`] or [`BoundingVolume::merge`].
///
/// # Example
///
/// ```rust
/// use loopcut3d::bounding_volume::{Aabb, BoundingVolume};
/// use nalgebra::Point2;
///
/// let aabb = Aabb::from_points([Point2::new(1.0, 2.0), Point2::new(-1.0, 4.0)]);
/// assert_eq!(aabb.mins, Point2::new(-1.0, 2.0));
/// assert_eq!(aabb.maxs, Point2::new(1.0, 4.0));
/// assert!(aabb.intersects(&Aabb::new(Point2::new(0.5, 3.5), Point2::new(8.0, 8.0))));
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Aabb {
    /// The point with minimum coordinates.
    pub mins: Point2<Real>,
    /// The point with maximum coordinates.
    pub maxs: Point2<Real>,
}

impl Aabb {
    /// Creates a new AABB.
    ///
    /// # Arguments:
    ///   * `mins` - position of the point with the smallest coordinates.
    ///   * `maxs` - position of the point with the highest coordinates. Each component of `mins`
    ///     must be smaller than the related components of `maxs`.
    #[inline]
    pub fn new(mins: Point2<Real>, maxs: Point2<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid AABB with `mins` components set to `Real::max_values` and `maxs`
    /// components set to `-Real::max_values`.
    ///
    /// This is often used as the initial values of some AABB merging algorithms.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector2::repeat(Real::max_value()).into(),
            Vector2::repeat(-Real::max_value()).into(),
        )
    }

    /// Computes the AABB bounding the given points.
    pub fn from_points<I>(pts: I) -> Self
    where
        I: IntoIterator<Item = Point2<Real>>,
    {
        let mut result = Self::new_invalid();
        for pt in pts {
            result.take_point(pt);
        }
        result
    }

    /// Computes the AABB bounding the XY projection of the given 3D points.
    pub fn from_projected_points<'a, I>(pts: I) -> Self
    where
        I: IntoIterator<Item = &'a Point3<Real>>,
    {
        Self::from_points(pts.into_iter().map(|pt| pt.xy()))
    }

    /// The extents of this AABB.
    #[inline]
    pub fn extents(&self) -> Vector2<Real> {
        self.maxs - self.mins
    }

    /// Enlarges this `Aabb` so it also contains the point `pt`.
    pub fn take_point(&mut self, pt: Point2<Real>) {
        self.mins = self.mins.coords.inf(&pt.coords).into();
        self.maxs = self.maxs.coords.sup(&pt.coords).into();
    }

    /// Tests if the given point is inside of this AABB (boundary included).
    #[inline]
    pub fn contains_local_point(&self, point: &Point2<Real>) -> bool {
        point.x >= self.mins.x
            && point.x <= self.maxs.x
            && point.y >= self.mins.y
            && point.y <= self.maxs.y
    }
}

impl BoundingVolume for Aabb {
    #[inline]
    fn intersects(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.maxs) && na::partial_ge(&self.maxs, &other.mins)
    }

    #[inline]
    fn merge(&mut self, other: &Aabb) {
        self.mins = self.mins.inf(&other.mins);
        self.maxs = self.maxs.sup(&other.maxs);
    }

    #[inline]
    fn loosened(&self, amount: Real) -> Aabb {
        assert!(amount >= 0.0, "The loosening margin must be positive.");
        Aabb {
            mins: self.mins + Vector2::repeat(-amount),
            maxs: self.maxs + Vector2::repeat(amount),
        }
    }
}
