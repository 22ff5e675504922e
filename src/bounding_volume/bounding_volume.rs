use crate::math::Real;

/// Trait of bounding volumes.
///
/// Bounding volumes are coarse approximations of the XY footprint of cells and loop edges. They
/// have constant time intersection tests, and two bounding volumes can be merged into a bigger
/// one.
pub trait BoundingVolume {
    /// Checks if this bounding volume intersect with another one.
    fn intersects(&self, _: &Self) -> bool;

    /// Merges this bounding volume with another one. The merge is done in-place.
    fn merge(&mut self, _: &Self);

    /// Creates a new, enlarged version, of this bounding volume.
    fn loosened(&self, _: Real) -> Self;
}
