/*!
loopcut3d
========

**loopcut3d** cuts triangulated surfaces with closed polygonal loops projected along the `z`
axis. The loop edges are embedded into the surface as constrained edges, and the cells falling
inside (or outside) of the loops can be removed.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![deny(unused_qualifications)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![allow(clippy::type_complexity)] // Complains about closures that are fairly simple.

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod partitioning;
pub mod shape;
pub mod transformation;
pub mod utils;

/// Aliases for mathematical types.
pub mod math {
    pub use na::{Matrix2, Point2, Point3, Vector2, Vector3};

    /// The scalar type used throughout this crate.
    pub use f64 as Real;

    /// The default tolerance of the geometric predicates and point merging.
    pub const DEFAULT_TOLERANCE: Real = 1.0e-6;
}
