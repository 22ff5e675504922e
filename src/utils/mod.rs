//! Various unsorted geometrical and logical operators.

pub use self::point_in_poly2d::{crossing_number, point_in_poly2d};
pub use self::point_in_triangle::{
    barycentric_coordinates2d, classify_point_in_triangle2d, distance_to_segment_squared,
    signed_area2, PointInTriangle, TRIANGLE_EDGES,
};
pub use self::point_on_segment::{classify_point_on_segment2d, PointOnLine};
pub use self::segments_intersection::{intersect_segments2d, IntersectType};
pub use self::spade::{sanitize_spade_coord, sanitize_spade_point};

mod point_in_poly2d;
pub mod point_in_triangle;
mod point_on_segment;
mod segments_intersection;
mod spade;
