use crate::math::Real;

/// Ensures the given coordinate doesn’t go out of the bounds of spade’s acceptable values.
///
/// Returns 0.0 if the coordinate is smaller than `spade::MIN_ALLOWED_VALUE`, and clamps it to
/// `spade::MAX_ALLOWED_VALUE` (keeping its sign) if it is larger.
pub fn sanitize_spade_coord(coord: Real) -> Real {
    let abs = coord.abs();

    if abs <= spade::MIN_ALLOWED_VALUE {
        return 0.0;
    }

    if abs > spade::MAX_ALLOWED_VALUE {
        return spade::MAX_ALLOWED_VALUE * coord.signum();
    }

    coord
}

/// Ensures the coordinates of the given point don’t go out of the bounds of spade’s acceptable
/// values.
pub fn sanitize_spade_point(point: spade::Point2<Real>) -> spade::Point2<Real> {
    spade::Point2::new(sanitize_spade_coord(point.x), sanitize_spade_coord(point.y))
}
