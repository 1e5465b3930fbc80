//! Spherical geometry helpers shared by the graph builder and the routers

use geo::{Coord, LineString, Point};
use itertools::Itertools;

/// Mean Earth radius in meters
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Scale factor for coordinate deduplication keys (7 decimal places,
/// sub-centimeter at the equator)
const COORD_KEY_SCALE: f64 = 1e7;

/// Great-circle distance between two points in meters (haversine formula)
#[must_use]
pub fn haversine_distance(from: Point<f64>, to: Point<f64>) -> f64 {
    let d_lat = (to.y() - from.y()).to_radians();
    let d_lng = (to.x() - from.x()).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.y().to_radians().cos() * to.y().to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Cumulative haversine length of a polyline in meters
///
/// Sums consecutive vertex pairs, so curved segments are measured along
/// the road rather than between its endpoints.
#[must_use]
pub fn line_length(line: &LineString<f64>) -> f64 {
    line.0
        .iter()
        .tuple_windows()
        .map(|(a, b)| haversine_distance(Point::from(*a), Point::from(*b)))
        .sum()
}

/// Rounded lookup key used to merge floating-point near-duplicates of the
/// same physical junction
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub(crate) fn coord_key(coord: Coord<f64>) -> (i64, i64) {
    (
        (coord.y * COORD_KEY_SCALE).round() as i64,
        (coord.x * COORD_KEY_SCALE).round() as i64,
    )
}
