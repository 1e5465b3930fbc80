//! Straight-line fallback routing, used when the graph cannot answer

use geo::Point;

use super::route::{Route, RoutePoint, RouteStep, round_to_u32};
use super::turns::Maneuver;
use crate::WALKING_SPEED;
use crate::geometry::haversine_distance;

/// Builds a direct two-point route between the endpoints.
///
/// Always succeeds: exactly two coordinates and exactly three steps
/// (depart, walk, arrive), whatever the inputs. This is the terminal
/// fallback of every routing chain.
#[must_use]
pub fn direct_route(from: Point<f64>, to: Point<f64>) -> Route {
    let distance = haversine_distance(from, to);
    let duration = distance / WALKING_SPEED;

    let steps = vec![
        RouteStep {
            instruction: Maneuver::depart().instruction().to_string(),
            distance: 0,
            duration: 0,
            point: RoutePoint::from(from),
            maneuver: Some(Maneuver::depart()),
        },
        RouteStep {
            instruction: "Walk towards destination".to_string(),
            distance: round_to_u32(distance),
            duration: round_to_u32(duration),
            point: RoutePoint::from(to),
            maneuver: None,
        },
        RouteStep {
            instruction: Maneuver::arrive().instruction().to_string(),
            distance: 0,
            duration: 0,
            point: RoutePoint::from(to),
            maneuver: Some(Maneuver::arrive()),
        },
    ];

    Route {
        coordinates: vec![RoutePoint::from(from), RoutePoint::from(to)],
        distance: round_to_u32(distance),
        duration: round_to_u32(duration),
        steps,
    }
}
