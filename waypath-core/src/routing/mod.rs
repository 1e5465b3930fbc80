//! Route planning over the campus path network
//!
//! The planner snaps both endpoints to the graph, runs Dijkstra between the
//! snapped nodes and stitches the traversed edge polylines into a [`Route`]
//! with turn-by-turn steps. When the graph cannot answer (no data, endpoints
//! in disconnected fragments) the planner degrades to a straight-line route
//! instead of failing, so callers always have something to draw.

mod assembler;
mod dijkstra;
mod fallback;
mod route;
mod turns;

use geo::Point;
use log::debug;

pub use fallback::direct_route;
pub use route::{Route, RoutePoint, RouteStep};
pub use turns::{Maneuver, ManeuverType, TurnDirection};

use crate::Error;
use crate::model::NavModel;

/// Plans a path-network route between two coordinates, without the fallback.
///
/// # Errors
///
/// Returns [`Error::EmptyNetwork`] when the graph has no nodes and
/// [`Error::NoPath`] when the snapped endpoints are not connected.
pub fn graph_route(model: &NavModel, from: Point<f64>, to: Point<f64>) -> Result<Route, Error> {
    assembler::plan_route(model, from, to)
}

/// Plans a path-network route to a catalog location, without the fallback.
///
/// Routes towards the location's precomputed anchor node so the path ends
/// at the door rather than at an arbitrary snap point.
///
/// # Errors
///
/// Returns [`Error::UnknownLocation`] for an id not in the catalog, plus
/// the [`graph_route`] errors.
pub fn graph_route_to_location(
    model: &NavModel,
    from: Point<f64>,
    location_id: &str,
) -> Result<Route, Error> {
    let location = model
        .locations
        .get(location_id)
        .ok_or_else(|| Error::UnknownLocation(location_id.to_string()))?;
    let end = model.anchor(location_id).ok_or(Error::EmptyNetwork)?;
    assembler::plan_route_to_node(model, from, location.position, end)
}

/// Plans a walking route between two coordinates.
///
/// Prefers a path-network route; degrades to [`direct_route`] when the
/// network is empty or the endpoints are not connected. Never fails.
#[must_use]
pub fn route_between(model: &NavModel, from: Point<f64>, to: Point<f64>) -> Route {
    match graph_route(model, from, to) {
        Ok(route) => route,
        Err(err) => {
            debug!("Path network could not answer ({err}), walking direct");
            fallback::direct_route(from, to)
        }
    }
}

/// Plans a walking route from a coordinate to a catalog location, falling
/// back to a straight line when the network cannot answer.
///
/// # Errors
///
/// Returns [`Error::UnknownLocation`] when `location_id` is not in the
/// catalog. Routing itself never fails.
pub fn route_to_location(
    model: &NavModel,
    from: Point<f64>,
    location_id: &str,
) -> Result<Route, Error> {
    let location = model
        .locations
        .get(location_id)
        .ok_or_else(|| Error::UnknownLocation(location_id.to_string()))?;
    let destination = location.position;

    Ok(match graph_route_to_location(model, from, location_id) {
        Ok(route) => route,
        Err(err) => {
            debug!("No path-network route to {location_id} ({err}), walking direct");
            fallback::direct_route(from, destination)
        }
    })
}
