//! Assembles renderable routes from shortest paths over the graph:
//! stitches edge polylines, splices off-graph endpoints and derives
//! turn-by-turn steps

use geo::Point;
use itertools::Itertools;
use petgraph::graph::NodeIndex;

use super::dijkstra::{ShortestPath, shortest_path};
use super::route::{Route, RoutePoint, RouteStep, round_to_u32};
use super::turns::{Maneuver, classify_turn};
use crate::geometry::haversine_distance;
use crate::model::{NavModel, PathEdge};
use crate::{Error, OFF_PATH_THRESHOLD, WALKING_SPEED};

/// Computes a road-following route between two arbitrary points.
///
/// Snaps both endpoints to the graph, runs the shortest-path engine and
/// assembles the polyline and step list.
///
/// # Errors
///
/// `Error::EmptyNetwork` when the graph has no nodes, `Error::NoPath` when
/// the endpoints land in disconnected components.
pub fn plan_route(model: &NavModel, from: Point<f64>, to: Point<f64>) -> Result<Route, Error> {
    let (end, _) = model.graph.nearest_node(&to).ok_or(Error::EmptyNetwork)?;
    plan_route_to_node(model, from, to, end)
}

/// Route variant with a pre-resolved destination node (location anchors);
/// `to` stays the exact endpoint spliced into the polyline.
pub(crate) fn plan_route_to_node(
    model: &NavModel,
    from: Point<f64>,
    to: Point<f64>,
    end: NodeIndex,
) -> Result<Route, Error> {
    let (start, _) = model.graph.nearest_node(&from).ok_or(Error::EmptyNetwork)?;
    let path = shortest_path(&model.graph, start, end).ok_or(Error::NoPath)?;
    Ok(assemble(model, from, to, &path))
}

fn assemble(model: &NavModel, from: Point<f64>, to: Point<f64>, path: &ShortestPath) -> Route {
    // Edges between consecutive path nodes; mirror construction guarantees
    // one exists for every pair produced by the shortest-path engine
    let edges: Vec<&PathEdge> = path
        .nodes
        .iter()
        .tuple_windows()
        .filter_map(|(a, b)| model.graph.edge_between(*a, *b))
        .collect();

    Route {
        coordinates: stitch_coordinates(model, from, to, path, &edges),
        distance: round_to_u32(path.distance),
        duration: round_to_u32(path.distance / WALKING_SPEED),
        steps: build_steps(from, to, &edges),
    }
}

/// Concatenates edge polylines into one coordinate sequence.
///
/// The exact endpoints are spliced in only when they sit more than the
/// off-path threshold away from their snapped nodes, so the rendered route
/// neither jumps nor grows a zero-length stub. Consecutive duplicates are
/// suppressed with the junction rounding key.
fn stitch_coordinates(
    model: &NavModel,
    from: Point<f64>,
    to: Point<f64>,
    path: &ShortestPath,
    edges: &[&PathEdge],
) -> Vec<RoutePoint> {
    let mut coordinates: Vec<RoutePoint> = Vec::new();

    if let Some(start_node) = model.graph.node(path.nodes[0])
        && haversine_off_path(from, start_node.geometry)
    {
        coordinates.push(RoutePoint::from(from));
    }

    for edge in edges {
        for coord in &edge.geometry.0 {
            let point = RoutePoint::from(*coord);
            if coordinates.last().is_none_or(|last| last.key() != point.key()) {
                coordinates.push(point);
            }
        }
    }

    if let Some(end_node) = model.graph.node(path.nodes[path.nodes.len() - 1])
        && haversine_off_path(to, end_node.geometry)
    {
        coordinates.push(RoutePoint::from(to));
    }

    coordinates
}

fn haversine_off_path(point: Point<f64>, node: Point<f64>) -> bool {
    haversine_distance(point, node) > OFF_PATH_THRESHOLD
}

/// Emits the step list: a depart marker, one step per classified turn and
/// an arrive marker.
///
/// Straight continuations are suppressed to keep the turn-by-turn list
/// quiet. Turn steps carry the distance and walking time of the edge that
/// leads into the turn.
fn build_steps(from: Point<f64>, to: Point<f64>, edges: &[&PathEdge]) -> Vec<RouteStep> {
    let mut steps = vec![RouteStep {
        instruction: Maneuver::depart().instruction().to_string(),
        distance: 0,
        duration: 0,
        point: RoutePoint::from(from),
        maneuver: Some(Maneuver::depart()),
    }];

    for (edge, next_edge) in edges.iter().tuple_windows() {
        if edge.geometry.0.len() < 2 || next_edge.geometry.0.len() < 2 {
            continue;
        }

        // The turn happens where this edge ends and the next one begins
        let approach = edge.geometry.0[edge.geometry.0.len() - 2];
        let corner = edge.geometry.0[edge.geometry.0.len() - 1];
        let departure = next_edge.geometry.0[1];

        let maneuver = classify_turn(approach.into(), corner.into(), departure.into());
        if maneuver.is_continue() {
            continue;
        }

        steps.push(RouteStep {
            instruction: maneuver.instruction().to_string(),
            distance: round_to_u32(edge.distance),
            duration: round_to_u32(edge.walking_time()),
            point: RoutePoint::from(corner),
            maneuver: Some(maneuver),
        });
    }

    steps.push(RouteStep {
        instruction: Maneuver::arrive().instruction().to_string(),
        distance: 0,
        duration: 0,
        point: RoutePoint::from(to),
        maneuver: Some(Maneuver::arrive()),
    });

    steps
}
