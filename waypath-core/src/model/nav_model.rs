//! The navigation model: path graph, location catalog and precomputed
//! location anchors, built once and shared read-only

use log::{info, warn};
use petgraph::graph::NodeIndex;
use rayon::prelude::*;

use super::locations::LocationIndex;
use super::paths::PathGraph;

/// Anchors farther than this from their location suggest the path survey
/// does not cover that corner of the campus
const FAR_ANCHOR_WARN_M: f64 = 250.0;

/// Immutable navigation model
///
/// Owned by whoever serves routing requests and passed by shared reference;
/// building it is the only mutation in the crate.
pub struct NavModel {
    pub graph: PathGraph,
    pub locations: LocationIndex,
    /// Nearest graph node per catalog entry, aligned with the catalog order
    anchors: Vec<Option<NodeIndex>>,
}

impl NavModel {
    /// Assembles the model and snaps every location to its road-graph anchor
    #[must_use]
    pub fn from_parts(graph: PathGraph, locations: LocationIndex) -> Self {
        let anchors = snap_locations_to_network(&graph, &locations);
        Self {
            graph,
            locations,
            anchors,
        }
    }

    /// The precomputed anchor node of a location, if the id is known and
    /// the graph was non-empty at build time
    #[must_use]
    pub fn anchor(&self, location_id: &str) -> Option<NodeIndex> {
        self.locations
            .index_of(location_id)
            .and_then(|index| self.anchors[index])
    }
}

/// Snap all catalog locations to their nearest path-graph nodes
fn snap_locations_to_network(
    graph: &PathGraph,
    locations: &LocationIndex,
) -> Vec<Option<NodeIndex>> {
    if graph.is_empty() {
        return vec![None; locations.len()];
    }

    let snapped: Vec<(Option<NodeIndex>, f64)> = locations
        .as_slice()
        .par_iter()
        .map(|location| {
            graph
                .nearest_node(&location.position)
                .map_or((None, 0.0), |(node, distance)| (Some(node), distance))
        })
        .collect();

    let far = snapped
        .iter()
        .filter(|(node, distance)| node.is_some() && *distance > FAR_ANCHOR_WARN_M)
        .count();
    if far > 0 {
        warn!(
            "{far} of {} locations are more than {FAR_ANCHOR_WARN_M:.0} m from the path \
            network; routes to them will end with a long straight tail",
            locations.len()
        );
    }
    info!("Anchored {} locations to the path network", locations.len());

    snapped.into_iter().map(|(node, _)| node).collect()
}

#[cfg(test)]
mod tests {
    use geo::{Point, line_string};

    use super::*;
    use crate::model::locations::{Location, LocationCategory};

    fn location(id: &str, lng: f64, lat: f64) -> Location {
        Location {
            id: id.into(),
            name: id.into(),
            position: Point::new(lng, lat),
            category: LocationCategory::Facility,
            description: None,
        }
    }

    #[test]
    fn every_location_gets_an_anchor() {
        let graph = PathGraph::build(vec![
            line_string![(x: 79.0, y: 21.0), (x: 79.0, y: 21.001)],
            line_string![(x: 79.0, y: 21.001), (x: 79.001, y: 21.001)],
        ]);
        let locations = LocationIndex::new(vec![
            location("a", 79.000_02, 21.0),
            location("b", 79.001, 21.001_05),
        ]);

        let model = NavModel::from_parts(graph, locations);

        let anchor_a = model.anchor("a").unwrap();
        assert_eq!(model.graph.graph[anchor_a].geometry, Point::new(79.0, 21.0));

        let anchor_b = model.anchor("b").unwrap();
        assert_eq!(
            model.graph.graph[anchor_b].geometry,
            Point::new(79.001, 21.001)
        );
    }

    #[test]
    fn empty_graph_means_no_anchors() {
        let model = NavModel::from_parts(
            PathGraph::empty(),
            LocationIndex::new(vec![location("a", 79.0, 21.0)]),
        );
        assert!(model.anchor("a").is_none());
    }

    #[test]
    fn unknown_ids_have_no_anchor() {
        let model = NavModel::from_parts(PathGraph::empty(), LocationIndex::new(Vec::new()));
        assert!(model.anchor("nowhere").is_none());
    }
}
