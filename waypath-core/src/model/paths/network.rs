//! Walkable path network: a directed graph with mirrored edges plus a
//! spatial index for snapping arbitrary coordinates onto the graph

use geo::{Coord, LineString, Point};
use hashbrown::HashMap;
use log::debug;
use petgraph::Directed;
use petgraph::graph::{DiGraph, Edges, NodeIndex};
use rstar::{RTree, primitives::GeomWithData};

use super::components::{PathEdge, PathNode};
use crate::geometry::{coord_key, haversine_distance, line_length};

/// Graph node position indexed for nearest-neighbor queries
pub type IndexedPoint = GeomWithData<Point<f64>, NodeIndex>;

/// Campus path network
///
/// Built once from raw polylines and immutable afterwards. Every physical
/// segment is stored as a pair of directed edges (forward and reverse with
/// the polyline reversed), so for each edge (u, v) a mirror edge (v, u)
/// with identical distance always exists.
pub struct PathGraph {
    pub graph: DiGraph<PathNode, PathEdge>,
    rtree: RTree<IndexedPoint>,
}

impl PathGraph {
    /// Builds the network from path polylines.
    ///
    /// Every vertex of every polyline is registered as a node, with
    /// coordinates deduplicated by rounding so that features meeting at the
    /// same physical junction share a node. Each polyline contributes one
    /// forward and one reverse edge spanning its first and last vertex and
    /// carrying the full geometry. Features with fewer than 2 coordinates
    /// are skipped.
    #[must_use]
    pub fn build(lines: Vec<LineString<f64>>) -> Self {
        let mut graph = DiGraph::new();
        let mut lookup: HashMap<(i64, i64), NodeIndex> = HashMap::new();

        for line in lines {
            if line.0.len() < 2 {
                debug!("Skipping path feature with fewer than 2 coordinates");
                continue;
            }

            // Intermediate vertices become nodes too, so snapping can
            // target any point where the survey placed a junction
            let vertices: Vec<NodeIndex> = line
                .0
                .iter()
                .map(|coord| register_node(&mut graph, &mut lookup, *coord))
                .collect();

            let start = vertices[0];
            let end = vertices[vertices.len() - 1];

            let distance = line_length(&line);
            let mut reversed = line.clone();
            reversed.0.reverse();

            graph.add_edge(
                start,
                end,
                PathEdge {
                    distance,
                    geometry: line,
                },
            );
            graph.add_edge(
                end,
                start,
                PathEdge {
                    distance,
                    geometry: reversed,
                },
            );
        }

        let rtree = RTree::bulk_load(
            graph
                .node_indices()
                .map(|idx| IndexedPoint::new(graph[idx].geometry, idx))
                .collect(),
        );

        Self { graph, rtree }
    }

    /// Empty network (no nodes, no edges); every snap and route fails
    #[must_use]
    pub fn empty() -> Self {
        Self::build(Vec::new())
    }

    /// Snaps a point to the closest graph node.
    ///
    /// Returns the node and its haversine distance to the query in meters,
    /// or `None` when the graph has zero nodes. The R-tree compares raw
    /// coordinate deltas, which preserves the nearest-by-meters ordering at
    /// campus scale.
    #[must_use]
    pub fn nearest_node(&self, point: &Point<f64>) -> Option<(NodeIndex, f64)> {
        self.rtree
            .nearest_neighbor(point)
            .map(|entry| (entry.data, haversine_distance(*entry.geom(), *point)))
    }

    /// Outgoing edges of a node
    pub fn edges(&self, node: NodeIndex) -> Edges<'_, PathEdge, Directed> {
        self.graph.edges(node)
    }

    /// The directed edge connecting two adjacent nodes, if any
    #[must_use]
    pub fn edge_between(&self, from: NodeIndex, to: NodeIndex) -> Option<&PathEdge> {
        self.graph
            .find_edge(from, to)
            .and_then(|edge| self.graph.edge_weight(edge))
    }

    #[must_use]
    pub fn node(&self, index: NodeIndex) -> Option<&PathNode> {
        self.graph.node_weight(index)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

#[allow(clippy::cast_possible_truncation)]
fn register_node(
    graph: &mut DiGraph<PathNode, PathEdge>,
    lookup: &mut HashMap<(i64, i64), NodeIndex>,
    coord: Coord<f64>,
) -> NodeIndex {
    match lookup.entry(coord_key(coord)) {
        hashbrown::hash_map::Entry::Occupied(entry) => *entry.get(),
        hashbrown::hash_map::Entry::Vacant(entry) => {
            let id = graph.node_count() as u32;
            let index = graph.add_node(PathNode {
                id,
                geometry: coord.into(),
            });
            *entry.insert(index)
        }
    }
}

#[cfg(test)]
mod tests {
    use geo::line_string;
    use petgraph::visit::EdgeRef;

    use super::*;

    fn l_shaped_network() -> PathGraph {
        // Two segments meeting at a shared junction
        PathGraph::build(vec![
            line_string![(x: 79.0, y: 21.0), (x: 79.0, y: 21.001)],
            line_string![(x: 79.0, y: 21.001), (x: 79.001, y: 21.001)],
        ])
    }

    #[test]
    fn shared_junctions_are_merged() {
        let network = l_shaped_network();
        assert_eq!(network.node_count(), 3);
        assert_eq!(network.edge_count(), 4);
    }

    #[test]
    fn near_duplicate_coordinates_share_a_node() {
        let network = PathGraph::build(vec![
            line_string![(x: 79.0, y: 21.0), (x: 79.0, y: 21.001)],
            line_string![(x: 79.000_000_004, y: 21.001), (x: 79.001, y: 21.001)],
        ]);
        assert_eq!(network.node_count(), 3);
    }

    #[test]
    fn every_edge_has_a_mirror() {
        let network = l_shaped_network();
        for edge in network.graph.edge_references() {
            let mirror = network
                .edge_between(edge.target(), edge.source())
                .expect("mirror edge missing");
            assert!((mirror.distance - edge.weight().distance).abs() < 1e-9);

            let mut reversed = mirror.geometry.0.clone();
            reversed.reverse();
            assert_eq!(reversed, edge.weight().geometry.0);
        }
    }

    #[test]
    fn degenerate_features_are_skipped() {
        let network = PathGraph::build(vec![line_string![(x: 79.0, y: 21.0)]]);
        assert!(network.is_empty());
        assert_eq!(network.edge_count(), 0);
    }

    #[test]
    fn empty_network_has_no_nearest_node() {
        let network = PathGraph::empty();
        assert!(network.nearest_node(&Point::new(79.0, 21.0)).is_none());
    }

    #[test]
    fn snapping_a_node_position_returns_that_node() {
        let network = l_shaped_network();
        for index in network.graph.node_indices() {
            let position = network.graph[index].geometry;
            let (snapped, distance) = network.nearest_node(&position).unwrap();
            assert_eq!(snapped, index);
            assert_eq!(distance, 0.0);
        }
    }

    #[test]
    fn snapping_prefers_the_closest_node() {
        let network = l_shaped_network();
        // Just north of the junction at (79.0, 21.001)
        let query = Point::new(79.0, 21.0011);
        let (snapped, distance) = network.nearest_node(&query).unwrap();
        assert_eq!(network.graph[snapped].geometry, Point::new(79.0, 21.001));
        assert!(distance > 10.0 && distance < 13.0, "got {distance}");
    }

    #[test]
    fn edge_distance_follows_the_polyline() {
        // A curved segment: endpoint distance is much shorter than the path
        let network = PathGraph::build(vec![line_string![
            (x: 79.0, y: 21.0),
            (x: 79.002, y: 21.0),
            (x: 79.002, y: 21.000_1),
            (x: 79.0, y: 21.000_1),
        ]]);
        let start = network.nearest_node(&Point::new(79.0, 21.0)).unwrap().0;
        let end = network.nearest_node(&Point::new(79.0, 21.000_1)).unwrap().0;
        let edge = network.edge_between(start, end).unwrap();
        let straight = haversine_distance(Point::new(79.0, 21.0), Point::new(79.0, 21.000_1));
        assert!(edge.distance > 30.0 * straight, "polyline length not cumulative");
    }
}
