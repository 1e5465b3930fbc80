use std::{cmp::Ordering, collections::BinaryHeap};

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use petgraph::{graph::NodeIndex, visit::EdgeRef};

use crate::model::PathGraph;

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: NodeIndex,
}

impl Eq for State {}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap);
        // node index breaks cost ties to keep results deterministic
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.index().cmp(&self.node.index()))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of a shortest-path query: the node sequence from start to target
/// and its total length in meters
#[derive(Debug, Clone)]
pub struct ShortestPath {
    pub nodes: Vec<NodeIndex>,
    pub distance: f64,
}

/// Dijkstra's algorithm over the path network.
///
/// Returns `None` when the target is unreachable from the start. A query
/// from a node to itself yields that single node at distance 0.
#[must_use]
pub fn shortest_path(
    graph: &PathGraph,
    start: NodeIndex,
    target: NodeIndex,
) -> Option<ShortestPath> {
    let estimated_nodes = graph.node_count().min(1000);
    let mut distances: HashMap<NodeIndex, f64> = HashMap::with_capacity(estimated_nodes);
    let mut predecessors: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(estimated_nodes);
    let mut settled = FixedBitSet::with_capacity(graph.node_count());
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);

    // Start node has distance 0
    heap.push(State {
        cost: 0.0,
        node: start,
    });
    distances.insert(start, 0.0);

    while let Some(State { cost, node }) = heap.pop() {
        // The first pop of the target carries its final distance
        if node == target {
            break;
        }

        // Skip stale heap entries for already-settled nodes
        if settled.put(node.index()) {
            continue;
        }

        // Examine neighbors
        for edge in graph.edges(node) {
            let next = edge.target();
            if settled.contains(next.index()) {
                continue;
            }
            let next_cost = cost + edge.weight().distance;

            // Add or update distance if better using Entry API
            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                    predecessors.insert(next, node);
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                        predecessors.insert(next, node);
                    }
                }
            }
        }
    }

    if start != target && !predecessors.contains_key(&target) {
        return None;
    }

    // Follow predecessors backward from the target to the start
    let mut nodes = Vec::new();
    let mut current = target;
    while current != start {
        nodes.push(current);
        current = *predecessors.get(&current)?;
    }
    nodes.push(start);
    nodes.reverse();

    let distance = distances.get(&target).copied()?;
    Some(ShortestPath { nodes, distance })
}

#[cfg(test)]
mod tests {
    use geo::{Point, line_string};

    use super::*;
    use crate::geometry::haversine_distance;

    /// A-B and B-C are short straight legs; the direct A-C edge detours far
    /// east, making it roughly three times longer. The detour vertex is the
    /// fourth node.
    fn diamond_network() -> PathGraph {
        PathGraph::build(vec![
            line_string![(x: 79.0, y: 21.0), (x: 79.0, y: 21.001)],
            line_string![(x: 79.0, y: 21.001), (x: 79.001, y: 21.001)],
            line_string![
                (x: 79.0, y: 21.0),
                (x: 79.003, y: 21.000_5),
                (x: 79.001, y: 21.001),
            ],
        ])
    }

    fn node_at(graph: &PathGraph, lng: f64, lat: f64) -> NodeIndex {
        let (node, distance) = graph.nearest_node(&Point::new(lng, lat)).unwrap();
        assert_eq!(distance, 0.0);
        node
    }

    #[test]
    fn prefers_the_shorter_two_leg_path() {
        let graph = diamond_network();
        assert_eq!(graph.node_count(), 4);

        let a = node_at(&graph, 79.0, 21.0);
        let b = node_at(&graph, 79.0, 21.001);
        let c = node_at(&graph, 79.001, 21.001);

        let found = shortest_path(&graph, a, c).unwrap();
        assert_eq!(found.nodes, vec![a, b, c]);

        let leg_ab = haversine_distance(Point::new(79.0, 21.0), Point::new(79.0, 21.001));
        let leg_bc = haversine_distance(Point::new(79.0, 21.001), Point::new(79.001, 21.001));
        assert!((found.distance - (leg_ab + leg_bc)).abs() < 1e-6);

        let direct = graph.edge_between(a, c).unwrap();
        assert!(found.distance < direct.distance);
    }

    #[test]
    fn unreachable_target_yields_none() {
        let graph = PathGraph::build(vec![
            line_string![(x: 79.0, y: 21.0), (x: 79.0, y: 21.001)],
            line_string![(x: 79.01, y: 21.01), (x: 79.01, y: 21.011)],
        ]);
        let start = node_at(&graph, 79.0, 21.0);
        let target = node_at(&graph, 79.01, 21.011);
        assert!(shortest_path(&graph, start, target).is_none());
    }

    #[test]
    fn start_equals_target() {
        let graph = diamond_network();
        let a = node_at(&graph, 79.0, 21.0);
        let found = shortest_path(&graph, a, a).unwrap();
        assert_eq!(found.nodes, vec![a]);
        assert_eq!(found.distance, 0.0);
    }
}
