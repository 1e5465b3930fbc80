//! Parsing the walkable path survey (GeoJSON) into a [`PathGraph`]

use geo::{Coord, LineString};
use geojson::{GeoJson, Value};
use log::{error, warn};

use crate::model::PathGraph;

/// Builds a path graph from a GeoJSON feature collection.
///
/// Tolerant by contract: malformed input yields an empty graph rather than
/// an error, so a broken survey file degrades routing to straight lines
/// instead of taking the service down. Features whose geometry is not a
/// `LineString` are skipped and counted.
#[must_use]
pub fn path_graph_from_geojson(raw: &str) -> PathGraph {
    let geojson = match raw.parse::<GeoJson>() {
        Ok(geojson) => geojson,
        Err(err) => {
            error!("Path survey is not valid GeoJSON: {err}");
            return PathGraph::empty();
        }
    };
    let GeoJson::FeatureCollection(collection) = geojson else {
        error!("Path survey is not a GeoJSON feature collection");
        return PathGraph::empty();
    };

    let mut skipped = 0usize;
    let mut lines = Vec::with_capacity(collection.features.len());
    for feature in collection.features {
        match feature.geometry.map(|geometry| geometry.value) {
            Some(Value::LineString(positions)) => {
                let coords: Vec<Coord<f64>> = positions
                    .iter()
                    .filter(|position| position.len() >= 2)
                    .map(|position| Coord {
                        x: position[0],
                        y: position[1],
                    })
                    .collect();
                lines.push(LineString::new(coords));
            }
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!("Skipped {skipped} path features without LineString geometry");
    }

    PathGraph::build(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_survey_into_a_graph() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"name": "Main Avenue"},
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[79.0, 21.0], [79.0, 21.001], [79.001, 21.001]]
                    }
                },
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[79.001, 21.001], [79.001, 21.002]]
                    }
                }
            ]
        }"#;

        let graph = path_graph_from_geojson(raw);
        // every vertex becomes a node, each feature one edge pair
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn malformed_input_yields_an_empty_graph() {
        assert!(path_graph_from_geojson("{not geojson").is_empty());

        let not_a_collection = r#"{"type": "Feature", "properties": {}, "geometry": null}"#;
        assert!(path_graph_from_geojson(not_a_collection).is_empty());
    }

    #[test]
    fn non_linestring_features_are_skipped() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {"type": "Point", "coordinates": [79.0, 21.0]}
                },
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[79.0, 21.0], [79.0, 21.001]]
                    }
                }
            ]
        }"#;

        let graph = path_graph_from_geojson(raw);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn degenerate_features_do_not_create_nodes() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {"type": "LineString", "coordinates": [[79.0, 21.0]]}
                }
            ]
        }"#;

        assert!(path_graph_from_geojson(raw).is_empty());
    }
}
