use log::{info, warn};
use petgraph::algo::connected_components;

use super::config::NavModelConfig;
use super::locations::load_location_index;
use super::paths::path_graph_from_geojson;
use crate::{Error, NavModel};

/// Creates a navigation model based on the provided configuration
///
/// # Errors
///
/// Returns an error if the configured files are missing or unreadable.
/// A survey that parses to an empty network is not an error; the model
/// then answers every request with a straight-line route.
pub fn create_nav_model(config: &NavModelConfig) -> Result<NavModel, Error> {
    validate_config(config)?;

    info!("Reading path survey: {}", config.paths_path.display());
    let survey = std::fs::read_to_string(&config.paths_path)?;
    let graph = path_graph_from_geojson(&survey);
    validate_network(&graph);

    info!(
        "Reading location catalog: {}",
        config.locations_path.display()
    );
    let locations = load_location_index(&config.locations_path)?;

    let model = NavModel::from_parts(graph, locations);
    info!(
        "Navigation model ready: {} path nodes, {} path edges, {} locations",
        model.graph.node_count(),
        model.graph.edge_count(),
        model.locations.len()
    );
    Ok(model)
}

fn validate_config(config: &NavModelConfig) -> Result<(), Error> {
    if !config.paths_path.exists() {
        return Err(Error::InvalidData(format!(
            "Path survey not found: {}",
            config.paths_path.display()
        )));
    }

    if !config.locations_path.exists() {
        return Err(Error::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!(
                "Location catalog not found: {}",
                config.locations_path.display()
            ),
        )));
    }

    Ok(())
}

fn validate_network(graph: &crate::model::PathGraph) {
    if graph.is_empty() {
        warn!("Path network is empty; every route will fall back to a straight line");
        return;
    }

    let fragments = connected_components(&graph.graph);
    if fragments > 1 {
        warn!(
            "Path network splits into {fragments} disconnected fragments; routes between \
            fragments will fall back to straight lines"
        );
    }
}
