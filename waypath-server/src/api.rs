//! HTTP API: route planning, catalog queries and health.
//!
//! Route handlers always answer 200 with a renderable route. The resolution
//! chain is the path network first, then the optional remote provider, then
//! the straight-line fallback; the `source` field tells the client which
//! stage answered.

use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use geo::Point;
use serde::{Deserialize, Serialize};
use tower::limit::ConcurrencyLimitLayer;
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use waypath_core::model::{Location, LocationCategory};
use waypath_core::routing::{Route, RoutePoint};
use waypath_core::{direct_route, graph_route, graph_route_to_location};

use crate::state::AppState;

pub fn build_router(
    state: AppState,
    request_timeout: Duration,
    concurrency_limit: usize,
) -> Router {
    Router::new()
        .route("/api/v1/route", post(route_handler))
        .route("/api/v1/route/location", post(location_route_handler))
        .route("/api/v1/locations", get(locations_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(request_timeout))
                .layer(ConcurrencyLimitLayer::new(concurrency_limit)),
        )
        .with_state(state)
}

async fn handle_middleware_error(err: BoxError) -> (StatusCode, Json<ErrorBody>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(ErrorBody {
                error: "request timed out".to_string(),
            }),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: err.to_string(),
            }),
        )
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Which stage of the resolution chain produced the route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum RouteSource {
    Graph,
    Remote,
    Direct,
}

#[derive(Debug, Serialize)]
struct RouteEnvelope {
    source: RouteSource,
    #[serde(flatten)]
    route: Route,
}

#[derive(Debug, Deserialize)]
struct RouteRequest {
    from: RoutePoint,
    to: RoutePoint,
}

#[derive(Debug, Deserialize)]
struct LocationRouteRequest {
    from: RoutePoint,
    location_id: String,
}

async fn route_handler(
    State(state): State<AppState>,
    Json(request): Json<RouteRequest>,
) -> Json<RouteEnvelope> {
    let from = Point::from(request.from);
    let to = Point::from(request.to);

    let (source, route) = match graph_route(&state.model, from, to) {
        Ok(route) => (RouteSource::Graph, route),
        Err(err) => {
            debug!(%err, "path network could not answer");
            remote_or_direct(&state, from, to).await
        }
    };
    Json(RouteEnvelope { source, route })
}

async fn location_route_handler(
    State(state): State<AppState>,
    Json(request): Json<LocationRouteRequest>,
) -> Result<Json<RouteEnvelope>, ApiError> {
    let from = Point::from(request.from);
    let destination = state
        .model
        .locations
        .get(&request.location_id)
        .map(|location| location.position)
        .ok_or_else(|| ApiError::UnknownLocation(request.location_id.clone()))?;

    let (source, route) = match graph_route_to_location(&state.model, from, &request.location_id) {
        Ok(route) => (RouteSource::Graph, route),
        Err(err) => {
            debug!(location = %request.location_id, %err, "path network could not answer");
            remote_or_direct(&state, from, destination).await
        }
    };
    Ok(Json(RouteEnvelope { source, route }))
}

/// The remote leg of the chain; the direct route is the terminal stage
async fn remote_or_direct(
    state: &AppState,
    from: Point<f64>,
    to: Point<f64>,
) -> (RouteSource, Route) {
    if let Some(remote) = &state.remote {
        match remote.fetch_route(from, to).await {
            Ok(route) => return (RouteSource::Remote, route),
            Err(err) => warn!(%err, "remote routing failed, walking direct"),
        }
    }
    (RouteSource::Direct, direct_route(from, to))
}

#[derive(Debug)]
enum ApiError {
    UnknownLocation(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::UnknownLocation(id) => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    error: format!("unknown location: {id}"),
                }),
            )
                .into_response(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct LocationsQuery {
    q: Option<String>,
    category: Option<LocationCategory>,
}

#[derive(Debug, Serialize)]
struct LocationEntry {
    id: String,
    name: String,
    lat: f64,
    lng: f64,
    category: LocationCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl From<&Location> for LocationEntry {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id.clone(),
            name: location.name.clone(),
            lat: location.position.y(),
            lng: location.position.x(),
            category: location.category,
            description: location.description.clone(),
        }
    }
}

async fn locations_handler(
    State(state): State<AppState>,
    Query(query): Query<LocationsQuery>,
) -> Json<Vec<LocationEntry>> {
    let catalog = &state.model.locations;
    let hits = match query.q.as_deref() {
        Some(q) => catalog.search(q),
        None => catalog.iter().collect(),
    };

    let entries = hits
        .into_iter()
        .filter(|location| {
            query
                .category
                .is_none_or(|category| location.category == category)
        })
        .map(LocationEntry::from)
        .collect();
    Json(entries)
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    path_nodes: usize,
    path_edges: usize,
    locations: usize,
}

async fn health_handler(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        path_nodes: state.model.graph.node_count(),
        path_edges: state.model.graph.edge_count(),
        locations: state.model.locations.len(),
    })
}
