//! Optional OSRM-compatible remote routing provider.
//!
//! A single GET per request against `{base}/route/v1/foot/...` with a
//! bounded timeout and no retries; any failure is reported to the caller,
//! who falls back to the direct route. Remote steps are translated into the
//! core instruction vocabulary where they fit; exotic maneuvers keep only
//! their instruction text.

use std::time::Duration;

use geo::Point;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use waypath_core::routing::{Maneuver, ManeuverType, Route, RoutePoint, RouteStep, TurnDirection};

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("remote request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("remote responded with status {0}")]
    Status(reqwest::StatusCode),
    #[error("remote could not route: {0}")]
    NotRouted(String),
}

/// Client for an OSRM-compatible walking router
pub struct RemoteProvider {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteProvider {
    /// Builds the provider with the timeout baked into the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches a walking route. One attempt; the timeout bounds the call.
    ///
    /// # Errors
    ///
    /// Any transport failure, non-2xx status, non-`Ok` routing code or
    /// empty route list.
    pub async fn fetch_route(
        &self,
        from: Point<f64>,
        to: Point<f64>,
    ) -> Result<Route, RemoteError> {
        let url = format!(
            "{}/route/v1/foot/{},{};{},{}?overview=full&geometries=geojson&steps=true",
            self.base_url,
            from.x(),
            from.y(),
            to.x(),
            to.y()
        );
        debug!(%url, "querying remote router");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(RemoteError::Status(response.status()));
        }

        let payload: OsrmResponse = response.json().await?;
        if payload.code != "Ok" {
            return Err(RemoteError::NotRouted(payload.code));
        }
        let Some(route) = payload.routes.into_iter().next() else {
            return Err(RemoteError::NotRouted("empty route list".to_string()));
        };

        Ok(into_route(route, from, to))
    }
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: OsrmGeometry,
    #[serde(default)]
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    #[serde(default)]
    steps: Vec<OsrmStep>,
}

#[derive(Debug, Deserialize)]
struct OsrmStep {
    #[serde(default)]
    name: String,
    distance: f64,
    duration: f64,
    maneuver: OsrmManeuver,
}

#[derive(Debug, Deserialize)]
struct OsrmManeuver {
    /// `[lng, lat]`
    location: [f64; 2],
    #[serde(rename = "type")]
    kind: String,
    modifier: Option<String>,
}

fn into_route(osrm: OsrmRoute, from: Point<f64>, to: Point<f64>) -> Route {
    let coordinates: Vec<RoutePoint> = osrm
        .geometry
        .coordinates
        .iter()
        .map(|&[lng, lat]| RoutePoint::new(lat, lng))
        .collect();

    let mut steps: Vec<RouteStep> = osrm
        .legs
        .first()
        .map(|leg| leg.steps.iter().map(step_from_osrm).collect())
        .unwrap_or_default();

    let leads_with_depart = steps
        .first()
        .is_some_and(|step| step.maneuver.is_some_and(|m| m.kind == ManeuverType::Depart));
    if !leads_with_depart {
        steps.insert(
            0,
            RouteStep {
                instruction: "Start from your location".to_string(),
                distance: 0,
                duration: 0,
                point: RoutePoint::from(from),
                maneuver: Some(Maneuver::depart()),
            },
        );
    }

    let ends_with_arrive = steps
        .last()
        .is_some_and(|step| step.instruction.to_lowercase().contains("arrive"));
    if !ends_with_arrive {
        steps.push(RouteStep {
            instruction: "Arrive at your destination".to_string(),
            distance: 0,
            duration: 0,
            point: RoutePoint::from(to),
            maneuver: Some(Maneuver::arrive()),
        });
    }

    Route {
        coordinates,
        distance: round_meters(osrm.distance),
        duration: round_meters(osrm.duration),
        steps,
    }
}

fn step_from_osrm(step: &OsrmStep) -> RouteStep {
    let modifier = step.maneuver.modifier.as_deref();
    RouteStep {
        instruction: instruction_text(&step.maneuver.kind, modifier, &step.name),
        distance: round_meters(step.distance),
        duration: round_meters(step.duration),
        point: RoutePoint::new(step.maneuver.location[1], step.maneuver.location[0]),
        maneuver: core_maneuver(&step.maneuver.kind, modifier),
    }
}

/// OSRM maneuver grammar, with an `onto {street}` suffix for named roads
fn instruction_text(kind: &str, modifier: Option<&str>, street: &str) -> String {
    let mut instruction = match kind {
        "depart" => match modifier {
            Some(modifier) => format!("Head {modifier}"),
            None => "Head".to_string(),
        },
        "turn" => match modifier {
            Some("left") => "Turn left".to_string(),
            Some("right") => "Turn right".to_string(),
            Some("slight left") => "Bear left".to_string(),
            Some("slight right") => "Bear right".to_string(),
            Some("sharp left") => "Take sharp left".to_string(),
            Some("sharp right") => "Take sharp right".to_string(),
            _ => "Continue".to_string(),
        },
        "continue" => "Continue straight".to_string(),
        "new name" => "Continue".to_string(),
        "merge" => match modifier {
            Some(modifier) => format!("Merge {modifier}"),
            None => "Merge".to_string(),
        },
        "fork" => match modifier {
            Some("left") => "Keep left".to_string(),
            Some("right") => "Keep right".to_string(),
            _ => "Continue at fork".to_string(),
        },
        "end of road" => match modifier {
            Some("left") => "Turn left at end of road".to_string(),
            Some("right") => "Turn right at end of road".to_string(),
            _ => "Continue at end of road".to_string(),
        },
        "arrive" => "Arrive at your destination".to_string(),
        _ => "Continue".to_string(),
    };

    if !street.is_empty() && kind != "arrive" && kind != "depart" {
        instruction.push_str(" onto ");
        instruction.push_str(street);
    }
    instruction
}

/// Maps OSRM maneuvers onto the core vocabulary where they fit
fn core_maneuver(kind: &str, modifier: Option<&str>) -> Option<Maneuver> {
    match kind {
        "depart" => Some(Maneuver::depart()),
        "arrive" => Some(Maneuver::arrive()),
        "continue" | "new name" => Some(Maneuver::straight()),
        "turn" => match modifier {
            Some("left") => Some(Maneuver::turn(TurnDirection::Left)),
            Some("right") => Some(Maneuver::turn(TurnDirection::Right)),
            Some("slight left") => Some(Maneuver::turn(TurnDirection::SlightLeft)),
            Some("slight right") => Some(Maneuver::turn(TurnDirection::SlightRight)),
            _ => None,
        },
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_meters(value: f64) -> u32 {
    value.round() as u32
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn instruction_grammar_matches_the_maneuver() {
        assert_eq!(instruction_text("turn", Some("left"), ""), "Turn left");
        assert_eq!(instruction_text("turn", Some("slight right"), ""), "Bear right");
        assert_eq!(
            instruction_text("turn", Some("sharp left"), ""),
            "Take sharp left"
        );
        assert_eq!(instruction_text("continue", None, ""), "Continue straight");
        assert_eq!(instruction_text("new name", None, ""), "Continue");
        assert_eq!(instruction_text("merge", Some("left"), ""), "Merge left");
        assert_eq!(instruction_text("fork", Some("right"), ""), "Keep right");
        assert_eq!(
            instruction_text("end of road", Some("left"), ""),
            "Turn left at end of road"
        );
        assert_eq!(instruction_text("depart", Some("north"), ""), "Head north");
        assert_eq!(instruction_text("roundabout", None, ""), "Continue");
    }

    #[test]
    fn street_names_are_appended_except_at_the_ends() {
        assert_eq!(
            instruction_text("turn", Some("right"), "College Road"),
            "Turn right onto College Road"
        );
        assert_eq!(instruction_text("depart", None, "College Road"), "Head");
        assert_eq!(
            instruction_text("arrive", None, "College Road"),
            "Arrive at your destination"
        );
    }

    #[test]
    fn exotic_maneuvers_keep_only_their_text() {
        assert_eq!(core_maneuver("turn", Some("left")), Some(Maneuver::turn(TurnDirection::Left)));
        assert_eq!(core_maneuver("continue", None), Some(Maneuver::straight()));
        assert_eq!(core_maneuver("turn", Some("sharp left")), None);
        assert_eq!(core_maneuver("fork", Some("left")), None);
        assert_eq!(core_maneuver("roundabout", None), None);
    }

    fn sample_route(steps: serde_json::Value) -> OsrmRoute {
        serde_json::from_value(json!({
            "distance": 412.7,
            "duration": 301.2,
            "geometry": {
                "coordinates": [[79.0040, 21.1030], [79.0050, 21.1034], [79.0078, 21.1014]]
            },
            "legs": [{"steps": steps}]
        }))
        .expect("sample payload deserializes")
    }

    #[test]
    fn synthesizes_depart_and_arrive_when_missing() {
        let osrm = sample_route(json!([
            {
                "name": "",
                "distance": 412.7,
                "duration": 301.2,
                "maneuver": {"location": [79.0050, 21.1034], "type": "turn", "modifier": "right"}
            }
        ]));

        let route = into_route(osrm, Point::new(79.0040, 21.1030), Point::new(79.0078, 21.1014));

        assert_eq!(route.distance, 413);
        assert_eq!(route.duration, 301);
        assert_eq!(route.coordinates.len(), 3);
        assert_eq!(route.coordinates[0], RoutePoint::new(21.1030, 79.0040));

        assert_eq!(route.steps.len(), 3);
        assert_eq!(route.steps[0].instruction, "Start from your location");
        assert_eq!(route.steps[0].maneuver, Some(Maneuver::depart()));
        assert_eq!(route.steps[1].instruction, "Turn right");
        assert_eq!(route.steps[2].instruction, "Arrive at your destination");
    }

    #[test]
    fn keeps_the_remote_depart_and_arrive_steps() {
        let osrm = sample_route(json!([
            {
                "name": "",
                "distance": 400.0,
                "duration": 290.0,
                "maneuver": {"location": [79.0040, 21.1030], "type": "depart", "modifier": "east"}
            },
            {
                "name": "",
                "distance": 0.0,
                "duration": 0.0,
                "maneuver": {"location": [79.0078, 21.1014], "type": "arrive"}
            }
        ]));

        let route = into_route(osrm, Point::new(79.0040, 21.1030), Point::new(79.0078, 21.1014));

        assert_eq!(route.steps.len(), 2);
        assert_eq!(route.steps[0].instruction, "Head east");
        assert_eq!(route.steps[1].instruction, "Arrive at your destination");
    }
}
