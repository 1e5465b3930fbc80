//! Route result types shared by the graph router, the fallback router and
//! any external provider

use geo::{Coord, LineString, Point};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::turns::Maneuver;
use crate::Error;
use crate::geometry::coord_key;

/// A single route coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub lat: f64,
    pub lng: f64,
}

impl RoutePoint {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Rounded key matching the graph builder's junction deduplication
    pub(crate) fn key(self) -> (i64, i64) {
        coord_key(Coord {
            x: self.lng,
            y: self.lat,
        })
    }
}

impl From<Point<f64>> for RoutePoint {
    fn from(point: Point<f64>) -> Self {
        Self {
            lat: point.y(),
            lng: point.x(),
        }
    }
}

impl From<Coord<f64>> for RoutePoint {
    fn from(coord: Coord<f64>) -> Self {
        Self {
            lat: coord.y,
            lng: coord.x,
        }
    }
}

impl From<RoutePoint> for Point<f64> {
    fn from(point: RoutePoint) -> Self {
        Point::new(point.lng, point.lat)
    }
}

/// One turn-by-turn instruction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteStep {
    pub instruction: String,
    /// Meters covered by this step (0 for pure-maneuver markers)
    pub distance: u32,
    /// Seconds covered by this step
    pub duration: u32,
    pub point: RoutePoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maneuver: Option<Maneuver>,
}

/// A renderable walking route
///
/// `coordinates` is the polyline to draw, `steps` feeds the turn-by-turn
/// panel. Distances are rounded meters, durations rounded seconds at campus
/// walking speed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub coordinates: Vec<RoutePoint>,
    pub distance: u32,
    pub duration: u32,
    pub steps: Vec<RouteStep>,
}

impl Route {
    /// Converts the route to a `GeoJSON` `FeatureCollection`: one
    /// `LineString` feature for the polyline plus one `Point` feature per
    /// step.
    ///
    /// # Errors
    ///
    /// Returns an error if feature serialization fails.
    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        let mut features = Vec::with_capacity(self.steps.len() + 1);

        let coords: Vec<Coord<f64>> = self
            .coordinates
            .iter()
            .map(|point| Coord {
                x: point.lng,
                y: point.lat,
            })
            .collect();
        let geometry = Geometry::new(GeoJsonValue::from(&LineString::new(coords)));

        let value = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "feature_type": "route",
                "distance": self.distance,
                "duration": self.duration,
            }
        });
        features.push(feature_from_value(value)?);

        for (index, step) in self.steps.iter().enumerate() {
            let geometry =
                Geometry::new(GeoJsonValue::from(&Point::new(step.point.lng, step.point.lat)));
            let value = json!({
                "type": "Feature",
                "geometry": geometry,
                "properties": {
                    "feature_type": "step",
                    "step_index": index,
                    "instruction": step.instruction,
                    "distance": step.distance,
                    "duration": step.duration,
                    "maneuver": step.maneuver,
                }
            });
            features.push(feature_from_value(value)?);
        }

        Ok(FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        })
    }

    /// # Errors
    ///
    /// Returns an error if feature serialization fails.
    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()?).map_err(|e| Error::GeoJsonError(e.to_string()))
    }

    /// Summary distance for display ("340 m", "1.2 km")
    #[must_use]
    pub fn distance_text(&self) -> String {
        if self.distance < 1000 {
            format!("{} m", self.distance)
        } else {
            format!("{:.1} km", f64::from(self.distance) / 1000.0)
        }
    }

    /// Summary walking time for display ("< 1 min", "4 min")
    #[must_use]
    pub fn duration_text(&self) -> String {
        let minutes = self.duration.div_ceil(60);
        if minutes < 1 {
            "< 1 min".to_string()
        } else {
            format!("{minutes} min")
        }
    }
}

fn feature_from_value(value: serde_json::Value) -> Result<Feature, Error> {
    Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

/// Rounds a non-negative measure to the nearest whole unit
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn round_to_u32(value: f64) -> u32 {
    value.round() as u32
}
