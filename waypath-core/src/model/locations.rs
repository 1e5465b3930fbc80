//! Named points of interest and catalog queries

use std::fmt;

use geo::Point;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::geometry::haversine_distance;

/// Point-of-interest category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationCategory {
    Academic,
    Facility,
    Recreation,
    Religious,
    Food,
    Admin,
}

impl fmt::Display for LocationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Academic => "academic",
            Self::Facility => "facility",
            Self::Recreation => "recreation",
            Self::Religious => "religious",
            Self::Food => "food",
            Self::Admin => "admin",
        };
        f.write_str(label)
    }
}

/// Named campus point of interest
#[derive(Debug, Clone)]
pub struct Location {
    pub id: String,
    pub name: String,
    /// Coordinates (x = lng, y = lat)
    pub position: Point<f64>,
    pub category: LocationCategory,
    pub description: Option<String>,
}

/// Catalog of campus locations with id lookup and proximity queries
pub struct LocationIndex {
    locations: Vec<Location>,
    by_id: HashMap<String, usize>,
}

impl LocationIndex {
    /// Builds the catalog. When two entries share an id the first wins.
    #[must_use]
    pub fn new(locations: Vec<Location>) -> Self {
        let mut by_id = HashMap::with_capacity(locations.len());
        for (index, location) in locations.iter().enumerate() {
            by_id.entry(location.id.clone()).or_insert(index);
        }
        Self { locations, by_id }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Location> {
        self.index_of(id).map(|index| &self.locations[index])
    }

    /// Positional index of a location, stable for the catalog's lifetime
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Location] {
        &self.locations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Location> {
        self.locations.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Case-insensitive substring search over name, description and
    /// category. A blank query lists the whole catalog.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Location> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.locations.iter().collect();
        }

        self.locations
            .iter()
            .filter(|location| {
                location.name.to_lowercase().contains(&query)
                    || location
                        .description
                        .as_ref()
                        .is_some_and(|text| text.to_lowercase().contains(&query))
                    || location.category.to_string().contains(&query)
            })
            .collect()
    }

    /// The location closest to a point, optionally excluding one id
    #[must_use]
    pub fn nearest(&self, point: Point<f64>, exclude: Option<&str>) -> Option<&Location> {
        self.locations
            .iter()
            .filter(|location| Some(location.id.as_str()) != exclude)
            .min_by(|a, b| {
                haversine_distance(a.position, point)
                    .total_cmp(&haversine_distance(b.position, point))
            })
    }
}
