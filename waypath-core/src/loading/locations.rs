//! Parsing the location catalog (CSV) into a [`LocationIndex`]

use std::fs::File;
use std::io::Read;
use std::path::Path;

use geo::Point;
use log::info;
use serde::Deserialize;

use crate::Error;
use crate::model::{Location, LocationCategory, LocationIndex};

/// One CSV row of the catalog; flattened coordinates, optional description
#[derive(Debug, Deserialize)]
struct LocationRecord {
    id: String,
    name: String,
    lat: f64,
    lng: f64,
    category: LocationCategory,
    description: Option<String>,
}

impl From<LocationRecord> for Location {
    fn from(record: LocationRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            position: Point::new(record.lng, record.lat),
            category: record.category,
            description: record.description.filter(|text| !text.trim().is_empty()),
        }
    }
}

/// Reads the catalog from any CSV source, dropping rows that fail to
/// deserialize
pub fn location_index_from_csv<R: Read>(reader: R) -> LocationIndex {
    let mut reader = csv::Reader::from_reader(reader);
    let locations: Vec<Location> = reader
        .deserialize::<LocationRecord>()
        .filter_map(Result::ok)
        .map(Location::from)
        .collect();
    info!("Loaded {} locations from the catalog", locations.len());
    LocationIndex::new(locations)
}

/// Reads the catalog from a file path
///
/// # Errors
///
/// Returns an error if the file cannot be opened.
pub(super) fn load_location_index(path: &Path) -> Result<LocationIndex, Error> {
    let file = File::open(path)?;
    Ok(location_index_from_csv(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_into_locations() {
        let raw = "\
id,name,lat,lng,category,description
library,Central Library,21.1022,79.0051,academic,Main reading halls
canteen,North Canteen,21.1041,79.0063,food,
";
        let catalog = location_index_from_csv(raw.as_bytes());
        assert_eq!(catalog.len(), 2);

        let library = catalog.get("library").unwrap();
        assert_eq!(library.name, "Central Library");
        assert_eq!(library.position, Point::new(79.0051, 21.1022));
        assert_eq!(library.category, LocationCategory::Academic);
        assert_eq!(library.description.as_deref(), Some("Main reading halls"));

        let canteen = catalog.get("canteen").unwrap();
        assert!(canteen.description.is_none());
    }

    #[test]
    fn malformed_rows_are_dropped() {
        let raw = "\
id,name,lat,lng,category,description
library,Central Library,21.1022,79.0051,academic,
broken,No Coordinates,not-a-number,79.0,academic,
mystery,Unknown Category,21.1,79.0,launchpad,
";
        let catalog = location_index_from_csv(raw.as_bytes());
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("library").is_some());
    }

    #[test]
    fn empty_input_yields_an_empty_catalog() {
        let catalog = location_index_from_csv("id,name,lat,lng,category,description\n".as_bytes());
        assert!(catalog.is_empty());
    }
}
