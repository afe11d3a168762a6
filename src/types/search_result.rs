use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::position::LatLng;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultLocation {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultGeometry {
    pub location: SearchResultLocation,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One place from a text search. Fields we don't model are kept as-is in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub name: String,
    pub geometry: SearchResultGeometry,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchResult {
    pub fn new(name: &str, lat: f64, lng: f64) -> Self {
        Self {
            name: name.to_string(),
            geometry: SearchResultGeometry {
                location: SearchResultLocation { lat, lng },
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }

    pub fn coords(&self) -> LatLng {
        LatLng::new(self.geometry.location.lat, self.geometry.location.lng)
    }
}
