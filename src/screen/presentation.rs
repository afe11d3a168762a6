use crate::types::{
    map_scene::{MapScene, Marker, Region},
    position::Position,
    search_result::SearchResult,
};

pub const REGION_DELTA: f64 = 0.005;

/// Builds the map frame for the given state. Nothing is drawn until the
/// device position is known.
pub fn render(position: Option<&Position>, results: &[SearchResult]) -> Option<MapScene> {
    let position = position?;

    let mut markers = Vec::with_capacity(results.len() + 1);
    markers.push(Marker {
        key: "device-position".to_string(),
        coordinate: position.coords(),
        title: None,
        description: None,
    });

    markers.extend(results.iter().enumerate().map(|(i, result)| Marker {
        key: format!("search-item-{}", i),
        coordinate: result.coords(),
        title: Some(result.name.clone()),
        description: Some(String::new()),
    }));

    Some(MapScene {
        region: Region {
            latitude: position.latitude,
            longitude: position.longitude,
            latitude_delta: REGION_DELTA,
            longitude_delta: REGION_DELTA,
        },
        markers,
    })
}
