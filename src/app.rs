use std::sync::Arc;

use crate::{
    platform::{
        configured_permission::ConfiguredPermission, device_feed::DeviceFeed,
        location::WatchOptions, recording_map::RecordingMap,
    },
    routes::apply_routes,
    screen::location_screen::{LocationScreen, ScreenConfig, SearchSettings},
    services::places_client::places_service::{PlacesService, PlacesServiceConfig},
    types::app_state::AppState,
    utils::app_config::AppConfig,
};
use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

pub fn gen_state(config: &AppConfig) -> AppState {
    let device_feed = DeviceFeed::new(config.fix_timeout);
    let map = RecordingMap::new();

    let search = config.enable_search.then(|| SearchSettings {
        service: PlacesService::new(PlacesServiceConfig {
            api_key: config.places_api_key.clone(),
            host: config.places_host.clone(),
        }),
        query: config.places_query.clone(),
        radius_meters: config.places_radius_meters,
    });

    let screen = LocationScreen::new(
        Arc::new(ConfiguredPermission::new(config.location_permission)),
        Arc::new(device_feed.clone()),
        Arc::new(map.clone()),
        ScreenConfig {
            search,
            watch_options: WatchOptions::default(),
        },
    );

    AppState {
        screen: Arc::new(screen),
        device_feed,
        map,
    }
}

pub fn gen_app(state: AppState) -> Router {
    let cors_middleware = CorsLayer::new();

    apply_routes(Router::new())
        .route("/", get(root))
        .layer(cors_middleware)
        .with_state(state)
}

async fn root() -> &'static str {
    "placewatch is running"
}

#[cfg(test)]
pub struct MockApp {
    pub app: Router,
    pub state: AppState,
    pub places_server: mockito::ServerGuard,
}

#[cfg(test)]
pub async fn gen_mock_app() -> MockApp {
    use std::collections::HashMap;

    let places_server = mockito::Server::new_async().await;

    let config = AppConfig::from_vars(HashMap::from([
        ("PLACES_API_KEY".to_string(), "key".to_string()),
        ("PLACES_HOST".to_string(), places_server.url()),
        ("FIX_TIMEOUT_SECS".to_string(), "1".to_string()),
    ]))
    .expect("Failed to build test config");

    let state = gen_state(&config);

    MockApp {
        app: gen_app(state.clone()),
        state,
        places_server,
    }
}
