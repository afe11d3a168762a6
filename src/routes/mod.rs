use axum::{
    routing::{get, post},
    Router,
};

use crate::types::app_state::AppState;

mod get_map;
mod get_map_commands;
mod get_places;
mod get_position;
mod post_device_position;

pub fn apply_routes(app: Router<AppState>) -> Router<AppState> {
    app.route("/map", get(get_map::get_map))
        .route("/map/commands", get(get_map_commands::get_map_commands))
        .route("/places", get(get_places::get_places))
        .route("/position", get(get_position::get_position))
        .route(
            "/device-position",
            post(post_device_position::post_device_position),
        )
}
