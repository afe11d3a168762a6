use crate::types::{app_state::AppState, map_scene::MapScene};
use axum::{extract::State, Json};
#[cfg(test)]
use axum_macros::debug_handler;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct GetMapResponse {
    /// `None` until the device position is known
    pub data: Option<MapScene>,
}

#[cfg_attr(test, debug_handler)]
pub async fn get_map(State(state): State<AppState>) -> Json<GetMapResponse> {
    Json(GetMapResponse {
        data: state.screen.render().await,
    })
}
