use crate::{
    screen::screen_error::ScreenPhase,
    types::{app_state::AppState, position::Position},
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct GetPositionResponseData {
    pub position: Option<Position>,
    pub phase: ScreenPhase,
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct GetPositionResponse {
    pub data: GetPositionResponseData,
}

pub async fn get_position(State(state): State<AppState>) -> Json<GetPositionResponse> {
    let screen_state = state.screen.state().await;

    Json(GetPositionResponse {
        data: GetPositionResponseData {
            position: screen_state.current_position,
            phase: screen_state.phase,
            error: screen_state.error.map(|e| e.to_string()),
        },
    })
}
