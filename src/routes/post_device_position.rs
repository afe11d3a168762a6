use crate::{
    types::{app_state::AppState, position::Position},
    utils::validated_query::ValidatedQuery,
};
use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// `range` lets NaN through since every comparison with it is false
fn all_finite(payload: &PostDevicePositionPayload) -> Result<(), ValidationError> {
    let values = [
        Some(payload.latitude),
        Some(payload.longitude),
        payload.accuracy,
        payload.altitude,
        payload.heading,
    ];

    if values.into_iter().flatten().all(f64::is_finite) {
        Ok(())
    } else {
        let mut err = ValidationError::new("non_finite");
        err.message = Some("Coordinates must be finite numbers".into());
        Err(err)
    }
}

#[derive(Validate, Deserialize)]
#[validate(schema(function = "all_finite"))]
pub struct PostDevicePositionPayload {
    #[validate(range(min = -90.0, max = 90.0, message = "Must be between -90 and 90"))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Must be between -180 and 180"))]
    pub longitude: f64,

    #[validate(range(min = 0.0, message = "Must not be negative"))]
    pub accuracy: Option<f64>,

    pub altitude: Option<f64>,

    #[validate(range(min = 0.0, max = 360.0, message = "Must be between 0 and 360"))]
    pub heading: Option<f64>,
}

#[derive(Serialize, Deserialize)]
pub struct PostDevicePositionResponse {
    pub data: Position,
}

pub async fn post_device_position(
    State(state): State<AppState>,
    ValidatedQuery(payload): ValidatedQuery<PostDevicePositionPayload>,
) -> (StatusCode, Json<PostDevicePositionResponse>) {
    let position = Position {
        latitude: payload.latitude,
        longitude: payload.longitude,
        accuracy: payload.accuracy,
        altitude: payload.altitude,
        heading: payload.heading,
        timestamp: Utc::now(),
    };

    state.device_feed.push(position.clone());

    (
        StatusCode::ACCEPTED,
        Json(PostDevicePositionResponse { data: position }),
    )
}
