use crate::types::{app_state::AppState, map_scene::MapCommand};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct GetMapCommandsResponseData {
    pub commands: Vec<MapCommand>,
}

#[derive(Serialize, Deserialize)]
pub struct GetMapCommandsResponse {
    pub data: GetMapCommandsResponseData,
}

pub async fn get_map_commands(State(state): State<AppState>) -> Json<GetMapCommandsResponse> {
    Json(GetMapCommandsResponse {
        data: GetMapCommandsResponseData {
            commands: state.map.commands(),
        },
    })
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use futures::StreamExt;
    use tower::ServiceExt;

    use super::*;
    use crate::{app::gen_mock_app, types::position::Position};

    #[tokio::test]
    async fn test_lists_camera_commands() {
        let mock_app = gen_mock_app().await;

        mock_app
            .state
            .screen
            .follow_updates(futures::stream::iter(vec![Position::new(10.0, 20.0)]).boxed())
            .await;

        let response = mock_app
            .app
            .oneshot(
                Request::builder()
                    .uri("/map/commands")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(body["data"]["commands"][0]["type"], "animate_camera");
        assert_eq!(body["data"]["commands"][0]["center"]["latitude"], 10.0);
    }
}
