use crate::types::{app_state::AppState, search_result::SearchResult};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct GetPlacesResponseData {
    pub search_enabled: bool,
    pub results: Vec<SearchResult>,
}

#[derive(Serialize, Deserialize)]
pub struct GetPlacesResponse {
    pub data: GetPlacesResponseData,
}

pub async fn get_places(State(state): State<AppState>) -> Json<GetPlacesResponse> {
    let results = state.screen.state().await.results;

    Json(GetPlacesResponse {
        data: GetPlacesResponseData {
            search_enabled: state.screen.search_enabled(),
            results,
        },
    })
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::{app::gen_mock_app, types::position::Position};

    #[tokio::test]
    async fn test_results_keep_upstream_fields() {
        let mut mock_app = gen_mock_app().await;

        mock_app
            .places_server
            .mock("GET", "/maps/api/place/textsearch/json")
            .match_query(mockito::Matcher::Regex(".*".to_string()))
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "status": "OK",
                    "results": [
                        {
                            "name": "Clinica Sur",
                            "formatted_address": "Av. Siempre Viva 742",
                            "geometry": { "location": { "lat": -34.6, "lng": -58.38 } }
                        }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        mock_app.state.device_feed.push(Position::new(-34.61, -58.39));
        mock_app.state.screen.bootstrap().await.unwrap();

        let response = mock_app
            .app
            .oneshot(Request::builder().uri("/places").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: GetPlacesResponse = serde_json::from_slice(&body).unwrap();

        assert!(body.data.search_enabled);
        assert_eq!(body.data.results.len(), 1);
        assert_eq!(body.data.results[0].name, "Clinica Sur");
        assert_eq!(
            body.data.results[0].extra["formatted_address"],
            "Av. Siempre Viva 742"
        );
    }
}
