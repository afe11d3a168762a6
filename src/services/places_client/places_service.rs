use tracing::debug;
use urlencoding::encode;

use super::types::{
    google_text_search_response::GoogleTextSearchResponse, places_service_error::PlacesServiceError,
};
use crate::types::{position::LatLng, search_result::SearchResult};

pub const DEFAULT_PLACES_HOST: &str = "https://maps.googleapis.com";

#[derive(Clone)]
pub struct PlacesServiceConfig {
    pub api_key: String,
    pub host: String,
}

#[derive(Clone)]
pub struct PlacesService {
    config: PlacesServiceConfig,
    client: reqwest::Client,
}

pub struct TextSearchInput {
    pub query: String,
    pub location: LatLng,
    pub radius_meters: u32,
}

pub struct TextSearchOutput {
    pub results: Vec<SearchResult>,
}

impl PlacesService {
    pub fn new(config: PlacesServiceConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub async fn text_search(
        &self,
        input: TextSearchInput,
    ) -> Result<TextSearchOutput, PlacesServiceError> {
        let url = format!(
            "{}/maps/api/place/textsearch/json?query={}&location={},{}&radius={}&key={}",
            self.config.host,
            encode(&input.query),
            input.location.latitude,
            input.location.longitude,
            input.radius_meters,
            encode(&self.config.api_key)
        );

        debug!(
            "Searching places for {:?} within {}m of {},{}",
            input.query, input.radius_meters, input.location.latitude, input.location.longitude
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| PlacesServiceError::Network(format!("Failed to send request: {}", e)))?;

        let body = resp
            .json::<GoogleTextSearchResponse>()
            .await
            .map_err(|e| {
                PlacesServiceError::MalformedResponse(format!(
                    "Failed to get response body: {}",
                    e
                ))
            })?;

        match body.status.as_deref() {
            None | Some("OK") | Some("ZERO_RESULTS") => {}
            Some(status) => {
                return Err(PlacesServiceError::Upstream(format!(
                    "{}: {}",
                    status,
                    body.error_message.as_deref().unwrap_or("no error message")
                )));
            }
        }

        let results = body.results.ok_or_else(|| {
            PlacesServiceError::MalformedResponse("Response has no results field".to_string())
        })?;

        Ok(TextSearchOutput { results })
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;

    fn gen_service(host: &str) -> PlacesService {
        PlacesService::new(PlacesServiceConfig {
            api_key: "test-key".to_string(),
            host: host.to_string(),
        })
    }

    fn gen_input() -> TextSearchInput {
        TextSearchInput {
            query: "Psicologo".to_string(),
            location: LatLng::new(40.5, -73.25),
            radius_meters: 2000,
        }
    }

    #[tokio::test]
    async fn test_text_search() {
        let mut server = mockito::Server::new_async().await;

        let mock_server = server
            .mock("GET", "/maps/api/place/textsearch/json")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("query".to_string(), "Psicologo".to_string()),
                Matcher::UrlEncoded("location".to_string(), "40.5,-73.25".to_string()),
                Matcher::UrlEncoded("radius".to_string(), "2000".to_string()),
                Matcher::UrlEncoded("key".to_string(), "test-key".to_string()),
            ]))
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "status": "OK",
                    "results": [
                        {
                            "name": "Centro A",
                            "geometry": { "location": { "lat": 40.51, "lng": -73.24 } },
                            "place_id": "a"
                        },
                        {
                            "name": "Centro B",
                            "geometry": { "location": { "lat": 40.49, "lng": -73.26 } }
                        }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let output = gen_service(&server.url())
            .text_search(gen_input())
            .await
            .unwrap();

        mock_server.assert();

        assert_eq!(output.results.len(), 2);
        assert_eq!(output.results[0].name, "Centro A");
        assert_eq!(output.results[0].extra["place_id"], "a");
        assert_eq!(output.results[1].coords(), LatLng::new(40.49, -73.26));
    }

    #[tokio::test]
    async fn test_query_is_url_encoded() {
        let mut server = mockito::Server::new_async().await;

        let mock_server = server
            .mock("GET", "/maps/api/place/textsearch/json")
            .match_query(Matcher::UrlEncoded(
                "query".to_string(),
                "café & bar".to_string(),
            ))
            .with_body(json!({ "results": [] }).to_string())
            .create_async()
            .await;

        let output = gen_service(&server.url())
            .text_search(TextSearchInput {
                query: "café & bar".to_string(),
                ..gen_input()
            })
            .await
            .unwrap();

        mock_server.assert();
        assert!(output.results.is_empty());
    }

    #[tokio::test]
    async fn test_missing_results_is_malformed() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("GET", "/maps/api/place/textsearch/json")
            .match_query(Matcher::Any)
            .with_body(json!({ "status": "OK" }).to_string())
            .create_async()
            .await;

        let err = gen_service(&server.url())
            .text_search(gen_input())
            .await
            .err()
            .unwrap();

        assert!(matches!(err, PlacesServiceError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_denied_status_is_upstream_error() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("GET", "/maps/api/place/textsearch/json")
            .match_query(Matcher::Any)
            .with_body(
                json!({
                    "status": "REQUEST_DENIED",
                    "error_message": "The provided API key is invalid.",
                    "results": []
                })
                .to_string(),
            )
            .create_async()
            .await;

        let err = gen_service(&server.url())
            .text_search(gen_input())
            .await
            .err()
            .unwrap();

        match err {
            PlacesServiceError::Upstream(msg) => {
                assert!(msg.contains("REQUEST_DENIED"));
                assert!(msg.contains("API key is invalid"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_is_network_error() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("GET", "/maps/api/place/textsearch/json")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let err = gen_service(&server.url())
            .text_search(gen_input())
            .await
            .err()
            .unwrap();

        assert!(matches!(err, PlacesServiceError::Network(_)));
    }
}
