use serde::{Deserialize, Serialize};

use crate::types::search_result::SearchResult;

#[derive(Serialize, Deserialize)]
pub struct GoogleTextSearchResponse {
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub results: Option<Vec<SearchResult>>,
}
