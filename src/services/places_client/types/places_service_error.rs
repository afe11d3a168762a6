#[derive(Debug)]
pub enum PlacesServiceError {
    Network(String),
    Upstream(String),
    MalformedResponse(String),
}

impl std::fmt::Display for PlacesServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PlacesServiceError::Network(e) => write!(f, "Network error: {}", e),
            PlacesServiceError::Upstream(e) => write!(f, "Upstream error: {}", e),
            PlacesServiceError::MalformedResponse(e) => write!(f, "Malformed response: {}", e),
        }
    }
}

impl std::error::Error for PlacesServiceError {}
