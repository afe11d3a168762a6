use serde::{Deserialize, Serialize};

use crate::platform::location::LocationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenPhase {
    Unpermitted,
    PermissionDenied,
    LocationUnavailable,
    PositionKnown,
    PositionKnownWithResults,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenError {
    PermissionDenied,
    LocationUnavailable(LocationError),
}

impl std::fmt::Display for ScreenError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ScreenError::PermissionDenied => write!(f, "Foreground location permission denied"),
            ScreenError::LocationUnavailable(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ScreenError {}
