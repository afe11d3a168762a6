use std::time::Duration;

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

use crate::types::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationAccuracy {
    Lowest,
    Low,
    Balanced,
    High,
    Highest,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatchOptions {
    pub accuracy: LocationAccuracy,
    /// Minimum time between two delivered updates
    pub min_interval: Duration,
    /// Minimum movement between two delivered updates
    pub min_distance_meters: f64,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            accuracy: LocationAccuracy::Highest,
            min_interval: Duration::from_millis(1000),
            min_distance_meters: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LocationError {
    Timeout(Duration),
    Unavailable(String),
}

impl std::fmt::Display for LocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LocationError::Timeout(d) => {
                write!(f, "No position fix within {}ms", d.as_millis())
            }
            LocationError::Unavailable(e) => write!(f, "Location unavailable: {}", e),
        }
    }
}

impl std::error::Error for LocationError {}

pub type PositionUpdates = BoxStream<'static, Position>;

#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Position, LocationError>;

    /// Open a continuous subscription. Dropping the stream ends it.
    fn watch_position(&self, options: WatchOptions) -> Result<PositionUpdates, LocationError>;
}
