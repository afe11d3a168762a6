use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

#[async_trait]
pub trait PermissionService: Send + Sync {
    /// Ask for foreground location access. May suspend on a user prompt.
    async fn request_foreground_permission(&self) -> PermissionStatus;
}
