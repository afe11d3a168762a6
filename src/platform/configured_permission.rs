use async_trait::async_trait;
use tracing::debug;

use super::permission::{PermissionService, PermissionStatus};

/// Answers the permission prompt with a fixed status from configuration.
#[derive(Clone, Copy)]
pub struct ConfiguredPermission(PermissionStatus);

impl ConfiguredPermission {
    pub fn new(status: PermissionStatus) -> Self {
        Self(status)
    }
}

#[async_trait]
impl PermissionService for ConfiguredPermission {
    async fn request_foreground_permission(&self) -> PermissionStatus {
        debug!("Foreground location permission answered with {:?}", self.0);
        self.0
    }
}
