use std::sync::Arc;

use crate::{
    platform::{device_feed::DeviceFeed, recording_map::RecordingMap},
    screen::location_screen::LocationScreen,
};

#[derive(Clone)]
pub struct AppState {
    pub screen: Arc<LocationScreen>,
    pub device_feed: DeviceFeed,
    pub map: RecordingMap,
}
