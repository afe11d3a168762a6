//! Capabilities the screen needs from the device, plus the headless adapters
//! the service runs with.

pub mod configured_permission;
pub mod device_feed;
pub mod location;
pub mod map_view;
pub mod permission;
pub mod recording_map;
