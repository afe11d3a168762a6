pub mod app_state;
pub mod map_scene;
pub mod position;
pub mod search_result;
