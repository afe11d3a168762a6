pub mod location_screen;
pub mod presentation;
pub mod screen_error;
