use crate::types::{map_scene::FitOptions, position::LatLng};

/// Imperative half of the map widget. Commands are fire-and-forget.
pub trait MapView: Send + Sync {
    fn animate_camera(&self, center: LatLng);

    fn fit_to_coordinates(&self, coordinates: &[LatLng], options: FitOptions);
}
