use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use tracing::debug;

use super::map_view::MapView;
use crate::types::{
    map_scene::{FitOptions, MapCommand},
    position::LatLng,
};

const DEFAULT_CAPACITY: usize = 256;

/// Headless map widget: keeps the most recent camera commands so a client can
/// replay them.
#[derive(Clone)]
pub struct RecordingMap {
    commands: Arc<Mutex<VecDeque<MapCommand>>>,
    capacity: usize,
}

impl RecordingMap {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn commands(&self) -> Vec<MapCommand> {
        match self.commands.lock() {
            Ok(commands) => commands.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    fn record(&self, command: MapCommand) {
        let mut commands = match self.commands.lock() {
            Ok(commands) => commands,
            Err(poisoned) => poisoned.into_inner(),
        };

        if commands.len() == self.capacity {
            commands.pop_front();
        }
        commands.push_back(command);
    }
}

impl Default for RecordingMap {
    fn default() -> Self {
        Self::new()
    }
}

impl MapView for RecordingMap {
    fn animate_camera(&self, center: LatLng) {
        debug!("Camera to {},{}", center.latitude, center.longitude);
        self.record(MapCommand::AnimateCamera { center });
    }

    fn fit_to_coordinates(&self, coordinates: &[LatLng], options: FitOptions) {
        debug!("Fitting camera to {} coordinates", coordinates.len());
        self.record(MapCommand::FitToCoordinates {
            coordinates: coordinates.to_vec(),
            edge_padding: options.edge_padding,
            animated: options.animated,
        });
    }
}
