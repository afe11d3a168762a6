use std::sync::Arc;

use futures::StreamExt;
use tokio::{
    sync::{watch, RwLock},
    task::JoinHandle,
};
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, error, info, warn};

use super::{
    presentation,
    screen_error::{ScreenError, ScreenPhase},
};
use crate::{
    platform::{
        location::{LocationProvider, PositionUpdates, WatchOptions},
        map_view::MapView,
        permission::{PermissionService, PermissionStatus},
    },
    services::places_client::places_service::{PlacesService, TextSearchInput},
    types::{
        map_scene::{EdgePadding, FitOptions, MapScene},
        position::{LatLng, Position},
        search_result::SearchResult,
    },
};

pub const SEARCH_EDGE_PADDING: u32 = 10;

#[derive(Clone)]
pub struct SearchSettings {
    pub service: PlacesService,
    pub query: String,
    pub radius_meters: u32,
}

#[derive(Clone)]
pub struct ScreenConfig {
    /// `None` runs the map-only flow
    pub search: Option<SearchSettings>,
    pub watch_options: WatchOptions,
}

#[derive(Debug, Clone)]
pub struct ScreenState {
    pub current_position: Option<Position>,
    pub results: Vec<SearchResult>,
    pub phase: ScreenPhase,
    pub error: Option<ScreenError>,
}

impl Default for ScreenState {
    fn default() -> Self {
        Self {
            current_position: None,
            results: Vec::new(),
            phase: ScreenPhase::Unpermitted,
            error: None,
        }
    }
}

/// Live location map with an optional nearby-places overlay.
///
/// The screen owns two state fields, the latest device position and the last
/// search results, and drives the map through [MapView]. Call
/// [LocationScreen::mount] to start the permission bootstrap and the position
/// subscription; both stop when the returned [ScreenMount] is unmounted or
/// dropped.
pub struct LocationScreen {
    permission: Arc<dyn PermissionService>,
    location: Arc<dyn LocationProvider>,
    map: Arc<dyn MapView>,
    config: ScreenConfig,
    state: RwLock<ScreenState>,
    permission_status: watch::Sender<Option<PermissionStatus>>,
}

/// Keeps the screen's background tasks alive.
pub struct ScreenMount {
    cancel: CancellationToken,
    _guard: DropGuard,
    tasks: Vec<JoinHandle<()>>,
}

impl ScreenMount {
    pub async fn unmount(self) {
        self.cancel.cancel();
        for task in self.tasks {
            if let Err(e) = task.await {
                warn!("Screen task ended abnormally: {}", e);
            }
        }
        debug!("Screen unmounted");
    }
}

impl LocationScreen {
    pub fn new(
        permission: Arc<dyn PermissionService>,
        location: Arc<dyn LocationProvider>,
        map: Arc<dyn MapView>,
        config: ScreenConfig,
    ) -> Self {
        Self {
            permission,
            location,
            map,
            config,
            state: RwLock::new(ScreenState::default()),
            permission_status: watch::Sender::new(None),
        }
    }

    pub fn search_enabled(&self) -> bool {
        self.config.search.is_some()
    }

    pub async fn state(&self) -> ScreenState {
        self.state.read().await.clone()
    }

    pub async fn render(&self) -> Option<MapScene> {
        let state = self.state.read().await;
        presentation::render(state.current_position.as_ref(), &state.results)
    }

    pub fn mount(self: &Arc<Self>) -> ScreenMount {
        let cancel = CancellationToken::new();
        let mut tasks = Vec::with_capacity(2);

        let screen = Arc::clone(self);
        let token = cancel.clone();
        tasks.push(tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => debug!("Bootstrap cancelled"),
                // Failures are already logged and recorded in the phase
                _ = screen.bootstrap() => {}
            }
        }));

        match self.location.watch_position(self.config.watch_options) {
            Ok(updates) => {
                let permission_rx = self.permission_status.subscribe();
                let screen = Arc::clone(self);
                let token = cancel.clone();
                tasks.push(tokio::spawn(async move {
                    tokio::select! {
                        _ = token.cancelled() => debug!("Position subscription cancelled"),
                        _ = screen.follow_updates_once_permitted(permission_rx, updates) => {}
                    }
                }));
            }
            Err(e) => error!("Failed to subscribe to position updates: {}", e),
        }

        info!("Screen mounted");

        ScreenMount {
            _guard: cancel.clone().drop_guard(),
            cancel,
            tasks,
        }
    }

    /// Requests permission, takes one fix and runs the search when enabled.
    pub async fn bootstrap(&self) -> Result<(), ScreenError> {
        let status = self.request_permission().await;
        self.complete_bootstrap(status).await
    }

    async fn request_permission(&self) -> PermissionStatus {
        let status = self.permission.request_foreground_permission().await;
        self.permission_status.send_replace(Some(status));

        if !status.is_granted() {
            info!("Location permission denied, map stays hidden");
            let mut state = self.state.write().await;
            state.phase = ScreenPhase::PermissionDenied;
            state.error = Some(ScreenError::PermissionDenied);
        }

        status
    }

    async fn complete_bootstrap(&self, status: PermissionStatus) -> Result<(), ScreenError> {
        if !status.is_granted() {
            return Err(ScreenError::PermissionDenied);
        }

        let position = match self.location.current_position().await {
            Ok(position) => position,
            Err(e) => {
                error!("Failed to get current position: {}", e);
                let err = ScreenError::LocationUnavailable(e);
                let mut state = self.state.write().await;
                if state.current_position.is_none() {
                    state.phase = ScreenPhase::LocationUnavailable;
                }
                state.error = Some(err.clone());
                return Err(err);
            }
        };

        {
            let mut state = self.state.write().await;
            state.current_position = Some(position.clone());
            state.phase = ScreenPhase::PositionKnown;
            state.error = None;
        }

        self.search_places(&position).await;

        Ok(())
    }

    async fn follow_updates_once_permitted(
        &self,
        mut permission: watch::Receiver<Option<PermissionStatus>>,
        updates: PositionUpdates,
    ) {
        let granted = permission
            .wait_for(Option::is_some)
            .await
            .map(|status| *status == Some(PermissionStatus::Granted))
            .unwrap_or(false);

        if !granted {
            debug!("Dropping position subscription without permission");
            return;
        }

        self.follow_updates(updates).await;
    }

    /// Applies every update from the subscription until it ends.
    pub async fn follow_updates(&self, mut updates: PositionUpdates) {
        while let Some(position) = updates.next().await {
            self.apply_update(position).await;
        }
        debug!("Position subscription ended");
    }

    async fn apply_update(&self, position: Position) {
        let center = position.coords();

        {
            let mut state = self.state.write().await;
            if state.phase == ScreenPhase::PermissionDenied {
                return;
            }
            if matches!(
                state.phase,
                ScreenPhase::Unpermitted | ScreenPhase::LocationUnavailable
            ) {
                state.phase = ScreenPhase::PositionKnown;
                state.error = None;
            }
            state.current_position = Some(position);
        }

        self.map.animate_camera(center);
    }

    /// Runs the one-shot places search around `position`. Failures are logged
    /// and leave the previous results in place.
    pub async fn search_places(&self, position: &Position) {
        let Some(search) = &self.config.search else {
            return;
        };

        let output = match search
            .service
            .text_search(TextSearchInput {
                query: search.query.clone(),
                location: position.coords(),
                radius_meters: search.radius_meters,
            })
            .await
        {
            Ok(output) => output,
            Err(e) => {
                error!("Failed to search places: {}", e);
                return;
            }
        };

        info!("Found {} places for {:?}", output.results.len(), search.query);

        let mut coordinates = output
            .results
            .iter()
            .map(SearchResult::coords)
            .collect::<Vec<LatLng>>();

        let device = {
            let mut state = self.state.write().await;
            state.results = output.results;
            state.phase = ScreenPhase::PositionKnownWithResults;
            state
                .current_position
                .as_ref()
                .map(Position::coords)
                .unwrap_or_else(|| position.coords())
        };

        if coordinates.is_empty() {
            return;
        }

        coordinates.push(device);
        self.map.fit_to_coordinates(
            &coordinates,
            FitOptions {
                edge_padding: EdgePadding::uniform(SEARCH_EDGE_PADDING),
                animated: true,
            },
        );
    }
}
