use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use futures::StreamExt;
use tokio::sync::{broadcast, watch};
use tracing::{debug, warn};

use super::location::{LocationError, LocationProvider, PositionUpdates, WatchOptions};
use crate::types::position::Position;

const UPDATE_BUFFER: usize = 64;

struct DeviceFeedInner {
    latest: watch::Sender<Option<Position>>,
    updates: broadcast::Sender<Position>,
    fix_timeout: Duration,
}

/// Location provider fed by fixes pushed from outside, e.g. a phone posting
/// its GPS readings to the service.
#[derive(Clone)]
pub struct DeviceFeed {
    inner: Arc<DeviceFeedInner>,
}

impl DeviceFeed {
    pub fn new(fix_timeout: Duration) -> Self {
        let (latest, _) = watch::channel(None);
        let (updates, _) = broadcast::channel(UPDATE_BUFFER);

        Self {
            inner: Arc::new(DeviceFeedInner {
                latest,
                updates,
                fix_timeout,
            }),
        }
    }

    pub fn push(&self, position: Position) {
        debug!("Device fix at {},{}", position.latitude, position.longitude);
        self.inner.latest.send_replace(Some(position.clone()));
        // No subscribers yet is fine, the latest fix is still kept above
        let _ = self.inner.updates.send(position);
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<Position> {
        self.inner.latest.borrow().clone()
    }
}

fn should_deliver(options: &WatchOptions, last: Option<&Position>, next: &Position) -> bool {
    let Some(last) = last else {
        return true;
    };

    let waited_long_enough = (next.timestamp - last.timestamp)
        .to_std()
        .map(|elapsed| elapsed >= options.min_interval)
        .unwrap_or(false);

    waited_long_enough
        && last.coords().distance_to(&next.coords()) >= options.min_distance_meters
}

#[async_trait]
impl LocationProvider for DeviceFeed {
    async fn current_position(&self) -> Result<Position, LocationError> {
        let mut rx = self.inner.latest.subscribe();

        let fix = tokio::time::timeout(self.inner.fix_timeout, rx.wait_for(Option::is_some)).await;

        match fix {
            Ok(Ok(position)) => position
                .clone()
                .ok_or_else(|| LocationError::Unavailable("Empty fix".to_string())),
            Ok(Err(_)) => Err(LocationError::Unavailable(
                "Device feed closed".to_string(),
            )),
            Err(_) => Err(LocationError::Timeout(self.inner.fix_timeout)),
        }
    }

    fn watch_position(&self, options: WatchOptions) -> Result<PositionUpdates, LocationError> {
        debug!(
            "Position subscription opened ({:?} accuracy, {}ms, {}m)",
            options.accuracy,
            options.min_interval.as_millis(),
            options.min_distance_meters
        );
        let rx = self.inner.updates.subscribe();

        let updates = futures::stream::unfold(
            (rx, None::<Position>),
            move |(mut rx, mut last)| async move {
                loop {
                    match rx.recv().await {
                        Ok(position) => {
                            if should_deliver(&options, last.as_ref(), &position) {
                                last = Some(position.clone());
                                return Some((position, (rx, last)));
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            warn!("Position subscriber lagged, skipped {} fixes", skipped);
                        }
                        Err(broadcast::error::RecvError::Closed) => return None,
                    }
                }
            },
        );

        Ok(updates.boxed())
    }
}
