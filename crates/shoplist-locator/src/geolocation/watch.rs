//! Last-value-wins location updates.
//!
//! A [`LocationFeed`] publishes fixes (or errors); each
//! [`LocationSubscription`] sees only the newest one. Values published while
//! a subscriber is busy are overwritten, not queued.

use std::sync::Arc;
use std::time::Duration;

use shoplist_core::{LocationData, PositionOptions};
use tokio::sync::watch;

use super::{GeolocationError, LocationProvider};

pub type LocationEvent = Result<LocationData, GeolocationError>;

/// Producer side of a location watch.
#[derive(Debug)]
pub struct LocationFeed {
    tx: watch::Sender<Option<LocationEvent>>,
}

/// Consumer side of a location watch.
#[derive(Debug)]
pub struct LocationSubscription {
    rx: Option<watch::Receiver<Option<LocationEvent>>>,
}

/// A connected feed and its first subscription.
#[must_use]
pub fn location_channel() -> (LocationFeed, LocationSubscription) {
    let (tx, rx) = watch::channel(None);
    (LocationFeed { tx }, LocationSubscription { rx: Some(rx) })
}

impl LocationFeed {
    pub fn publish(&self, location: LocationData) {
        self.tx.send_replace(Some(Ok(location)));
    }

    pub fn fail(&self, error: GeolocationError) {
        self.tx.send_replace(Some(Err(error)));
    }

    /// A new subscription that starts after the current value.
    #[must_use]
    pub fn subscribe(&self) -> LocationSubscription {
        LocationSubscription {
            rx: Some(self.tx.subscribe()),
        }
    }

    /// True once every subscription has stopped or been dropped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl LocationSubscription {
    /// Wait for the newest event not yet seen.
    ///
    /// Returns `None` once the subscription is stopped or the feed is gone
    /// and its last value has been delivered.
    pub async fn next(&mut self) -> Option<LocationEvent> {
        loop {
            let rx = self.rx.as_mut()?;
            if rx.changed().await.is_err() {
                self.rx = None;
                return None;
            }
            if let Some(event) = rx.borrow_and_update().clone() {
                return Some(event);
            }
        }
    }

    /// Stop receiving updates. Calling this more than once is harmless.
    pub fn stop(&mut self) {
        if self.rx.take().is_some() {
            tracing::debug!("location watch stopped");
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.rx.is_some()
    }
}

/// Poll `provider` every `interval` and publish each result.
///
/// The polling task exits on its own once the returned subscription (and any
/// others made from it) is stopped or dropped.
pub fn spawn_polling_watch<P>(
    provider: Arc<P>,
    options: PositionOptions,
    interval: Duration,
) -> LocationSubscription
where
    P: LocationProvider + 'static,
{
    let (feed, subscription) = location_channel();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if feed.is_closed() {
                break;
            }
            match super::current_location_with_timeout(provider.as_ref(), options).await {
                Ok(location) => feed.publish(location),
                Err(error) => {
                    tracing::warn!(code = error.code(), %error, "location watch error");
                    feed.fail(error);
                }
            }
        }
        tracing::debug!("location polling task finished");
    });
    subscription
}
