//! Recompute nearby stores as the user's location changes.

use std::sync::Arc;

use shoplist_core::{LocationData, Store};
use shoplist_settings::{KeyValueStorage, SettingsRepository};

use crate::catalog::StoreCatalog;
use crate::error::LocatorError;
use crate::finder::StoreFinder;
use crate::geolocation::{GeolocationError, LocationSubscription};

/// Outcome of processing one location event.
#[derive(Debug, Clone, PartialEq)]
pub enum NearbyUpdate {
    Stores {
        location: LocationData,
        stores: Vec<Store>,
    },
    /// Location sharing is off, so the fix was ignored.
    SharingDisabled,
    /// The location source reported an error; the watch continues.
    LocationError(GeolocationError),
}

/// Applies the current settings and wanted items to each new location.
///
/// Settings are re-read for every event so radius or sharing changes take
/// effect on the next fix.
pub struct NearbyStoresTracker<C, S> {
    finder: StoreFinder<C>,
    settings: Arc<SettingsRepository<S>>,
    wanted_items: Vec<String>,
}

impl<C: StoreCatalog, S: KeyValueStorage> NearbyStoresTracker<C, S> {
    pub fn new(finder: StoreFinder<C>, settings: Arc<SettingsRepository<S>>) -> Self {
        Self {
            finder,
            settings,
            wanted_items: Vec::new(),
        }
    }

    /// Replace the item names used to filter stores, usually
    /// [`ShoppingListBook::wanted_item_names`](shoplist_core::ShoppingListBook::wanted_item_names).
    pub fn set_wanted_items(&mut self, items: Vec<String>) {
        self.wanted_items = items;
    }

    #[must_use]
    pub fn wanted_items(&self) -> &[String] {
        &self.wanted_items
    }

    /// Nearby stores for one location under the current settings.
    ///
    /// # Errors
    ///
    /// Returns the finder's error; a fetch failure is never reported as an
    /// empty store list.
    pub async fn refresh(&self, location: &LocationData) -> Result<NearbyUpdate, LocatorError> {
        self.refresh_within(location, None).await
    }

    /// Like [`refresh`](Self::refresh), but `radius_meters` replaces the saved
    /// search radius when given. Location sharing is still honoured.
    ///
    /// # Errors
    ///
    /// Returns the finder's error, including `InvalidArgument` for a negative
    /// or non-finite radius.
    pub async fn refresh_within(
        &self,
        location: &LocationData,
        radius_meters: Option<f64>,
    ) -> Result<NearbyUpdate, LocatorError> {
        let settings = self.settings.get_settings();
        if !settings.location_sharing {
            tracing::debug!("location sharing disabled; ignoring location update");
            return Ok(NearbyUpdate::SharingDisabled);
        }

        let radius = radius_meters.unwrap_or(settings.search_radius);
        let stores = self
            .finder
            .find_nearby_stores(location, Some(radius), &self.wanted_items)
            .await?;
        Ok(NearbyUpdate::Stores {
            location: location.clone(),
            stores,
        })
    }

    /// Wait for the next location event and process it.
    ///
    /// Returns `None` when the subscription has ended.
    pub async fn next_update(
        &self,
        subscription: &mut LocationSubscription,
    ) -> Option<Result<NearbyUpdate, LocatorError>> {
        match subscription.next().await? {
            Ok(location) => Some(self.refresh(&location).await),
            Err(error) => {
                tracing::warn!(code = error.code(), %error, "location update failed");
                Some(Ok(NearbyUpdate::LocationError(error)))
            }
        }
    }
}
