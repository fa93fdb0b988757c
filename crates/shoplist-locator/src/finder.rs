//! Distance and availability filtering over a store catalog.

use shoplist_core::{filter_nearby, LocationData, Store, DEFAULT_SEARCH_RADIUS_METERS};

use crate::catalog::StoreCatalog;
use crate::error::LocatorError;

pub struct StoreFinder<C> {
    catalog: C,
}

impl<C: StoreCatalog> StoreFinder<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Stores within `radius_meters` (default 100) of `user_location` that
    /// stock at least one of `wanted_item_names`, in catalog order, each with
    /// a freshly computed `distance`.
    ///
    /// Arguments are validated before the catalog is queried.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::InvalidArgument`] for a bad radius or location,
    /// or the catalog's error if candidates cannot be retrieved.
    pub async fn find_nearby_stores(
        &self,
        user_location: &LocationData,
        radius_meters: Option<f64>,
        wanted_item_names: &[String],
    ) -> Result<Vec<Store>, LocatorError> {
        // Validate up front so a bad request never costs a catalog round trip.
        filter_nearby(Vec::new(), user_location, radius_meters, wanted_item_names)?;

        let candidates = self.catalog.list_candidate_stores().await?;
        let total = candidates.len();
        let nearby = filter_nearby(candidates, user_location, radius_meters, wanted_item_names)?;
        tracing::debug!(
            latitude = user_location.latitude,
            longitude = user_location.longitude,
            radius = radius_meters.unwrap_or(DEFAULT_SEARCH_RADIUS_METERS),
            wanted = wanted_item_names.len(),
            candidates = total,
            matched = nearby.len(),
            "nearby store search"
        );
        Ok(nearby)
    }

    /// The catalog entry for `store_id`, if any.
    ///
    /// # Errors
    ///
    /// Returns the catalog's error if it cannot be queried.
    pub async fn store_details(&self, store_id: &str) -> Result<Option<Store>, LocatorError> {
        self.catalog.store_details(store_id).await
    }
}
