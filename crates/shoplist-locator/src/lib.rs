//! Nearby-store lookup.
//!
//! A [`StoreFinder`] pulls candidate stores from a [`StoreCatalog`] and keeps
//! those within the search radius that stock a wanted item. Location input
//! comes from a [`LocationProvider`] or a [`LocationSubscription`], and
//! [`NearbyStoresTracker`] recomputes results as new fixes arrive.

pub mod catalog;
pub mod error;
pub mod finder;
pub mod geolocation;
mod rate_limit;
pub mod tracker;

pub use catalog::{build_catalog, ConfiguredCatalog, FileCatalog, HttpCatalog, MockCatalog, StoreCatalog};
pub use error::LocatorError;
pub use finder::StoreFinder;
pub use geolocation::{
    current_location_with_timeout, location_channel, spawn_polling_watch, FixedLocationProvider,
    GeolocationError, LocationEvent, LocationFeed, LocationProvider, LocationSubscription,
    UnsupportedLocationProvider,
};
pub use tracker::{NearbyStoresTracker, NearbyUpdate};
