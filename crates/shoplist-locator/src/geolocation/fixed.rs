use shoplist_core::{LocationData, PositionOptions};

use super::{GeolocationError, LocationProvider};

/// Reports a configured position. Stands in for device geolocation on hosts
/// that have none.
#[derive(Debug, Clone)]
pub struct FixedLocationProvider {
    latitude: f64,
    longitude: f64,
    accuracy: f64,
    permission_granted: bool,
}

impl FixedLocationProvider {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: 0.0,
            permission_granted: true,
        }
    }

    #[must_use]
    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = accuracy;
        self
    }

    /// Behave as if the user refused location access.
    #[must_use]
    pub fn denied(mut self) -> Self {
        self.permission_granted = false;
        self
    }
}

impl LocationProvider for FixedLocationProvider {
    async fn request_permission(&self) -> bool {
        self.permission_granted
    }

    async fn current_location(
        &self,
        _options: PositionOptions,
    ) -> Result<LocationData, GeolocationError> {
        if !self.permission_granted {
            return Err(GeolocationError::PermissionDenied);
        }
        Ok(LocationData::now(self.latitude, self.longitude, self.accuracy))
    }
}

/// A platform without any position source.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedLocationProvider;

impl LocationProvider for UnsupportedLocationProvider {
    async fn request_permission(&self) -> bool {
        false
    }

    async fn current_location(
        &self,
        _options: PositionOptions,
    ) -> Result<LocationData, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}
