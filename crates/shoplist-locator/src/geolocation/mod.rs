//! Position sources and the last-value location watch.

mod fixed;
mod watch;

use std::future::Future;

use shoplist_core::{LocationData, PositionOptions};
use thiserror::Error;

pub use fixed::{FixedLocationProvider, UnsupportedLocationProvider};
pub use watch::{location_channel, spawn_polling_watch, LocationEvent, LocationFeed, LocationSubscription};

/// Why a position fix could not be produced. Codes are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Location access denied. Please enable location services.")]
    PermissionDenied,

    #[error("Location unavailable. Please try again.")]
    PositionUnavailable,

    #[error("Location request timed out. Please try again.")]
    Timeout,

    #[error("Geolocation is not supported by this platform.")]
    Unsupported,

    #[error("Unknown location error")]
    Unknown(i32),
}

impl GeolocationError {
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            GeolocationError::PermissionDenied => 1,
            GeolocationError::PositionUnavailable => 2,
            GeolocationError::Timeout => 3,
            GeolocationError::Unsupported => -1,
            GeolocationError::Unknown(code) => *code,
        }
    }

    #[must_use]
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => GeolocationError::PermissionDenied,
            2 => GeolocationError::PositionUnavailable,
            3 => GeolocationError::Timeout,
            -1 => GeolocationError::Unsupported,
            other => GeolocationError::Unknown(other),
        }
    }
}

/// A device position source.
pub trait LocationProvider: Send + Sync {
    /// Whether the user has not denied location access.
    fn request_permission(&self) -> impl Future<Output = bool> + Send;

    /// A single position fix.
    ///
    /// # Errors
    ///
    /// Returns the [`GeolocationError`] kind describing why no fix is available.
    fn current_location(
        &self,
        options: PositionOptions,
    ) -> impl Future<Output = Result<LocationData, GeolocationError>> + Send;
}

/// [`LocationProvider::current_location`] bounded by `options.timeout`.
///
/// # Errors
///
/// Returns [`GeolocationError::Timeout`] if the provider does not answer in
/// time, or the provider's own error.
pub async fn current_location_with_timeout<P: LocationProvider>(
    provider: &P,
    options: PositionOptions,
) -> Result<LocationData, GeolocationError> {
    match tokio::time::timeout(options.timeout, provider.current_location(options)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::debug!(timeout = ?options.timeout, "location request timed out");
            Err(GeolocationError::Timeout)
        }
    }
}
