use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::validate_coordinate;
use crate::CoreError;

/// A single position fix from a geolocation provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationData {
    pub latitude: f64,
    pub longitude: f64,
    /// Reported accuracy radius in meters.
    pub accuracy: f64,
    pub timestamp: DateTime<Utc>,
}

impl LocationData {
    /// A fix captured now with the given accuracy.
    #[must_use]
    pub fn now(latitude: f64, longitude: f64, accuracy: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn coordinate(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    /// # Errors
    ///
    /// Returns [`CoreError::InvalidArgument`] if the coordinate is not finite
    /// or out of range.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_coordinate(self.latitude, self.longitude)
    }
}
