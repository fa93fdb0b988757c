//! User preferences and the partial-update type used to change them.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::stores::DEFAULT_SEARCH_RADIUS_METERS;
use crate::CoreError;

pub const MIN_SEARCH_RADIUS_METERS: f64 = 50.0;
pub const MAX_SEARCH_RADIUS_METERS: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationAccuracy {
    High,
    Balanced,
    Low,
}

impl std::fmt::Display for LocationAccuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationAccuracy::High => write!(f, "high"),
            LocationAccuracy::Balanced => write!(f, "balanced"),
            LocationAccuracy::Low => write!(f, "low"),
        }
    }
}

impl std::str::FromStr for LocationAccuracy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(LocationAccuracy::High),
            "balanced" => Ok(LocationAccuracy::Balanced),
            "low" => Ok(LocationAccuracy::Low),
            other => Err(CoreError::InvalidArgument {
                name: "location_accuracy",
                reason: format!("'{other}' is not one of high, balanced, low"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub new_stores: bool,
    pub item_availability: bool,
    pub price_alerts: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub location_sharing: bool,
    pub location_accuracy: LocationAccuracy,
    pub notifications: NotificationSettings,
    /// Meters.
    pub search_radius: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            location_sharing: true,
            location_accuracy: LocationAccuracy::Balanced,
            notifications: NotificationSettings {
                new_stores: true,
                item_availability: true,
                price_alerts: false,
            },
            search_radius: DEFAULT_SEARCH_RADIUS_METERS,
        }
    }
}

impl Settings {
    /// Apply `patch` field by field. A supplied `notifications` replaces the
    /// whole nested object; its flags are not merged individually.
    #[must_use]
    pub fn merged(&self, patch: &SettingsPatch) -> Self {
        Self {
            location_sharing: patch.location_sharing.unwrap_or(self.location_sharing),
            location_accuracy: patch.location_accuracy.unwrap_or(self.location_accuracy),
            notifications: patch.notifications.unwrap_or(self.notifications),
            search_radius: patch.search_radius.unwrap_or(self.search_radius),
        }
    }

    /// # Errors
    ///
    /// Returns [`CoreError::InvalidArgument`] if `search_radius` is not a
    /// finite value between [`MIN_SEARCH_RADIUS_METERS`] and
    /// [`MAX_SEARCH_RADIUS_METERS`].
    pub fn validate(&self) -> Result<(), CoreError> {
        let r = self.search_radius;
        if !r.is_finite() || !(MIN_SEARCH_RADIUS_METERS..=MAX_SEARCH_RADIUS_METERS).contains(&r) {
            return Err(CoreError::InvalidArgument {
                name: "search_radius",
                reason: format!(
                    "{r} must be between {MIN_SEARCH_RADIUS_METERS} and {MAX_SEARCH_RADIUS_METERS} meters"
                ),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn position_options(&self) -> PositionOptions {
        PositionOptions::for_accuracy(self.location_accuracy)
    }
}

/// A shallow partial update of [`Settings`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_sharing: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_accuracy: Option<LocationAccuracy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<NotificationSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_radius: Option<f64>,
}

impl SettingsPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl From<Settings> for SettingsPatch {
    fn from(settings: Settings) -> Self {
        Self {
            location_sharing: Some(settings.location_sharing),
            location_accuracy: Some(settings.location_accuracy),
            notifications: Some(settings.notifications),
            search_radius: Some(settings.search_radius),
        }
    }
}

/// Options handed to a geolocation provider for a single fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest cached fix the provider may return. Zero forces a fresh fix.
    pub maximum_age: Duration,
}

impl PositionOptions {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

    #[must_use]
    pub fn for_accuracy(accuracy: LocationAccuracy) -> Self {
        Self {
            enable_high_accuracy: accuracy == LocationAccuracy::High,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Self::DEFAULT_TIMEOUT,
            maximum_age: Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let s = Settings::default();
        assert!(s.location_sharing);
        assert_eq!(s.location_accuracy, LocationAccuracy::Balanced);
        assert!((s.search_radius - 100.0).abs() < f64::EPSILON);
        assert_eq!(
            s.notifications,
            NotificationSettings {
                new_stores: true,
                item_availability: true,
                price_alerts: false,
            }
        );
    }

    #[test]
    fn default_serializes_to_camel_case_json() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "locationSharing": true,
                "locationAccuracy": "balanced",
                "notifications": {
                    "newStores": true,
                    "itemAvailability": true,
                    "priceAlerts": false
                },
                "searchRadius": 100.0
            })
        );
    }

    #[test]
    fn missing_field_fails_to_parse() {
        let json = r#"{"locationSharing":true,"locationAccuracy":"low","searchRadius":100}"#;
        assert!(serde_json::from_str::<Settings>(json).is_err());
    }

    #[test]
    fn merge_changes_only_supplied_fields() {
        let base = Settings::default();
        let patch = SettingsPatch {
            search_radius: Some(250.0),
            ..SettingsPatch::default()
        };
        let merged = base.merged(&patch);
        assert!((merged.search_radius - 250.0).abs() < f64::EPSILON);
        assert_eq!(merged.notifications, base.notifications);
        assert_eq!(merged.location_accuracy, base.location_accuracy);
    }

    #[test]
    fn merge_replaces_notifications_whole() {
        let base = Settings::default();
        let patch = SettingsPatch {
            notifications: Some(NotificationSettings {
                new_stores: false,
                item_availability: false,
                price_alerts: true,
            }),
            ..SettingsPatch::default()
        };
        let merged = base.merged(&patch);
        assert!(!merged.notifications.new_stores);
        assert!(!merged.notifications.item_availability);
        assert!(merged.notifications.price_alerts);
    }

    #[test]
    fn full_patch_from_settings_is_identity() {
        let mut s = Settings::default();
        s.search_radius = 300.0;
        s.location_accuracy = LocationAccuracy::High;
        assert_eq!(s.merged(&SettingsPatch::from(s.clone())), s);
    }

    #[test]
    fn validate_bounds() {
        let mut s = Settings::default();
        s.search_radius = 50.0;
        assert!(s.validate().is_ok());
        s.search_radius = 500.0;
        assert!(s.validate().is_ok());
        s.search_radius = 49.9;
        assert!(s.validate().is_err());
        s.search_radius = f64::INFINITY;
        assert!(s.validate().is_err());
    }

    #[test]
    fn accuracy_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<LocationAccuracy>().unwrap(), LocationAccuracy::High);
        assert!("precise".parse::<LocationAccuracy>().is_err());
    }

    #[test]
    fn only_high_accuracy_enables_high_accuracy_fixes() {
        assert!(PositionOptions::for_accuracy(LocationAccuracy::High).enable_high_accuracy);
        assert!(!PositionOptions::for_accuracy(LocationAccuracy::Balanced).enable_high_accuracy);
        assert!(!PositionOptions::for_accuracy(LocationAccuracy::Low).enable_high_accuracy);
        assert_eq!(
            PositionOptions::for_accuracy(LocationAccuracy::Low).timeout,
            Duration::from_millis(5000)
        );
    }

    #[test]
    fn empty_patch_is_empty() {
        assert!(SettingsPatch::default().is_empty());
        assert!(!SettingsPatch::from(Settings::default()).is_empty());
    }
}
