//! Read / merge / reset over the persisted settings document.

use std::sync::Mutex;

use shoplist_core::{Settings, SettingsPatch};

use crate::error::{SettingsError, StorageError};
use crate::storage::KeyValueStorage;

/// Storage key holding the serialized [`Settings`].
pub const SETTINGS_STORAGE_KEY: &str = "shopping-list-settings";

/// Settings persisted under [`SETTINGS_STORAGE_KEY`].
///
/// Assumes a single writer per storage backend. Updates from this instance
/// are serialized, but two processes sharing a [`FileStorage`](crate::FileStorage)
/// directory can race and the last write wins.
pub struct SettingsRepository<S> {
    storage: S,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStorage> SettingsRepository<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Current settings, or the defaults if nothing usable is stored.
    ///
    /// A malformed or out-of-range stored value is left as is; it is only
    /// replaced by the next successful update or reset.
    pub fn get_settings(&self) -> Settings {
        let raw = match self.storage.get(SETTINGS_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Settings::default(),
            Err(error) => {
                tracing::warn!(%error, "settings storage unreadable; using defaults");
                return Settings::default();
            }
        };

        let settings = match serde_json::from_str::<Settings>(&raw) {
            Ok(settings) => settings,
            Err(error) => {
                tracing::warn!(%error, "stored settings are malformed; using defaults");
                return Settings::default();
            }
        };
        if let Err(error) = settings.validate() {
            tracing::warn!(%error, "stored settings are out of range; using defaults");
            return Settings::default();
        }
        settings
    }

    /// Merge `patch` over the current settings, persist, and return the result.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Validation`] if the merged settings are out of
    /// range (nothing is written), or a storage/serialization error.
    pub fn update_settings(&self, patch: &SettingsPatch) -> Result<Settings, SettingsError> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;
        let updated = self.get_settings().merged(patch);
        updated.validate()?;
        self.persist(&updated)?;
        tracing::debug!(
            search_radius = updated.search_radius,
            location_sharing = updated.location_sharing,
            "settings updated"
        );
        Ok(updated)
    }

    /// Overwrite whatever is stored with the defaults.
    ///
    /// # Errors
    ///
    /// Returns a storage or serialization error if the defaults cannot be written.
    pub fn reset_settings(&self) -> Result<Settings, SettingsError> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;
        let defaults = Settings::default();
        self.persist(&defaults)?;
        tracing::info!("settings reset to defaults");
        Ok(defaults)
    }

    fn persist(&self, settings: &Settings) -> Result<(), SettingsError> {
        let json = serde_json::to_string(settings)?;
        self.storage.set(SETTINGS_STORAGE_KEY, &json)?;
        Ok(())
    }
}
