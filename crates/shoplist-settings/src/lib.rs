//! Persistent user preferences.
//!
//! [`SettingsRepository`] keeps one JSON document under a fixed key in a
//! [`KeyValueStorage`] backend. Reads never fail: a missing or unreadable
//! value yields [`Settings::default`](shoplist_core::Settings).

pub mod error;
pub mod repository;
pub mod storage;

pub use error::{SettingsError, StorageError};
pub use repository::{SettingsRepository, SETTINGS_STORAGE_KEY};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
