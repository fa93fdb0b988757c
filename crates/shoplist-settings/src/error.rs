use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid storage key \"{0}\"")]
    InvalidKey(String),

    #[error("storage lock poisoned")]
    Poisoned,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings: {0}")]
    Validation(#[from] shoplist_core::CoreError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}
