use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocatorError {
    /// Network-level failure talking to a remote catalog.
    #[error("store catalog fetch failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store catalog fetch failed: unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("store catalog fetch failed: could not decode {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The catalog loaded but its contents are unusable.
    #[error(transparent)]
    Catalog(#[from] shoplist_core::ConfigError),

    #[error(transparent)]
    InvalidArgument(#[from] shoplist_core::CoreError),
}

impl LocatorError {
    /// True when the store catalog could not be retrieved at all.
    ///
    /// Callers must not treat this as "no stores nearby".
    #[must_use]
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            LocatorError::Http(_) | LocatorError::HttpStatus { .. } | LocatorError::Deserialize { .. }
        )
    }
}
