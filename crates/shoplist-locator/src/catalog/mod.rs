//! Sources of candidate stores.

mod file;
mod http;
mod mock;

use std::future::Future;
use std::time::Duration;

use shoplist_core::{AppConfig, CatalogSource, Store};

use crate::error::LocatorError;

pub use file::FileCatalog;
pub use http::HttpCatalog;
pub use mock::MockCatalog;

/// Enumerates every store a nearby search may return.
pub trait StoreCatalog: Send + Sync {
    /// All candidate stores in catalog order.
    ///
    /// # Errors
    ///
    /// Returns a [`LocatorError`] if the catalog cannot be retrieved. An empty
    /// catalog is `Ok(vec![])`, never an error.
    fn list_candidate_stores(
        &self,
    ) -> impl Future<Output = Result<Vec<Store>, LocatorError>> + Send;

    /// Look up a single store by id.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`StoreCatalog::list_candidate_stores`].
    fn store_details(
        &self,
        store_id: &str,
    ) -> impl Future<Output = Result<Option<Store>, LocatorError>> + Send {
        async move {
            let stores = self.list_candidate_stores().await?;
            Ok(stores.into_iter().find(|s| s.id == store_id))
        }
    }
}

/// The catalog selected by [`AppConfig::catalog`].
pub enum ConfiguredCatalog {
    Mock(MockCatalog),
    File(FileCatalog),
    Http(HttpCatalog),
}

impl StoreCatalog for ConfiguredCatalog {
    async fn list_candidate_stores(&self) -> Result<Vec<Store>, LocatorError> {
        match self {
            ConfiguredCatalog::Mock(c) => c.list_candidate_stores().await,
            ConfiguredCatalog::File(c) => c.list_candidate_stores().await,
            ConfiguredCatalog::Http(c) => c.list_candidate_stores().await,
        }
    }
}

/// Build the catalog described by `config`.
///
/// # Errors
///
/// Returns [`LocatorError::Catalog`] if a file catalog cannot be loaded, or
/// [`LocatorError::Http`] if the HTTP client cannot be constructed.
pub fn build_catalog(config: &AppConfig) -> Result<ConfiguredCatalog, LocatorError> {
    let catalog = match &config.catalog {
        CatalogSource::Mock => ConfiguredCatalog::Mock(
            MockCatalog::new().with_latency(Duration::from_millis(config.catalog_latency_ms)),
        ),
        CatalogSource::File(path) => ConfiguredCatalog::File(FileCatalog::load(path)?),
        CatalogSource::Http(url) => ConfiguredCatalog::Http(HttpCatalog::new(
            url,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_secs,
        )?),
    };
    tracing::debug!(source = %config.catalog, "store catalog ready");
    Ok(catalog)
}
