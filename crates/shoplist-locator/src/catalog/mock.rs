use std::time::Duration;

use shoplist_core::{mock_stores, Store};

use super::StoreCatalog;
use crate::error::LocatorError;

/// In-memory catalog. Defaults to the built-in demo stores.
#[derive(Debug, Clone)]
pub struct MockCatalog {
    stores: Vec<Store>,
    latency: Duration,
}

impl MockCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::with_stores(mock_stores())
    }

    #[must_use]
    pub fn with_stores(stores: Vec<Store>) -> Self {
        Self {
            stores,
            latency: Duration::ZERO,
        }
    }

    /// Simulate a network round trip before answering.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreCatalog for MockCatalog {
    async fn list_candidate_stores(&self) -> Result<Vec<Store>, LocatorError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self.stores.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_demo_stores() {
        let stores = MockCatalog::new().list_candidate_stores().await.unwrap();
        let ids: Vec<_> = stores.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn store_details_finds_by_id() {
        let catalog = MockCatalog::new();
        let store = catalog.store_details("2").await.unwrap().unwrap();
        assert_eq!(store.name, "Supermarket");
        assert!(catalog.store_details("99").await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn latency_is_applied() {
        let catalog = MockCatalog::new().with_latency(Duration::from_millis(500));
        let started = tokio::time::Instant::now();
        catalog.list_candidate_stores().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(500));
    }
}
