//! Remote catalog served as JSON over HTTP.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use shoplist_core::{validate_stores, Store};

use super::StoreCatalog;
use crate::error::LocatorError;
use crate::rate_limit::retry_with_backoff;

/// Fetches the candidate list from `url` on every query.
///
/// The body may be a bare JSON array of stores or an object with a `stores`
/// array. Transient failures (network errors, 429, 5xx) are retried with
/// exponential backoff; the final failure is returned, never an empty list.
pub struct HttpCatalog {
    client: Client,
    url: String,
    max_retries: u32,
    backoff_base_secs: u64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoresBody {
    Bare(Vec<Store>),
    Wrapped { stores: Vec<Store> },
}

impl HttpCatalog {
    /// # Errors
    ///
    /// Returns [`LocatorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, LocatorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            url: url.to_owned(),
            max_retries,
            backoff_base_secs,
        })
    }

    async fn fetch_once(&self) -> Result<Vec<Store>, LocatorError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LocatorError::HttpStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.bytes().await?;
        let stores = match serde_json::from_slice::<StoresBody>(&body) {
            Ok(StoresBody::Bare(stores) | StoresBody::Wrapped { stores }) => stores,
            Err(source) => {
                return Err(LocatorError::Deserialize {
                    context: self.url.clone(),
                    source,
                })
            }
        };
        validate_stores(&stores)?;
        Ok(stores)
    }
}

impl StoreCatalog for HttpCatalog {
    async fn list_candidate_stores(&self) -> Result<Vec<Store>, LocatorError> {
        let stores =
            retry_with_backoff(self.max_retries, self.backoff_base_secs, || self.fetch_once())
                .await?;
        tracing::debug!(url = %self.url, count = stores.len(), "fetched store catalog");
        Ok(stores)
    }
}
