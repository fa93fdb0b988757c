use std::path::Path;

use shoplist_core::{load_catalog, Store};

use super::StoreCatalog;
use crate::error::LocatorError;

/// A catalog read once from a YAML file at construction.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    stores: Vec<Store>,
}

impl FileCatalog {
    /// # Errors
    ///
    /// Returns [`LocatorError::Catalog`] if the file cannot be read, parsed,
    /// or validated.
    pub fn load(path: &Path) -> Result<Self, LocatorError> {
        let file = load_catalog(path)?;
        tracing::info!(path = %path.display(), count = file.stores.len(), "loaded store catalog");
        Ok(Self {
            stores: file.stores,
        })
    }
}

impl StoreCatalog for FileCatalog {
    async fn list_candidate_stores(&self) -> Result<Vec<Store>, LocatorError> {
        Ok(self.stores.clone())
    }
}
