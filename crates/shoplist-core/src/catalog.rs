//! Store catalog files.
//!
//! A catalog is a YAML document with a top-level `stores:` list in the same
//! shape as [`Store`]. `distance` may be omitted; it is recomputed per query.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::geo::validate_coordinate;
use crate::stores::Store;
use crate::ConfigError;

#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub stores: Vec<Store>,
}

/// Load and validate a store catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<CatalogFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_catalog(&content)
}

/// Parse and validate a store catalog from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the text does not parse or fails validation.
pub fn parse_catalog(content: &str) -> Result<CatalogFile, ConfigError> {
    let catalog: CatalogFile = serde_yaml::from_str(content)?;
    validate_stores(&catalog.stores)?;
    Ok(catalog)
}

/// Check catalog invariants: unique non-empty ids, valid coordinates, and
/// non-negative prices.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] describing the first violation.
pub fn validate_stores(stores: &[Store]) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for store in stores {
        if store.id.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "store '{}' has an empty id",
                store.name
            )));
        }

        if !seen_ids.insert(store.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate store id: '{}'",
                store.id
            )));
        }

        validate_coordinate(store.latitude, store.longitude).map_err(|e| {
            ConfigError::Validation(format!("store '{}' has {e}", store.id))
        })?;

        for item in &store.available_items {
            if let Some(price) = item.price {
                if !price.is_finite() || price < 0.0 {
                    return Err(ConfigError::Validation(format!(
                        "store '{}' item '{}' has invalid price {price}",
                        store.id, item.name
                    )));
                }
            }
        }
    }

    Ok(())
}
