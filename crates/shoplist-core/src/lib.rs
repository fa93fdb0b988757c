pub mod app_config;
pub mod catalog;
pub mod config;
pub mod geo;
pub mod lists;
pub mod location;
pub mod settings;
pub mod stores;

pub use app_config::{AppConfig, CatalogSource, Environment};
pub use catalog::{load_catalog, parse_catalog, validate_stores, CatalogFile};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{compute_distance_meters, validate_coordinate, EARTH_RADIUS_METERS};
pub use lists::{ListItem, NewListItem, ShoppingList, ShoppingListBook};
pub use location::LocationData;
pub use settings::{
    LocationAccuracy, NotificationSettings, PositionOptions, Settings, SettingsPatch,
    MAX_SEARCH_RADIUS_METERS, MIN_SEARCH_RADIUS_METERS,
};
pub use stores::{
    filter_nearby, mock_stores, sort_by_distance, Store, StoreItem,
    DEFAULT_SEARCH_RADIUS_METERS,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("list not found: {0}")]
    ListNotFound(uuid::Uuid),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read store catalog {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse store catalog: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("store catalog validation failed: {0}")]
    Validation(String),
}
