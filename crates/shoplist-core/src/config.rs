use crate::app_config::{AppConfig, CatalogSource, Environment};
use crate::geo::validate_coordinate;
use crate::{ConfigError, CoreError};

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function,
/// so parsing can be tested against a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("SHOPLIST_ENV", "development"));
    let log_level = or_default("SHOPLIST_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("SHOPLIST_DATA_DIR", "./.shoplist"));

    let catalog = match or_default("SHOPLIST_CATALOG", "mock").as_str() {
        "mock" => CatalogSource::Mock,
        "file" => CatalogSource::File(PathBuf::from(or_default(
            "SHOPLIST_CATALOG_PATH",
            "./config/stores.yaml",
        ))),
        "http" => CatalogSource::Http(
            lookup("SHOPLIST_CATALOG_URL")
                .map_err(|_| ConfigError::MissingEnvVar("SHOPLIST_CATALOG_URL".to_string()))?,
        ),
        other => {
            return Err(invalid(
                "SHOPLIST_CATALOG",
                format!("'{other}' is not one of mock, file, http"),
            ))
        }
    };

    let catalog_latency_ms = parse_u64("SHOPLIST_CATALOG_LATENCY_MS", "0")?;
    let request_timeout_secs = parse_u64("SHOPLIST_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SHOPLIST_USER_AGENT", "shoplist/0.1 (nearby-stores)");
    let max_retries = parse_u32("SHOPLIST_MAX_RETRIES", "3")?;
    let retry_backoff_base_secs = parse_u64("SHOPLIST_RETRY_BACKOFF_BASE_SECS", "1")?;
    let location_timeout_ms = parse_u64("SHOPLIST_LOCATION_TIMEOUT_MS", "5000")?;

    let default_latitude = parse_f64("SHOPLIST_DEFAULT_LATITUDE", "40.7128")?;
    let default_longitude = parse_f64("SHOPLIST_DEFAULT_LONGITUDE", "-74.006")?;
    validate_coordinate(default_latitude, default_longitude).map_err(|e| {
        let var = match &e {
            CoreError::InvalidArgument { name: "longitude", .. } => "SHOPLIST_DEFAULT_LONGITUDE",
            _ => "SHOPLIST_DEFAULT_LATITUDE",
        };
        invalid(var, e.to_string())
    })?;

    Ok(AppConfig {
        env,
        log_level,
        data_dir,
        catalog,
        catalog_latency_ms,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_secs,
        location_timeout_ms,
        default_latitude,
        default_longitude,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
