use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Where candidate stores come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Built-in demo stores.
    Mock,
    /// A YAML catalog on disk.
    File(PathBuf),
    /// A remote endpoint returning a JSON array of stores.
    Http(String),
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::Mock => write!(f, "mock"),
            CatalogSource::File(path) => write!(f, "file:{}", path.display()),
            CatalogSource::Http(url) => write!(f, "http:{url}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Directory backing the key-value settings storage.
    pub data_dir: PathBuf,
    pub catalog: CatalogSource,
    /// Artificial delay applied by the mock catalog.
    pub catalog_latency_ms: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    pub location_timeout_ms: u64,
    /// Position used when no geolocation provider is available.
    pub default_latitude: f64,
    pub default_longitude: f64,
}
