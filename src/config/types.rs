use serde::Deserialize;

/// Main configuration structure for spindrift
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    /// Seed URLs crawled when none is given on the command line
    #[serde(default)]
    pub seeds: Vec<String>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum link depth to follow from the seed
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Maximum number of in-flight fetches
    #[serde(rename = "max-concurrent-fetches", default = "default_max_concurrent")]
    pub max_concurrent_fetches: usize,

    /// Optional cap on the total number of pages visited per crawl
    #[serde(rename = "max-pages", default)]
    pub max_pages: Option<usize>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_concurrent_fetches: default_max_concurrent(),
            max_pages: None,
        }
    }
}

/// Fetch configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// User agent string presented to servers
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
        }
    }
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One file per resource under `cache-dir`
    Fs,
    /// Single SQLite database at `database-path`
    Sqlite,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,

    /// Cache directory for the filesystem backend
    #[serde(rename = "cache-dir", default = "default_cache_dir")]
    pub cache_dir: String,

    /// Database file for the SQLite backend
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            cache_dir: default_cache_dir(),
            database_path: default_database_path(),
        }
    }
}

fn default_max_depth() -> u32 {
    2
}

fn default_max_concurrent() -> usize {
    8
}

fn default_user_agent() -> String {
    format!("spindrift/{}", env!("CARGO_PKG_VERSION"))
}

fn default_backend() -> StorageBackend {
    StorageBackend::Fs
}

fn default_cache_dir() -> String {
    "./cache".to_string()
}

fn default_database_path() -> String {
    "./spindrift.db".to_string()
}
