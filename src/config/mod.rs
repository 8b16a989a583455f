//! Configuration loading and validation
//!
//! Configuration is a TOML file with kebab-case keys; every section and key
//! is optional and falls back to a usable default.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{Config, CrawlerConfig, FetchConfig, StorageBackend, StorageConfig};
pub use validation::validate;
