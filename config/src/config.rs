//! # Configuration Structures
//!
//! This module defines all configuration structures for empty-category
//! message resolution.
//!
//! All configuration structures:
//! - Use `serde` for serialization/deserialization
//! - Use `validator` for input validation
//! - Fall back to documented defaults for every omitted field

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Default bound on inheritance hops, shared by the resolver and the loader.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Default delimiter of the ancestor-path descriptor (`|root|a|b|`).
pub const DEFAULT_PATH_DELIMITER: &str = "|";

/// Main configuration structure.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Aggregates the resolver, chain loader, storage and observability settings.
///
/// ## Usage
/// ```rust,no_run
/// use config::Config;
///
/// let config = Config::default();
/// println!("Max inheritance depth: {}", config.resolver.max_depth);
/// ```
///
/// ## Validation
/// All nested configurations must pass their own validation rules.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default, PartialEq)]
pub struct Config {
    /// Inheritance resolution settings
    #[serde(default)]
    #[validate(nested)]
    pub resolver: ResolverConfig,

    /// Ancestor and side-data prefetch settings
    #[serde(default)]
    #[validate(nested)]
    pub loader: LoaderConfig,

    /// Category and side-data storage backend
    #[serde(default)]
    #[validate(nested)]
    pub storage: StorageConfig,

    /// Logging and metrics
    #[serde(default)]
    #[validate(nested)]
    pub observability: ObservabilityConfig
}

/// Resolver configuration.
///
/// ## Fields
/// - `max_depth`: Inheritance hops before the circuit breaker returns the
///   default message (default: 10)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct ResolverConfig {
    #[serde(default = "default_max_depth")]
    #[validate(range(min = 1, max = 64))]
    pub max_depth: usize
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth()
        }
    }
}

/// Chain loader configuration.
///
/// ## Fields
/// - `max_depth`: Ancestors fetched and wired above the leaf (default: 10)
/// - `path_delimiter`: Separator of the ancestor-path descriptor (default: "|")
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct LoaderConfig {
    #[serde(default = "default_max_depth")]
    #[validate(range(min = 1, max = 64))]
    pub max_depth: usize,

    #[serde(default = "default_path_delimiter")]
    #[validate(length(equal = 1))]
    pub path_delimiter: String
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            path_delimiter: default_path_delimiter()
        }
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_path_delimiter() -> String {
    DEFAULT_PATH_DELIMITER.to_string()
}

/// Storage backend configuration.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Selects where categories and side-data records are fetched from.
///
/// ## Fields
/// - `backend`: "memory", "snapshot" or "postgres" (default: "memory")
/// - `snapshot_path`: Tree snapshot file for the snapshot backend
/// - `database_url`: Connection URL for the postgres backend
/// - `pool_size`: Postgres connection pool size (default: 5)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct StorageConfig {
    #[serde(default = "default_storage_backend")]
    #[validate(custom(function = "validate_storage_backend"))]
    pub backend: String,

    #[serde(default)]
    pub snapshot_path: Option<String>,

    #[serde(default)]
    pub database_url: Option<String>,

    #[serde(default = "default_storage_pool_size")]
    #[validate(range(min = 1, max = 100))]
    pub pool_size: u32
}

fn default_storage_backend() -> String {
    "memory".to_string()
}

fn default_storage_pool_size() -> u32 {
    5
}

fn validate_storage_backend(value: &str) -> Result<(), validator::ValidationError> {
    match value {
        "memory" | "snapshot" | "postgres" => Ok(()),
        _ => Err(validator::ValidationError::new("Invalid storage backend"))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            snapshot_path: None,
            database_url: None,
            pool_size: default_storage_pool_size()
        }
    }
}

/// Observability configuration.
///
/// ## Fields
/// - `logging_level`: Log level used when `RUST_LOG` is unset (default: "info")
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct ObservabilityConfig {
    #[serde(default = "default_observability_logging_level")]
    #[validate(custom(function = "validate_logging_level"))]
    pub logging_level: String
}

fn default_observability_logging_level() -> String {
    "info".to_string()
}

fn validate_logging_level(value: &str) -> Result<(), validator::ValidationError> {
    match value {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(validator::ValidationError::new("Invalid logging level"))
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            logging_level: default_observability_logging_level()
        }
    }
}

/// Settings a single source set explicitly.
///
/// Layered over a [`Config`] by [`crate::merge_configs`]: every `Some` value
/// wins, even when it equals the built-in default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub resolver_max_depth: Option<usize>,
    pub loader_max_depth: Option<usize>,
    pub path_delimiter: Option<String>,
    pub backend: Option<String>,
    pub snapshot_path: Option<String>,
    pub database_url: Option<String>,
    pub pool_size: Option<u32>,
    pub logging_level: Option<String>
}
