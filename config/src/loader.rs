//! # Environment Variable Loader
//!
//! Loads configuration from environment variables following 12-factor app
//! principles.
//!
//! # Naming Convention
//! - `EC_RESOLVER_*`: Resolver settings
//! - `EC_LOADER_*`: Chain loader settings
//! - `EC_STORAGE_*`, `EC_DATABASE_URL`: Storage settings
//! - `EC_LOG_LEVEL`: Observability settings

use crate::config::{
    Config, ConfigOverrides, DEFAULT_MAX_DEPTH, DEFAULT_PATH_DELIMITER, LoaderConfig,
    ObservabilityConfig, ResolverConfig, StorageConfig,
};
use std::env;

/// Load configuration from environment variables.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Environment variables override default values but can be overridden by
/// CLI arguments.
///
/// ## Usage
/// ```rust,no_run
/// use config::load_from_env;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = load_from_env()?;
///     println!("Storage backend: {}", config.storage.backend);
///     Ok(())
/// }
/// ```
///
/// ## Environment Variables
/// - `EC_RESOLVER_MAX_DEPTH`: Inheritance hop bound (default: 10)
/// - `EC_LOADER_MAX_DEPTH`: Ancestors fetched above the leaf (default: 10)
/// - `EC_LOADER_PATH_DELIMITER`: Ancestor-path separator (default: "|")
/// - `EC_STORAGE_BACKEND`: memory/snapshot/postgres (default: "memory")
/// - `EC_STORAGE_SNAPSHOT_PATH`: Tree snapshot file (optional)
/// - `EC_DATABASE_URL`: Postgres connection URL (optional)
/// - `EC_STORAGE_POOL_SIZE`: Postgres pool size (default: 5)
/// - `EC_LOG_LEVEL`: trace/debug/info/warn/error (default: "info")
pub fn load_from_env() -> Result<Config, Box<dyn std::error::Error>> {
    let config = Config {
        resolver: load_resolver_from_env()?,
        loader: load_loader_from_env()?,
        storage: load_storage_from_env()?,
        observability: load_observability_from_env()?
    };

    Ok(config)
}

/// Collect only the `EC_*` variables that are actually set.
///
/// Unlike [`load_from_env`], nothing is filled in from defaults, so the
/// result can be layered with [`crate::merge_configs`] without losing a
/// variable whose value happens to equal the default. Unparsable numbers
/// are treated as unset.
pub fn load_overrides_from_env() -> ConfigOverrides {
    ConfigOverrides {
        resolver_max_depth: parse_env("EC_RESOLVER_MAX_DEPTH").ok(),
        loader_max_depth: parse_env("EC_LOADER_MAX_DEPTH").ok(),
        path_delimiter: env::var("EC_LOADER_PATH_DELIMITER").ok(),
        backend: env::var("EC_STORAGE_BACKEND").ok(),
        snapshot_path: env::var("EC_STORAGE_SNAPSHOT_PATH").ok(),
        database_url: env::var("EC_DATABASE_URL").ok(),
        pool_size: parse_env("EC_STORAGE_POOL_SIZE").ok(),
        logging_level: env::var("EC_LOG_LEVEL").ok()
    }
}

fn load_resolver_from_env() -> Result<ResolverConfig, Box<dyn std::error::Error>> {
    Ok(ResolverConfig {
        max_depth: parse_env("EC_RESOLVER_MAX_DEPTH").unwrap_or(DEFAULT_MAX_DEPTH)
    })
}

fn load_loader_from_env() -> Result<LoaderConfig, Box<dyn std::error::Error>> {
    Ok(LoaderConfig {
        max_depth: parse_env("EC_LOADER_MAX_DEPTH").unwrap_or(DEFAULT_MAX_DEPTH),
        path_delimiter: env::var("EC_LOADER_PATH_DELIMITER")
            .unwrap_or_else(|_| DEFAULT_PATH_DELIMITER.to_string())
    })
}

fn load_storage_from_env() -> Result<StorageConfig, Box<dyn std::error::Error>> {
    Ok(StorageConfig {
        backend: env::var("EC_STORAGE_BACKEND").unwrap_or_else(|_| "memory".to_string()),
        snapshot_path: env::var("EC_STORAGE_SNAPSHOT_PATH").ok(),
        database_url: env::var("EC_DATABASE_URL").ok(),
        pool_size: parse_env("EC_STORAGE_POOL_SIZE").unwrap_or(5)
    })
}

fn load_observability_from_env() -> Result<ObservabilityConfig, Box<dyn std::error::Error>> {
    Ok(ObservabilityConfig {
        logging_level: env::var("EC_LOG_LEVEL").unwrap_or_else(|_| "info".to_string())
    })
}

fn parse_env<T>(key: &str) -> Result<T, Box<dyn std::error::Error>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(s) => s
            .parse::<T>()
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error>),
        Err(e) => Err(Box::new(e) as Box<dyn std::error::Error>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 8] = [
        "EC_RESOLVER_MAX_DEPTH",
        "EC_LOADER_MAX_DEPTH",
        "EC_LOADER_PATH_DELIMITER",
        "EC_STORAGE_BACKEND",
        "EC_STORAGE_SNAPSHOT_PATH",
        "EC_DATABASE_URL",
        "EC_STORAGE_POOL_SIZE",
        "EC_LOG_LEVEL"
    ];

    fn clear_vars() {
        for var in VARS {
            unsafe {
                env::remove_var(var);
            }
        }
    }

    #[test]
    #[serial]
    fn test_load_from_env_defaults() {
        clear_vars();
        let config = load_from_env().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_load_from_env_overrides() {
        clear_vars();
        unsafe {
            env::set_var("EC_RESOLVER_MAX_DEPTH", "4");
            env::set_var("EC_LOADER_PATH_DELIMITER", "/");
            env::set_var("EC_STORAGE_BACKEND", "snapshot");
            env::set_var("EC_STORAGE_SNAPSHOT_PATH", "/tmp/tree.json");
            env::set_var("EC_LOG_LEVEL", "warn");
        }

        let config = load_from_env().unwrap();
        clear_vars();

        assert_eq!(config.resolver.max_depth, 4);
        assert_eq!(config.loader.max_depth, 10);
        assert_eq!(config.loader.path_delimiter, "/");
        assert_eq!(config.storage.backend, "snapshot");
        assert_eq!(config.storage.snapshot_path.as_deref(), Some("/tmp/tree.json"));
        assert_eq!(config.observability.logging_level, "warn");
    }

    #[test]
    #[serial]
    fn test_unparsable_number_falls_back_to_default() {
        clear_vars();
        unsafe {
            env::set_var("EC_LOADER_MAX_DEPTH", "deep");
        }

        let config = load_from_env().unwrap();
        clear_vars();

        assert_eq!(config.loader.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    #[serial]
    fn test_overrides_keep_values_equal_to_default() {
        clear_vars();
        unsafe {
            env::set_var("EC_RESOLVER_MAX_DEPTH", "10");
            env::set_var("EC_STORAGE_BACKEND", "memory");
            env::set_var("EC_STORAGE_POOL_SIZE", "many");
        }

        let overrides = load_overrides_from_env();
        clear_vars();

        assert_eq!(overrides.resolver_max_depth, Some(10));
        assert_eq!(overrides.backend.as_deref(), Some("memory"));
        assert_eq!(overrides.pool_size, None);
        assert_eq!(overrides.loader_max_depth, None);
    }

    #[test]
    fn test_parse_env_missing() {
        let result: Result<u32, _> = parse_env("EC_NONEXISTENT_VAR");
        assert!(result.is_err());
    }
}
