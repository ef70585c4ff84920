//! # Configuration Precedence
//!
//! Merges configuration from multiple sources with precedence rules.
//!
//! # Precedence Order
//! 1. CLI arguments (highest priority)
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values (lowest priority)
//!
//! The file layer is a complete [`Config`] and only overrides a field when it
//! carries a non-default value. Environment and CLI layers are
//! [`ConfigOverrides`]: every value they set wins, including one equal to the
//! default.

use crate::config::{
    Config, ConfigOverrides, LoaderConfig, ObservabilityConfig, ResolverConfig, StorageConfig,
};

/// Merge multiple configuration sources with precedence.
///
/// ## Usage
/// ```rust,no_run
/// use config::{Config, load_from_file, load_overrides_from_env, merge_configs};
/// use std::path::Path;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let from_file = load_from_file(Path::new("ecm.toml"))?;
///     let from_env = load_overrides_from_env();
///
///     let _config = merge_configs(Config::default(), from_file, from_env, None);
///     Ok(())
/// }
/// ```
pub fn merge_configs(
    defaults: Config,
    file_config: Config,
    env_overrides: ConfigOverrides,
    cli_overrides: Option<ConfigOverrides>
) -> Config {
    let mut config = defaults;

    config = merge_with_logging(config, file_config, "file");
    config = apply_overrides(config, &env_overrides, "env");

    if let Some(cli) = cli_overrides {
        config = apply_overrides(config, &cli, "cli");
    }

    config
}

fn merge_with_logging(mut base: Config, override_config: Config, source_name: &str) -> Config {
    let mut changes = Vec::new();

    merge_resolver(&mut base.resolver, &override_config.resolver, &mut changes);
    merge_loader(&mut base.loader, &override_config.loader, &mut changes);
    merge_storage(&mut base.storage, &override_config.storage, &mut changes);
    merge_observability(
        &mut base.observability,
        &override_config.observability,
        &mut changes
    );

    if !changes.is_empty() {
        tracing::debug!("Configuration from {}: {:?}", source_name, changes);
    }

    base
}

fn apply_overrides(mut base: Config, overrides: &ConfigOverrides, source_name: &str) -> Config {
    let mut changes = Vec::new();

    if let Some(depth) = overrides.resolver_max_depth {
        changes.push(format!("resolver.max_depth = {depth}"));
        base.resolver.max_depth = depth;
    }
    if let Some(depth) = overrides.loader_max_depth {
        changes.push(format!("loader.max_depth = {depth}"));
        base.loader.max_depth = depth;
    }
    if let Some(delimiter) = &overrides.path_delimiter {
        changes.push(format!("loader.path_delimiter = {delimiter}"));
        base.loader.path_delimiter.clone_from(delimiter);
    }
    if let Some(backend) = &overrides.backend {
        changes.push(format!("storage.backend = {backend}"));
        base.storage.backend.clone_from(backend);
    }
    if let Some(path) = &overrides.snapshot_path {
        changes.push(format!("storage.snapshot_path = {path}"));
        base.storage.snapshot_path = Some(path.clone());
    }
    if let Some(url) = &overrides.database_url {
        changes.push("storage.database_url = ***".to_string());
        base.storage.database_url = Some(url.clone());
    }
    if let Some(size) = overrides.pool_size {
        changes.push(format!("storage.pool_size = {size}"));
        base.storage.pool_size = size;
    }
    if let Some(level) = &overrides.logging_level {
        changes.push(format!("observability.logging_level = {level}"));
        base.observability.logging_level.clone_from(level);
    }

    if !changes.is_empty() {
        tracing::debug!("Configuration from {}: {:?}", source_name, changes);
    }

    base
}

fn merge_resolver(
    base: &mut ResolverConfig,
    override_config: &ResolverConfig,
    changes: &mut Vec<String>
) {
    let defaults = ResolverConfig::default();
    if override_config.max_depth != defaults.max_depth
        && override_config.max_depth != base.max_depth
    {
        changes.push(format!("resolver.max_depth = {}", override_config.max_depth));
        base.max_depth = override_config.max_depth;
    }
}

fn merge_loader(base: &mut LoaderConfig, override_config: &LoaderConfig, changes: &mut Vec<String>) {
    let defaults = LoaderConfig::default();
    if override_config.max_depth != defaults.max_depth
        && override_config.max_depth != base.max_depth
    {
        changes.push(format!("loader.max_depth = {}", override_config.max_depth));
        base.max_depth = override_config.max_depth;
    }
    if override_config.path_delimiter != defaults.path_delimiter
        && override_config.path_delimiter != base.path_delimiter
    {
        changes.push(format!(
            "loader.path_delimiter = {}",
            override_config.path_delimiter
        ));
        base.path_delimiter.clone_from(&override_config.path_delimiter);
    }
}

fn merge_storage(
    base: &mut StorageConfig,
    override_config: &StorageConfig,
    changes: &mut Vec<String>
) {
    let defaults = StorageConfig::default();
    if override_config.backend != defaults.backend && override_config.backend != base.backend {
        changes.push(format!("storage.backend = {}", override_config.backend));
        base.backend.clone_from(&override_config.backend);
    }
    if override_config.snapshot_path.is_some() && override_config.snapshot_path != base.snapshot_path
    {
        changes.push(format!(
            "storage.snapshot_path = {:?}",
            override_config.snapshot_path
        ));
        base.snapshot_path.clone_from(&override_config.snapshot_path);
    }
    if override_config.database_url.is_some() && override_config.database_url != base.database_url {
        changes.push("storage.database_url = ***".to_string());
        base.database_url.clone_from(&override_config.database_url);
    }
    if override_config.pool_size != defaults.pool_size
        && override_config.pool_size != base.pool_size
    {
        changes.push(format!("storage.pool_size = {}", override_config.pool_size));
        base.pool_size = override_config.pool_size;
    }
}

fn merge_observability(
    base: &mut ObservabilityConfig,
    override_config: &ObservabilityConfig,
    changes: &mut Vec<String>
) {
    let defaults = ObservabilityConfig::default();
    if override_config.logging_level != defaults.logging_level
        && override_config.logging_level != base.logging_level
    {
        changes.push(format!(
            "observability.logging_level = {}",
            override_config.logging_level
        ));
        base.logging_level.clone_from(&override_config.logging_level);
    }
}
