//! # Configuration System
//!
//! Centralized configuration for empty-category message resolution.
//!
//! This crate provides:
//! - Configuration structures for the resolver, loader, storage and
//!   observability
//! - Environment variable loading (12-factor app principles)
//! - Configuration file loading (TOML/YAML)
//! - Configuration precedence (CLI > env > file > defaults)
//! - Configuration validation

pub mod config;
pub mod file_loader;
pub mod loader;
pub mod precedence;
pub mod validation;

pub use config::{
    Config, ConfigOverrides, DEFAULT_MAX_DEPTH, DEFAULT_PATH_DELIMITER, LoaderConfig,
    ObservabilityConfig, ResolverConfig, StorageConfig,
};
pub use file_loader::{ConfigFileError, load_from_file, load_from_toml, load_from_yaml};
pub use loader::{load_from_env, load_overrides_from_env};
pub use precedence::merge_configs;
pub use validation::validate;
pub use validator::Validate;
