//! # Configuration Validation
//!
//! Provides validation for all configuration structures using the `validator` crate.

use crate::config::Config;
use validator::Validate;

/// Validate configuration structure.
///
/// ## Validation Rules
/// ### Resolver
/// - `max_depth`: 1-64
///
/// ### Loader
/// - `max_depth`: 1-64
/// - `path_delimiter`: exactly one character
///
/// ### Storage
/// - `backend`: must be "memory", "snapshot", or "postgres"
/// - `pool_size`: 1-100
///
/// ### Observability
/// - `logging_level`: must be "trace", "debug", "info", "warn", or "error"
pub fn validate(config: &Config) -> Result<(), validator::ValidationErrors> {
    config.validate()
}
