//! Shared test fixtures for the empty-category workspace.
//!
//! Provides:
//! - A single, lazily started PostgreSQL testcontainer per test process
//! - Unique identifiers so tests sharing that container never collide
//! - Category tree builders for loader and resolver tests

mod fixtures;
mod tree;

pub use fixtures::*;
pub use tree::*;
