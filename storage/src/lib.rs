//! # Storage Layer
//!
//! Category and side-data backends (in-memory, file snapshot, PostgreSQL)
//! implementing the batch-fetch repository traits used by the chain loader.

pub mod backend;
pub mod memory;
pub mod postgres;
pub mod snapshot;

pub use backend::CategoryStore;
pub use memory::InMemoryCategoryStore;
pub use postgres::{PostgresCategoryStore, PostgresError};
pub use snapshot::{SnapshotError, TreeSnapshot, load_snapshot};
