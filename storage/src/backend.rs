//! Storage backend selected from configuration.

use async_trait::async_trait;
use config::StorageConfig;
use ec_core::{Node, NodeRepository, SideDataRecord, SideDataRepository};
use errors::StorageError;
use std::path::Path;
use tracing::info;

use crate::memory::InMemoryCategoryStore;
use crate::postgres::{PostgresCategoryStore, PostgresError};
use crate::snapshot::{SnapshotError, load_snapshot};

/// One of the supported category stores behind a single error type.
pub enum CategoryStore {
    Memory(InMemoryCategoryStore),
    Postgres(PostgresCategoryStore)
}

impl CategoryStore {
    /// Opens the backend named by `config.backend`.
    ///
    /// `snapshot` loads `snapshot_path` into memory; `postgres` connects to
    /// `database_url` and creates the schema when missing.
    pub async fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        match config.backend.as_str() {
            "memory" => Ok(Self::Memory(InMemoryCategoryStore::new())),
            "snapshot" => {
                let path = config.snapshot_path.as_deref().ok_or_else(|| {
                    StorageError::ConnectionError {
                        backend: "snapshot".to_string(),
                        reason: "storage.snapshot_path is not set".to_string()
                    }
                })?;
                let snapshot = load_snapshot(Path::new(path))?;
                info!(
                    path,
                    nodes = snapshot.nodes.len(),
                    side_data = snapshot.side_data.len(),
                    "Opened snapshot category store"
                );
                Ok(Self::Memory(InMemoryCategoryStore::from_snapshot(snapshot)))
            }
            "postgres" => {
                let url = config.database_url.as_deref().ok_or_else(|| {
                    StorageError::ConnectionError {
                        backend: "postgres".to_string(),
                        reason: "storage.database_url is not set".to_string()
                    }
                })?;
                let store = PostgresCategoryStore::with_pool_size(url, config.pool_size)
                    .await
                    .map_err(|e| StorageError::ConnectionError {
                        backend: "postgres".to_string(),
                        reason: e.to_string()
                    })?;
                store.initialize_schema().await?;
                info!(pool_size = config.pool_size, "Opened postgres category store");
                Ok(Self::Postgres(store))
            }
            other => Err(StorageError::UnsupportedBackend {
                backend: other.to_string()
            })
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Postgres(_) => "postgres"
        }
    }

    /// Looks up a single node, typically the leaf being rendered.
    pub async fn get_node(&self, id: &str) -> Result<Option<Node>, StorageError> {
        match self {
            Self::Memory(store) => Ok(store.get_node(id).await),
            Self::Postgres(store) => Ok(store.get_node(id).await?)
        }
    }
}

impl From<PostgresError> for StorageError {
    fn from(error: PostgresError) -> Self {
        match error {
            PostgresError::Database(e) => StorageError::QueryError {
                backend: "postgres".to_string(),
                reason: e.to_string()
            },
            PostgresError::Serialization(e) => StorageError::SerializationError {
                error_type: "json".to_string(),
                reason: e.to_string()
            }
        }
    }
}

impl From<SnapshotError> for StorageError {
    fn from(error: SnapshotError) -> Self {
        match error {
            SnapshotError::Io { .. } | SnapshotError::UnsupportedFormat(_) => {
                StorageError::ConnectionError {
                    backend: "snapshot".to_string(),
                    reason: error.to_string()
                }
            }
            SnapshotError::Json(_) | SnapshotError::Yaml(_) => StorageError::SerializationError {
                error_type: "snapshot".to_string(),
                reason: error.to_string()
            }
        }
    }
}

#[async_trait]
impl NodeRepository for CategoryStore {
    type Error = StorageError;

    async fn fetch_nodes(&self, ids: &[String]) -> Result<Vec<Node>, Self::Error> {
        match self {
            Self::Memory(store) => match store.fetch_nodes(ids).await {
                Ok(nodes) => Ok(nodes),
                Err(never) => match never {}
            },
            Self::Postgres(store) => Ok(store.fetch_nodes(ids).await?)
        }
    }
}

#[async_trait]
impl SideDataRepository for CategoryStore {
    type Error = StorageError;

    async fn fetch_side_data(&self, ids: &[String]) -> Result<Vec<SideDataRecord>, Self::Error> {
        match self {
            Self::Memory(store) => match store.fetch_side_data(ids).await {
                Ok(records) => Ok(records),
                Err(never) => match never {}
            },
            Self::Postgres(store) => Ok(store.fetch_side_data(ids).await?)
        }
    }
}
