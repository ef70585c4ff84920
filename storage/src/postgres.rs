use async_trait::async_trait;
use ec_core::{Node, NodeRepository, RawFields, SideDataRecord, SideDataRepository};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{Pool, Postgres, Row};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostgresError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error)
}

/// Categories and side-data records stored in PostgreSQL.
///
/// Custom fields live in a JSONB column and are returned untouched; parent
/// links and side data are never persisted.
pub struct PostgresCategoryStore {
    pool: Pool<Postgres>
}

impl PostgresCategoryStore {
    pub async fn new(connection_url: &str) -> Result<Self, PostgresError> {
        let pool = Pool::connect(connection_url).await?;
        Ok(Self { pool })
    }

    pub async fn with_pool_size(connection_url: &str, pool_size: u32) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(pool_size)
            .connect(connection_url)
            .await?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn initialize_schema(&self) -> Result<(), PostgresError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS categories (
                id TEXT PRIMARY KEY,
                parent_id TEXT,
                path TEXT,
                custom_fields JSONB NOT NULL DEFAULT '{}'
            )"
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_categories_parent_id ON categories(parent_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS side_data (
                id TEXT PRIMARY KEY,
                url TEXT NOT NULL
            )"
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn upsert_node(&self, node: &Node) -> Result<(), PostgresError> {
        sqlx::query(
            "INSERT INTO categories (id, parent_id, path, custom_fields)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (id) DO UPDATE SET
                parent_id = EXCLUDED.parent_id,
                path = EXCLUDED.path,
                custom_fields = EXCLUDED.custom_fields"
        )
        .bind(&node.id)
        .bind(&node.parent_id)
        .bind(&node.path)
        .bind(serde_json::to_value(&node.fields)?)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn upsert_side_data(&self, record: &SideDataRecord) -> Result<(), PostgresError> {
        sqlx::query(
            "INSERT INTO side_data (id, url) VALUES ($1, $2)
             ON CONFLICT (id) DO UPDATE SET url = EXCLUDED.url"
        )
        .bind(&record.id)
        .bind(&record.url)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_node(&self, id: &str) -> Result<Option<Node>, PostgresError> {
        let row = sqlx::query("SELECT id, parent_id, path, custom_fields FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(node_from_row))
    }
}

fn node_from_row(row: &PgRow) -> Node {
    Node {
        id: row.get("id"),
        parent_id: row.get("parent_id"),
        path: row.get("path"),
        fields: RawFields::from_value(row.get("custom_fields")),
        ..Node::default()
    }
}

#[async_trait]
impl NodeRepository for PostgresCategoryStore {
    type Error = PostgresError;

    async fn fetch_nodes(&self, ids: &[String]) -> Result<Vec<Node>, Self::Error> {
        let rows = sqlx::query(
            "SELECT id, parent_id, path, custom_fields FROM categories WHERE id = ANY($1)"
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(node_from_row).collect())
    }
}

#[async_trait]
impl SideDataRepository for PostgresCategoryStore {
    type Error = PostgresError;

    async fn fetch_side_data(&self, ids: &[String]) -> Result<Vec<SideDataRecord>, Self::Error> {
        let rows = sqlx::query("SELECT id, url FROM side_data WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(|row| SideDataRecord {
                id: row.get("id"),
                url: row.get("url")
            })
            .collect())
    }
}
