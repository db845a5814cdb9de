//! SQLite-backed catalog
//!
//! Every call opens its own short-lived connection and closes it before
//! returning. The catalog is small and rarely queried (once per page view),
//! so no pool is kept. A missing database file is an error, never created.

use std::path::PathBuf;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{ConnectOptions, Connection, Row};

use super::{CatalogAccessor, CatalogError, ImageRecord};

const COUNT_QUERY: &str = "SELECT COUNT(*) FROM images";
const INDICES_QUERY: &str = "SELECT idx FROM images ORDER BY idx";
const RECORD_QUERY: &str = "SELECT name, http, idx, orientation, ext FROM images WHERE idx = ?";

pub struct SqliteCatalog {
    db_path: PathBuf,
    /// URL prefix under which image files are served, e.g. "/static"
    static_prefix: String,
}

impl SqliteCatalog {
    pub fn new(db_path: impl Into<PathBuf>, static_prefix: impl Into<String>) -> Self {
        let static_prefix = static_prefix.into().trim_end_matches('/').to_string();
        Self {
            db_path: db_path.into(),
            static_prefix,
        }
    }

    async fn connect(&self) -> Result<SqliteConnection, CatalogError> {
        SqliteConnectOptions::new()
            .filename(&self.db_path)
            .create_if_missing(false)
            .connect()
            .await
            .map_err(|e| {
                tracing::error!("Error opening catalog {}: {}", self.db_path.display(), e);
                CatalogError::Open(e.into())
            })
    }

    fn record_from_row(&self, row: &SqliteRow) -> Result<ImageRecord, sqlx::Error> {
        let name: String = row.try_get("name")?;
        Ok(ImageRecord {
            path: format!("{}/{}", self.static_prefix, name),
            http: row.try_get("http")?,
            idx: row.try_get("idx")?,
            orientation: row.try_get("orientation")?,
            ext: row.try_get("ext")?,
            name,
        })
    }
}

async fn close(conn: SqliteConnection) {
    if let Err(e) = conn.close().await {
        tracing::debug!("closing catalog connection: {}", e);
    }
}

fn query_error(context: &str, e: sqlx::Error) -> CatalogError {
    tracing::error!("Error querying {}: {}", context, e);
    CatalogError::Query(e.into())
}

#[async_trait]
impl CatalogAccessor for SqliteCatalog {
    async fn count_records(&self) -> Result<i64, CatalogError> {
        let mut conn = self.connect().await?;
        let count = sqlx::query_scalar::<_, i64>(COUNT_QUERY)
            .fetch_one(&mut conn)
            .await;
        close(conn).await;
        count.map_err(|e| query_error("count", e))
    }

    async fn list_valid_indices(&self) -> Result<Vec<i64>, CatalogError> {
        let mut conn = self.connect().await?;
        let rows = sqlx::query(INDICES_QUERY).fetch_all(&mut conn).await;
        close(conn).await;
        let rows = rows.map_err(|e| query_error("indices", e))?;

        // a bad row is skipped rather than failing the whole listing
        let mut indices = Vec::with_capacity(rows.len());
        for row in &rows {
            match row.try_get::<i64, _>("idx") {
                Ok(idx) => indices.push(idx),
                Err(e) => tracing::warn!("Error scanning index: {}", e),
            }
        }

        tracing::info!("Available indices: {:?}", indices);
        Ok(indices)
    }

    async fn get_record(&self, idx: i64) -> Result<ImageRecord, CatalogError> {
        let mut conn = self.connect().await?;
        let row = sqlx::query(RECORD_QUERY)
            .bind(idx)
            .fetch_optional(&mut conn)
            .await;
        close(conn).await;

        match row.map_err(|e| query_error("record", e))? {
            Some(row) => self
                .record_from_row(&row)
                .map_err(|e| query_error("record", e)),
            None => Err(CatalogError::NotFound(idx)),
        }
    }
}
