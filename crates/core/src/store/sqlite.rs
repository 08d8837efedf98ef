use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use super::error::StorageError;
use super::row::{decode_rows, ContentRow, COLUMNS};
use super::schema::SCHEMA;
use crate::content::{ContentPage, ContentRecord, GeneratedArticle, Pagination};

/// Durable store for generated articles.
///
/// Holds only a connection pool; every operation checks out a connection (or
/// a transaction) for its own duration. Cloning is cheap and shares the pool.
#[derive(Debug, Clone)]
pub struct ContentStore {
    pool: SqlitePool,
}

impl ContentStore {
    /// Open (creating if missing) the database at `url`, e.g. `sqlite://content.db`.
    ///
    /// Does not create the schema; call [`ContentStore::initialize`] next.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(StorageError::Init)?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(StorageError::Init)?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the content table and its indexes if they do not exist yet.
    ///
    /// Safe to run on every start.
    pub async fn initialize(&self) -> Result<(), StorageError> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Init)?;
        tracing::info!("content store initialized");
        Ok(())
    }

    /// Insert one article under `session_id`.
    ///
    /// Never overwrites: an existing id yields [`StorageError::Duplicate`].
    pub async fn save(
        &self,
        session_id: &str,
        article: &GeneratedArticle,
    ) -> Result<(), StorageError> {
        let citations = serde_json::to_string(&article.citations).map_err(|source| {
            StorageError::Encode {
                field: "citations",
                source,
            }
        })?;
        let metadata = serde_json::to_string(&article.metadata).map_err(|source| {
            StorageError::Encode {
                field: "metadata",
                source,
            }
        })?;

        sqlx::query(
            r#"INSERT INTO content (id, session_id, topic, content, citations, generated_at, metadata)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"#,
        )
        .bind(&article.id)
        .bind(session_id)
        .bind(&article.topic)
        .bind(&article.content)
        .bind(citations)
        .bind(article.generated_at.to_rfc3339())
        .bind(metadata)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::write(e, &article.id))?;

        tracing::info!(content_id = %article.id, session_id, "content saved");
        Ok(())
    }

    /// All records of one session, newest first. Empty when the session has none.
    pub async fn get_by_session(&self, session_id: &str) -> Result<Vec<ContentRecord>, StorageError> {
        let rows = sqlx::query_as::<_, ContentRow>(&format!(
            "SELECT {COLUMNS} FROM content WHERE session_id = ?1 ORDER BY julianday(created_at) DESC, rowid DESC"
        ))
        .bind(session_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Read)?;

        Ok(decode_rows(rows))
    }

    /// One page of records across all sessions, newest first, with the total
    /// row count taken from the same read transaction.
    pub async fn get_all(&self, pagination: Pagination) -> Result<ContentPage, StorageError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::Read)?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM content")
            .fetch_one(&mut *tx)
            .await
            .map_err(StorageError::Read)?;

        let rows = sqlx::query_as::<_, ContentRow>(&format!(
            "SELECT {COLUMNS} FROM content ORDER BY julianday(created_at) DESC, rowid DESC LIMIT ?1 OFFSET ?2"
        ))
        .bind(i64::from(pagination.limit()))
        .bind(i64::from(pagination.offset()))
        .fetch_all(&mut *tx)
        .await
        .map_err(StorageError::Read)?;

        tx.commit().await.map_err(StorageError::Read)?;

        Ok(ContentPage::new(
            total.max(0) as u64,
            pagination,
            decode_rows(rows),
        ))
    }

    /// Look up a single record by id. A row that fails to decode reads as absent.
    pub async fn get(&self, id: &str) -> Result<Option<ContentRecord>, StorageError> {
        let row = sqlx::query_as::<_, ContentRow>(&format!(
            "SELECT {COLUMNS} FROM content WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StorageError::Read)?;

        Ok(row.and_then(|row| decode_rows(vec![row]).pop()))
    }

    /// Remove a record. Returns whether a row was deleted.
    pub async fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM content WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Write)?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(content_id = %id, "content deleted");
        }
        Ok(deleted)
    }

    /// Round-trip a trivial query to prove the database is reachable.
    pub async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(StorageError::Read)?;
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to be returned.
    ///
    /// Every clone shares the pool, so later operations on any of them fail.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
