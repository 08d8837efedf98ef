use thiserror::Error;

/// Failures surfaced by [`ContentStore`](super::ContentStore).
///
/// Reads and writes are kept apart so callers can tell "no rows" from "the
/// query itself failed".
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage initialization failed: {0}")]
    Init(#[source] sqlx::Error),

    #[error("content {0} already exists")]
    Duplicate(String),

    #[error("failed to encode {field}: {source}")]
    Encode {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("write failed: {0}")]
    Write(#[source] sqlx::Error),

    #[error("read failed: {0}")]
    Read(#[source] sqlx::Error),
}

impl StorageError {
    pub(crate) fn write(err: sqlx::Error, id: &str) -> Self {
        let duplicate = matches!(
            &err,
            sqlx::Error::Database(db)
                if db.is_unique_violation() || db.message().contains("UNIQUE constraint failed")
        );
        if duplicate {
            StorageError::Duplicate(id.to_string())
        } else {
            StorageError::Write(err)
        }
    }
}
