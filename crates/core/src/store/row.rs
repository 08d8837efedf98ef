use blazeink_cite::Citation;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::content::{ContentRecord, GeneratedArticle};

/// Column list shared by every read query, in [`ContentRow`] field order.
pub(crate) const COLUMNS: &str =
    "id, session_id, topic, content, citations, generated_at, metadata, created_at";

/// Raw `content` row as stored: JSON and timestamps still encoded as text.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ContentRow {
    pub id: String,
    pub session_id: String,
    pub topic: String,
    pub content: String,
    pub citations: String,
    pub generated_at: String,
    pub metadata: String,
    pub created_at: String,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum RowDecodeError {
    #[error("citations: {0}")]
    Citations(serde_json::Error),
    #[error("metadata: {0}")]
    Metadata(serde_json::Error),
    #[error("unparsable {field} timestamp {value:?}")]
    Timestamp { field: &'static str, value: String },
}

impl ContentRow {
    pub fn decode(self) -> Result<ContentRecord, RowDecodeError> {
        let citations: Vec<Citation> =
            serde_json::from_str(&self.citations).map_err(RowDecodeError::Citations)?;
        let metadata: Map<String, Value> =
            serde_json::from_str(&self.metadata).map_err(RowDecodeError::Metadata)?;
        let generated_at = parse_timestamp(&self.generated_at).ok_or_else(|| {
            RowDecodeError::Timestamp {
                field: "generated_at",
                value: self.generated_at.clone(),
            }
        })?;
        let created_at =
            parse_timestamp(&self.created_at).ok_or_else(|| RowDecodeError::Timestamp {
                field: "created_at",
                value: self.created_at.clone(),
            })?;

        Ok(ContentRecord {
            session_id: self.session_id,
            article: GeneratedArticle {
                id: self.id,
                topic: self.topic,
                content: self.content,
                citations,
                generated_at,
                metadata,
            },
            created_at,
        })
    }
}

/// Decode rows, dropping (and logging) any that fail to decode.
pub(crate) fn decode_rows(rows: Vec<ContentRow>) -> Vec<ContentRecord> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.id.clone();
            match row.decode() {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(content_id = %id, "skipping row due to decode error: {e}");
                    None
                }
            }
        })
        .collect()
}

/// Parse RFC 3339, or the naive forms SQLite and older writers produce
/// (`2026-01-11 12:34:56.789`, `2026-01-11T12:34:56.123456`), read as UTC.
pub(crate) fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}
