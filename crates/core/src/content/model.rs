use blazeink_cite::{extract, Citation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::metadata::{count_words, ArticleMetadata};
use super::validate::{GenerationRequest, Pagination};

/// One generated article, as handed to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedArticle {
    pub id: String,
    pub topic: String,
    /// Full article text with in-line `[n]` markers.
    pub content: String,
    pub citations: Vec<Citation>,
    pub generated_at: DateTime<Utc>,
    /// Open key/value facts about the generation; not schema-checked.
    pub metadata: Map<String, Value>,
}

impl GeneratedArticle {
    /// Build an article from raw generator output: extract citations, compute
    /// metadata and assign a fresh id.
    pub fn assemble(request: &GenerationRequest, text: String) -> Self {
        let extraction = extract(&text);
        if !extraction.skipped.is_empty() {
            tracing::warn!(
                topic = %request.topic,
                skipped = extraction.skipped.len(),
                "some reference lines could not be parsed"
            );
        }

        let metadata = ArticleMetadata {
            content_type: request.content_type.clone(),
            word_count: request.word_count,
            actual_words: count_words(&text),
            total_citations: extraction.citations.len(),
        };

        Self {
            id: Uuid::new_v4().to_string(),
            topic: request.topic.clone(),
            content: text,
            citations: extraction.citations,
            generated_at: Utc::now(),
            metadata: metadata.into_map(),
        }
    }
}

/// A persisted article together with its storage-side attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Never sent to clients: it doubles as the session cookie value.
    #[serde(skip_serializing, default)]
    pub session_id: String,
    #[serde(flatten)]
    pub article: GeneratedArticle,
    /// Assigned by the store at insert time.
    pub created_at: DateTime<Utc>,
}

/// One page of records plus the pre-pagination total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentPage {
    pub total: u64,
    pub offset: u32,
    pub limit: u32,
    pub records: Vec<ContentRecord>,
}

impl ContentPage {
    pub fn new(total: u64, pagination: Pagination, records: Vec<ContentRecord>) -> Self {
        Self {
            total,
            offset: pagination.offset(),
            limit: pagination.limit(),
            records,
        }
    }
}
