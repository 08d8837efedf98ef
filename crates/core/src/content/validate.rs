/// Validation of client input: generation requests and pagination windows.
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_TOPIC_CHARS: usize = 3;
pub const MAX_TOPIC_CHARS: usize = 200;
pub const MIN_WORD_COUNT: u32 = 20;
pub const MAX_WORD_COUNT: u32 = 2000;
pub const DEFAULT_WORD_COUNT: u32 = 800;
pub const DEFAULT_CONTENT_TYPE: &str = "blog_post";

pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const MAX_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("topic must be between 3 and 200 characters, got {0}")]
    TopicLength(usize),
    #[error("content_type cannot be empty")]
    EmptyContentType,
    #[error("word_count must be between 20 and 2000, got {0}")]
    WordCount(u32),
    #[error("limit must be between 1 and 100, got {0}")]
    Limit(u32),
}

/// A request to generate one article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub topic: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
    #[serde(default = "default_word_count")]
    pub word_count: u32,
}

fn default_content_type() -> String {
    DEFAULT_CONTENT_TYPE.to_string()
}

fn default_word_count() -> u32 {
    DEFAULT_WORD_COUNT
}

impl GenerationRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            content_type: default_content_type(),
            word_count: DEFAULT_WORD_COUNT,
        }
    }

    /// Check bounds and return the request with surrounding whitespace removed.
    pub fn validate(self) -> Result<Self, ValidationError> {
        let topic = self.topic.trim().to_string();
        let topic_chars = topic.chars().count();
        if !(MIN_TOPIC_CHARS..=MAX_TOPIC_CHARS).contains(&topic_chars) {
            return Err(ValidationError::TopicLength(topic_chars));
        }

        let content_type = self.content_type.trim().to_string();
        if content_type.is_empty() {
            return Err(ValidationError::EmptyContentType);
        }

        if !(MIN_WORD_COUNT..=MAX_WORD_COUNT).contains(&self.word_count) {
            return Err(ValidationError::WordCount(self.word_count));
        }

        Ok(Self {
            topic,
            content_type,
            word_count: self.word_count,
        })
    }
}

/// An `offset`/`limit` window over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    offset: u32,
    limit: u32,
}

impl Pagination {
    pub fn new(offset: u32, limit: u32) -> Result<Self, ValidationError> {
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(ValidationError::Limit(limit));
        }
        Ok(Self { offset, limit })
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}
