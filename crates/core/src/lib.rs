//! Content model and persistence for generated, cited articles.

pub mod content;
pub mod store;

pub use content::{
    ArticleMetadata, ContentPage, ContentRecord, GeneratedArticle, GenerationRequest, Pagination,
    SessionId, ValidationError,
};
pub use store::{ContentStore, StorageError};
