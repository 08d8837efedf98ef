pub mod id;
pub mod metadata;
pub mod model;
pub mod validate;

pub use id::SessionId;
pub use metadata::{count_words, ArticleMetadata};
pub use model::{ContentPage, ContentRecord, GeneratedArticle};
pub use validate::{GenerationRequest, Pagination, ValidationError};
