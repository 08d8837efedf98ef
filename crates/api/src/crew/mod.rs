//! Article generation: a researcher agent and a writer agent run in sequence.
//!
//! Route handlers only see [`ArticleGenerator`]; [`Crew`] is the production
//! implementation backed by a chat-completions API and Serper web search.

mod agents;
mod llm;
mod search;

use async_trait::async_trait;
use blazeink_core::GenerationRequest;

pub use agents::Crew;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} API error ({status}): {body}")]
    Api {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("{0} returned no content")]
    Empty(&'static str),
}

/// Produces the raw text of a cited article for a request.
///
/// The text is expected (not guaranteed) to end with a "References" section of
/// `[n] Title | Author | Date | URL` lines.
#[async_trait]
pub trait ArticleGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}
