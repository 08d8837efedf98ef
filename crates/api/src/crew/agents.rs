use async_trait::async_trait;
use blazeink_core::GenerationRequest;

use super::llm::ChatClient;
use super::search::{format_results, SerperClient};
use super::{ArticleGenerator, GenerationError};
use crate::config::AppConfig;

/// Persona given to the chat model as its system prompt.
struct Agent {
    role: &'static str,
    goal: &'static str,
    backstory: &'static str,
}

impl Agent {
    fn system_prompt(&self) -> String {
        format!(
            "You are a {}.\nYour goal: {}.\n{}",
            self.role, self.goal, self.backstory
        )
    }
}

const RESEARCHER: Agent = Agent {
    role: "Senior Research Analyst",
    goal: "Conduct thorough research using credible web sources",
    backstory: "You find the latest information from web sources, industry news and reports, \
                and you always record where each fact came from.",
};

const WRITER: Agent = Agent {
    role: "Expert Content Writer",
    goal: "Create engaging, well-structured content based on research",
    backstory: "You turn research into clear, accessible articles and cite every claim.",
};

fn research_prompt(request: &GenerationRequest, sources: &str) -> String {
    format!(
        "Research the topic: {topic}\n\n\
         Web search results:\n{sources}\n\
         Using these sources, report on:\n\
         - Latest news, trends and industry developments\n\
         - Key facts, statistics and data points\n\
         - Expert insights and practical applications\n\n\
         Finish with a bibliography, one source per line, in exactly this form:\n\
         [1] Title | Author or organization | Publication date | URL | Web",
        topic = request.topic,
    )
}

fn writing_prompt(request: &GenerationRequest, research: &str) -> String {
    format!(
        "Write a {kind} about: {topic}\n\n\
         Requirements:\n\
         - Approximately {words} words\n\
         - An engaging headline and subheadings\n\
         - A clear introduction and conclusion\n\
         - Based only on the research below\n\
         - In-text citations in the form [1], [2] that match the bibliography numbers\n\
         - End with a \"References\" heading followed by one line per source:\n\
           [1] Title | Author | Date | URL\n\n\
         Research:\n{research}",
        kind = request.content_type,
        topic = request.topic,
        words = request.word_count,
    )
}

/// Researcher then writer, run sequentially.
pub struct Crew {
    chat: ChatClient,
    search: SerperClient,
}

impl Crew {
    pub fn from_config(config: &AppConfig) -> Result<Self, GenerationError> {
        Ok(Self {
            chat: ChatClient::new(
                config.openai_base_url.clone(),
                config.openai_api_key.clone(),
                config.llm_model.clone(),
                config.llm_timeout,
            )?,
            search: SerperClient::new(config.serper_api_key.clone(), config.llm_timeout)?,
        })
    }
}

#[async_trait]
impl ArticleGenerator for Crew {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let results = self.search.search(&request.topic).await?;
        tracing::info!(topic = %request.topic, results = results.len(), "web search complete");

        let research = self
            .chat
            .complete(
                &RESEARCHER.system_prompt(),
                &research_prompt(request, &format_results(&results)),
            )
            .await?;
        tracing::info!(topic = %request.topic, model = self.chat.model(), "research complete");

        let article = self
            .chat
            .complete(&WRITER.system_prompt(), &writing_prompt(request, &research))
            .await?;
        tracing::info!(topic = %request.topic, chars = article.len(), "article written");

        Ok(article)
    }
}
