use std::fmt::Write as _;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::GenerationError;

const SERPER_SEARCH_URL: &str = "https://google.serper.dev/search";
const RESULTS_PER_QUERY: u32 = 10;

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    q: &'a str,
    num: u32,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic: Vec<SearchResult>,
}

/// One organic web result.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub date: Option<String>,
}

/// Web search through the Serper API.
pub struct SerperClient {
    client: Client,
    api_key: String,
}

impl SerperClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, GenerationError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_key })
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, GenerationError> {
        let response = self
            .client
            .post(SERPER_SEARCH_URL)
            .header("X-API-KEY", &self.api_key)
            .json(&SearchRequest {
                q: query,
                num: RESULTS_PER_QUERY,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(GenerationError::Api {
                service: "search",
                status: status.as_u16(),
                body,
            });
        }

        let results: SearchResponse = response.json().await?;
        Ok(results.organic)
    }
}

/// Render results as a numbered source list for a prompt.
pub fn format_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return "No web results were found.".to_string();
    }

    let mut out = String::new();
    for (i, result) in results.iter().enumerate() {
        let _ = writeln!(
            out,
            "[{}] {} | {} | {}\n    {}",
            i + 1,
            result.title,
            result.date.as_deref().unwrap_or("n.d."),
            result.link,
            result.snippet
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_organic_results() {
        let response: SearchResponse = serde_json::from_str(
            r#"{
                "searchParameters": {"q": "rust"},
                "organic": [
                    {"title": "Rust 2024", "link": "https://blog.rust-lang.org", "snippet": "Edition", "date": "Feb 20, 2025", "position": 1},
                    {"title": "Docs", "link": "https://doc.rust-lang.org"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(response.organic.len(), 2);
        assert_eq!(response.organic[1].snippet, "");
        assert!(response.organic[1].date.is_none());
    }

    #[test]
    fn missing_organic_is_empty() {
        let response: SearchResponse = serde_json::from_str(r#"{"answerBox": {}}"#).unwrap();
        assert!(response.organic.is_empty());
    }

    #[test]
    fn formats_numbered_sources() {
        let results = vec![SearchResult {
            title: "Rust 2024".into(),
            link: "https://blog.rust-lang.org".into(),
            snippet: "Edition".into(),
            date: None,
        }];
        let text = format_results(&results);
        assert!(text.starts_with("[1] Rust 2024 | n.d. | https://blog.rust-lang.org"));
        assert!(text.contains("Edition"));
        assert_eq!(format_results(&[]), "No web results were found.");
    }
}
