use std::env;
use std::time::Duration;

/// Front-end origins allowed to call the API when `CORS_ORIGINS` is unset.
const DEFAULT_ORIGINS: &[&str] = &[
    "https://blaze-ink-psi.vercel.app",
    "http://localhost:5173",
    "http://127.0.0.1:5173",
    "http://127.0.0.1:8000",
];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("{name} must be a valid {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host to bind to.
    pub host: String,
    /// Server port to bind to.
    pub port: u16,
    /// SQLite connection URL.
    pub database_url: String,
    /// Maximum database connections in the pool.
    pub db_max_connections: u32,
    /// Key for the OpenAI-compatible chat API.
    pub openai_api_key: String,
    /// Base URL of the chat API (no trailing slash).
    pub openai_base_url: String,
    /// Chat model used by both agents.
    pub llm_model: String,
    /// Key for the Serper web search API.
    pub serper_api_key: String,
    /// Timeout for each outbound LLM or search request.
    pub llm_timeout: Duration,
    /// Origins allowed by CORS (credentials are allowed, so no wildcard).
    pub cors_origins: Vec<String>,
    /// Whether the session cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
    /// Log level (e.g., "info", "debug", "trace").
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", "u16", 8000)?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://content.db".to_string()),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", "u32", 5)?,
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string())
                .trim_end_matches('/')
                .to_string(),
            llm_model: env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
            serper_api_key: required("SERPER_API_KEY")?,
            llm_timeout: Duration::from_secs(parse_var("LLM_TIMEOUT_SECS", "u64", 120)?),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|raw| split_origins(&raw))
                .unwrap_or_else(|_| DEFAULT_ORIGINS.iter().map(|s| s.to_string()).collect()),
            cookie_secure: parse_var("COOKIE_SECURE", "bool", true)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Build the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn parse_var<T: std::str::FromStr>(
    name: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        }),
        Err(_) => Ok(default),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
impl AppConfig {
    pub fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            database_url: "sqlite::memory:".into(),
            db_max_connections: 1,
            openai_api_key: "test".into(),
            openai_base_url: "http://localhost".into(),
            llm_model: "test-model".into(),
            serper_api_key: "test".into(),
            llm_timeout: Duration::from_secs(5),
            cors_origins: vec!["http://localhost:5173".into()],
            cookie_secure: false,
            log_level: "debug".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_origins_drops_blanks() {
        assert_eq!(
            split_origins(" http://a.test , ,http://b.test,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn addr_joins_host_and_port() {
        let mut config = AppConfig::for_tests();
        config.port = 8000;
        assert_eq!(config.addr(), "127.0.0.1:8000");
    }
}
