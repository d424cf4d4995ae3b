//! Server configuration parsed from environment variables.

use crate::errors::AppError;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3.2";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub ollama_base_url: String,
    pub model: String,
    /// `None` allows any origin.
    pub cors_allowed_origin: Option<String>,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// - `PORT`: default 8080
    /// - `OLLAMA_API_BASE_URL`: default `http://localhost:11434`
    /// - `OLLAMA_MODEL`: default `llama3.2`
    /// - `CORS_ALLOWED_ORIGIN`: any origin when unset
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| AppError::InvalidConfig {
                key: "PORT".to_string(),
                value: raw.clone(),
            })?,
            None => DEFAULT_PORT,
        };

        let ollama_base_url = lookup("OLLAMA_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_OLLAMA_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let model = lookup("OLLAMA_MODEL")
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let cors_allowed_origin = lookup("CORS_ALLOWED_ORIGIN").filter(|o| !o.trim().is_empty());

        Ok(Self { port, ollama_base_url, model, cors_allowed_origin })
    }
}
