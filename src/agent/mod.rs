use async_trait::async_trait;
use rig::client::Nothing;
use rig::completion::Chat;
use rig::message::Message as RigMessage;
use rig::prelude::CompletionClient;
use rig::providers::ollama;
use tracing::{debug, error};

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::{ChatMessage, MessageRole};

/// Something that can answer one game turn.
///
/// `history` holds the earlier turns of the room, oldest first, and never
/// contains the system prompt or the current user prompt.
#[async_trait]
pub trait ChatAgent: Send + Sync {
    async fn chat(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
        user_prompt: &str,
    ) -> Result<String, AppError>;
}

/// Builds a rig [`RigMessage`] history list from stored [`ChatMessage`] records.
fn to_rig_history(messages: &[ChatMessage]) -> Vec<RigMessage> {
    messages
        .iter()
        .filter_map(|m| match m.role {
            MessageRole::User => Some(RigMessage::user(&m.content)),
            MessageRole::Assistant => Some(RigMessage::assistant(&m.content)),
            MessageRole::System => None, // system prompt is set via preamble
        })
        .collect()
}

/// Uses the rig [`ollama::Client`] to run a single chat turn.
/// A fresh agent is built per turn so the room's system prompt, which changes
/// as riddles accumulate, is always current.
#[derive(Clone)]
pub struct OllamaAgentService {
    client: ollama::Client,
    base_url: String,
    model: String,
}

impl OllamaAgentService {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let client = ollama::Client::builder()
            .api_key(Nothing)
            .base_url(&config.ollama_base_url)
            .build()
            .map_err(|e| AppError::Unexpected(format!("Failed to build Ollama client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.ollama_base_url.clone(),
            model: config.model.clone(),
        })
    }

    fn classify(&self, e: impl std::fmt::Display) -> AppError {
        let msg = e.to_string();
        if msg.contains("Connection refused") || msg.contains("connect") {
            AppError::OllamaUnavailable { host: self.base_url.clone() }
        } else if msg.contains("model") && msg.contains("not found") {
            AppError::ModelNotFound { model_name: self.model.clone() }
        } else {
            AppError::InferenceError { message: msg }
        }
    }
}

#[async_trait]
impl ChatAgent for OllamaAgentService {
    async fn chat(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
        user_prompt: &str,
    ) -> Result<String, AppError> {
        let agent = self.client.agent(&self.model).preamble(system_prompt).build();

        let rig_history = to_rig_history(history);
        debug!(turns = rig_history.len(), model = %self.model, "Sending chat turn to Ollama");

        agent.chat(user_prompt, rig_history).await.map_err(|e| {
            error!("Ollama inference failed: {e}");
            self.classify(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_drops_system_messages() {
        let history = vec![
            ChatMessage::system("rules"),
            ChatMessage::user("start"),
            ChatMessage::assistant("A man walks into a bar..."),
        ];
        assert_eq!(to_rig_history(&history).len(), 2);
    }

    #[test]
    fn connection_failures_map_to_unavailable() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        let svc = OllamaAgentService::new(&config).unwrap();
        assert!(matches!(
            svc.classify("error sending request: Connection refused"),
            AppError::OllamaUnavailable { .. }
        ));
        assert!(matches!(
            svc.classify("model 'llama3.2' not found"),
            AppError::ModelNotFound { .. }
        ));
        assert!(matches!(svc.classify("bad gateway"), AppError::InferenceError { .. }));
    }

    #[test]
    fn other_model_errors_are_inference_errors() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        let svc = OllamaAgentService::new(&config).unwrap();
        for msg in ["model is overloaded", "model requires more system memory"] {
            assert!(matches!(svc.classify(msg), AppError::InferenceError { .. }), "{msg}");
        }
    }
}
