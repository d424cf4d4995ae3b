use thiserror::Error;

/// Top-level application error.
/// All variants carry a human-readable message for display/logging.
#[derive(Debug, Error)]
pub enum AppError {
    // ── Configuration errors ─────────────────────────────────────────────────
    #[error("Invalid configuration value for {key}: '{value}'")]
    InvalidConfig { key: String, value: String },

    // ── AI Agent errors ──────────────────────────────────────────────────────
    #[error("Ollama service unavailable at {host}")]
    OllamaUnavailable { host: String },

    #[error("Model '{model_name}' not found in Ollama")]
    ModelNotFound { model_name: String },

    #[error("Inference error: {message}")]
    InferenceError { message: String },

    #[error("The model returned an empty answer")]
    EmptyCompletion,

    // ── Validation errors ────────────────────────────────────────────────────
    #[error("Field '{field_name}' cannot be empty")]
    EmptyField { field_name: String },

    #[error("Field '{field_name}' exceeds max length of {max_length} (actual: {actual_length})")]
    FieldTooLong { field_name: String, max_length: usize, actual_length: usize },

    #[error("Room id must be a positive integer (got {room_id})")]
    InvalidRoomId { room_id: i64 },

    // ── System errors ────────────────────────────────────────────────────────
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::EmptyField { .. } | AppError::FieldTooLong { .. } | AppError::InvalidRoomId { .. }
        )
    }

    pub fn is_agent_unavailable(&self) -> bool {
        matches!(self, AppError::OllamaUnavailable { .. } | AppError::ModelNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_classified() {
        assert!(AppError::EmptyField { field_name: "userPrompt".into() }.is_validation());
        assert!(AppError::InvalidRoomId { room_id: 0 }.is_validation());
        assert!(!AppError::EmptyCompletion.is_validation());
    }

    #[test]
    fn unavailable_agent_is_classified() {
        assert!(AppError::OllamaUnavailable { host: "http://localhost:11434".into() }
            .is_agent_unavailable());
        assert!(!AppError::InferenceError { message: "boom".into() }.is_agent_unavailable());
    }

    #[test]
    fn messages_are_human_readable() {
        let err = AppError::FieldTooLong {
            field_name: "userPrompt".into(),
            max_length: 10,
            actual_length: 12,
        };
        assert_eq!(
            err.to_string(),
            "Field 'userPrompt' exceeds max length of 10 (actual: 12)"
        );
    }
}
