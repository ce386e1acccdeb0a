use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Default role instruction sent with every remote completion.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful medical assistant";

/// Represents the generation parameters used for the remote completion service.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Validate)]
pub struct ModelConfig {
    /// The identifier for the model to be used (API model name).
    #[validate(length(min = 1))]
    pub model_id: String,
    /// Controls the creativity of the model's responses. Value between 0.0 and 1.0.
    #[validate(range(min = 0.0, max = 1.0))]
    pub temperature: f32,
    /// Upper bound on the number of tokens generated per answer.
    #[validate(range(min = 1, max = 4096))]
    pub max_tokens: u32,
    /// The system-level instructions provided to the model for context.
    #[validate(length(min = 1))]
    pub system_prompt: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_id: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            max_tokens: 150,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

/// The author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Label used in the plain-text transcript export.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Represents a single message within a chat session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender.
    pub role: Role,
    /// The text content of the message.
    pub content: String,
    /// When the message was recorded.
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_config_is_valid() {
        assert!(ModelConfig::default().validate().is_ok());
    }

    #[test]
    fn test_temperature_out_of_range_rejected() {
        let config = ModelConfig {
            temperature: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }
}
