use tokio::sync::oneshot;

/// Defines errors that can occur within the actor system.
#[derive(Debug, thiserror::Error, Clone)]
pub enum ActorError {
    /// An error originating from the LLM actor.
    #[error("LLM request failed: {0}")]
    LlmError(String),
    /// A generic internal error within an actor.
    #[error("Internal system error: {0}")]
    Internal(String),
    /// An error indicating that an actor operation timed out.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl From<tokio::time::error::Elapsed> for ActorError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        ActorError::Timeout(err.to_string())
    }
}

// Re-export AppError for convenience
pub use crate::error::AppError;

/// A single completion request sent to the remote text-generation service.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Role instruction sent as the `system` message.
    pub system_prompt: String,
    /// The user's text, in its original case.
    pub prompt: String,
    /// Ceiling on generated tokens.
    pub max_tokens: u32,
    /// Sampling temperature in `[0, 1]`.
    pub temperature: f32,
}

/// Messages that can be sent to the `LlmActor`.
#[derive(Debug)]
pub enum LlmMessage {
    /// A request to generate a complete text response.
    Generate {
        request: CompletionRequest,
        /// A channel to send the final `String` result back.
        responder: oneshot::Sender<Result<String, AppError>>,
    },
}
