use crate::actors::messages::{AppError, CompletionRequest};
use async_trait::async_trait;

/// Defines the public interface for an LLM (Large Language Model) actor.
///
/// This trait abstracts the specific implementation of the LLM, allowing for different
/// backends (e.g., a hosted chat-completions API, or a mock in tests) to be used interchangeably.
#[async_trait]
pub trait LlmActor: Send + Sync + 'static {
    /// Generates a complete text response for a single request. One attempt, no retry.
    async fn generate(&self, request: CompletionRequest) -> Result<String, AppError>;
}
