// MedBridge AI core
// Rule-based health information answers, with an optional remote completion fallback.

pub mod actors;
pub mod brain;
pub mod chat;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod telemetry;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use actors::llm::LlmActorHandle;
use brain::{KnowledgeBase, ResponseClassifier};
use config::AppConfig;
use error::AppError;

/// Builds the classifier described by `config`.
///
/// Loads the knowledge base (built-in or JSON) and, when remote completion is
/// enabled, spawns the completion actor. Must run inside a Tokio runtime.
pub fn build_classifier(config: &AppConfig) -> Result<ResponseClassifier, AppError> {
    let knowledge = match &config.knowledge_path {
        Some(path) => KnowledgeBase::from_json_file(path)?,
        None => KnowledgeBase::builtin(),
    };

    let classifier = ResponseClassifier::new(Arc::new(knowledge));

    match &config.completion {
        Some(completion) => {
            let params = completion.model.clone();
            let actor = LlmActorHandle::new(completion.clone())?;
            Ok(classifier.with_remote(Arc::new(actor), params))
        }
        None => Ok(classifier),
    }
}
