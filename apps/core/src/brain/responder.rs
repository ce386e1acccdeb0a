//! Response classifier - main entry point of the brain.
//!
//! Normalizes the input, routes it through the ordered intent rules, and produces
//! the answer for the winning branch. When nothing local matches, the message is
//! handed to the remote completion service if one is configured.

use rand::seq::SliceRandom;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use super::intent::{normalize, Intent, IntentClassifier};
use super::knowledge::KnowledgeBase;
use super::symptoms::SymptomAssembler;
use crate::actors::messages::CompletionRequest;
use crate::actors::traits::LlmActor;
use crate::models::ModelConfig;

/// Remote completion service plus the parameters sent with every request.
struct RemoteCompletion {
    actor: Arc<dyn LlmActor>,
    params: ModelConfig,
}

/// Stateless classifier: the same input always takes the same branch.
///
/// Greeting answers are picked at random on every call when more than one is
/// configured, so greeting output is intentionally non-deterministic.
pub struct ResponseClassifier {
    knowledge: Arc<KnowledgeBase>,
    intents: IntentClassifier,
    remote: Option<RemoteCompletion>,
}

impl ResponseClassifier {
    /// Creates a classifier with local rules only.
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        let intents = IntentClassifier::new(&knowledge);
        Self {
            knowledge,
            intents,
            remote: None,
        }
    }

    /// Attaches a remote completion service used when no local rule matches.
    pub fn with_remote(mut self, actor: Arc<dyn LlmActor>, params: ModelConfig) -> Self {
        self.remote = Some(RemoteCompletion { actor, params });
        self
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Decides which branch handles `input` without producing an answer.
    pub fn route(&self, input: &str) -> Intent {
        let normalized = normalize(input);
        self.route_normalized(&normalized)
    }

    fn route_normalized(&self, normalized: &str) -> Intent {
        match self.intents.classify(normalized) {
            Some(result) => result.intent,
            // Blank input never reaches the remote service.
            None if self.remote.is_some() && !normalized.is_empty() => Intent::RemoteCompletion,
            None => Intent::Fallback,
        }
    }

    /// Produces the answer for one message. Never fails: remote errors become an apology.
    #[instrument(skip(self, input), fields(input_len = input.len()))]
    pub async fn classify(&self, input: &str) -> String {
        let normalized = normalize(input);
        let intent = self.route_normalized(&normalized);
        debug!("Routed message to {}", intent);

        match intent {
            Intent::Greeting => self.greeting(),
            Intent::SmallTalk => self.knowledge.small_talk_answer().to_string(),
            Intent::Help => self.knowledge.help_answer().to_string(),
            Intent::AboutProduct => self.knowledge.about_answer().to_string(),
            Intent::Symptoms => {
                let response = SymptomAssembler::new(&self.knowledge).assemble(&normalized);
                debug!(
                    topics = ?response.classification.matched_topics,
                    severity = response.classification.severity_flagged,
                    "Assembled symptom response"
                );
                response.text
            }
            Intent::RemoteCompletion => self.complete_remotely(input).await,
            Intent::Fallback => self.knowledge.fallback().to_string(),
        }
    }

    fn greeting(&self) -> String {
        self.knowledge
            .greeting_answers()
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(|| self.knowledge.fallback().to_string())
    }

    async fn complete_remotely(&self, input: &str) -> String {
        let Some(remote) = &self.remote else {
            return self.knowledge.fallback().to_string();
        };

        let request = CompletionRequest {
            system_prompt: remote.params.system_prompt.clone(),
            prompt: input.to_string(),
            max_tokens: remote.params.max_tokens,
            temperature: remote.params.temperature,
        };

        info!("No local rule matched, delegating to remote completion");
        match remote.actor.generate(request).await {
            Ok(text) => text,
            Err(e) => {
                error!("Remote completion failed: {}", e);
                format!("{} Error: {}", self.knowledge.remote_apology(), e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local() -> ResponseClassifier {
        ResponseClassifier::new(Arc::new(KnowledgeBase::builtin()))
    }

    #[tokio::test]
    async fn test_symptoms_alone_returns_prompt() {
        let classifier = local();
        let answer = classifier.classify("symptoms").await;
        assert_eq!(answer, classifier.knowledge().symptoms_prompt());
    }

    #[tokio::test]
    async fn test_empty_input_falls_back() {
        let classifier = local();
        assert_eq!(classifier.classify("").await, classifier.knowledge().fallback());
        assert_eq!(classifier.route(""), Intent::Fallback);
    }

    #[test]
    fn test_route_without_remote() {
        assert_eq!(local().route("what's the capital of France"), Intent::Fallback);
    }
}
