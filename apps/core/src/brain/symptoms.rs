//! Symptom response assembly.

use super::knowledge::KnowledgeBase;

/// Outcome of scanning a message for topics and severity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationResult {
    /// Topic keywords found, in table order.
    pub matched_topics: Vec<String>,
    pub severity_flagged: bool,
}

impl ClassificationResult {
    pub fn matched(&self) -> bool {
        !self.matched_topics.is_empty()
    }
}

/// Assembled answer plus the classification it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomResponse {
    pub classification: ClassificationResult,
    pub text: String,
}

/// Builds symptom answers from a knowledge base.
pub struct SymptomAssembler<'a> {
    knowledge: &'a KnowledgeBase,
}

impl<'a> SymptomAssembler<'a> {
    pub fn new(knowledge: &'a KnowledgeBase) -> Self {
        Self { knowledge }
    }

    /// Scans lower-cased input for topics and severity markers.
    ///
    /// A topic whose answer is missing does not count as matched.
    pub fn scan(&self, lowered: &str) -> ClassificationResult {
        let matched_topics = self
            .knowledge
            .topic_keywords()
            .iter()
            .filter(|k| lowered.contains(k.as_str()))
            .filter(|k| self.knowledge.topic_answer(k).is_some())
            .cloned()
            .collect();

        let severity_flagged = self
            .knowledge
            .severity_markers()
            .iter()
            .any(|m| lowered.contains(m.as_str()));

        ClassificationResult {
            matched_topics,
            severity_flagged,
        }
    }

    /// Builds the answer: topic answers (or the generic prompt), then the escalation
    /// notice if any severity marker is present, else the disclaimer if a topic matched.
    pub fn assemble(&self, lowered: &str) -> SymptomResponse {
        let classification = self.scan(lowered);

        let mut parts: Vec<&str> = classification
            .matched_topics
            .iter()
            .filter_map(|k| self.knowledge.topic_answer(k))
            .collect();

        if parts.is_empty() {
            parts.push(self.knowledge.symptoms_prompt());
        }

        if classification.severity_flagged {
            parts.push(self.knowledge.escalation_notice());
        } else if classification.matched() {
            parts.push(self.knowledge.disclaimer());
        }

        let text = parts.join(" ").trim().to_string();

        SymptomResponse {
            classification,
            text,
        }
    }
}
