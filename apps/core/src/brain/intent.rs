//! Intent routing using ordered substring rules.
//!
//! Rules are evaluated in a fixed priority order and the first rule whose markers
//! appear in the normalized input wins. Matching is plain substring containment,
//! so "chill" matches inside "chills".

use super::knowledge::{KnowledgeBase, SYMPTOM_SENTINEL};
use std::fmt;

/// Which branch of the responder handles a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Greeting (hi, hello, hey)
    Greeting,
    /// "how are you"
    SmallTalk,
    /// Help/Assistance
    Help,
    /// Questions about MedBridge itself
    AboutProduct,
    /// Symptom sentinel or a topic keyword
    Symptoms,
    /// No local rule matched; remote completion handles it
    RemoteCompletion,
    /// No local rule matched and no remote service configured
    Fallback,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Intent {
    /// Returns a human-readable label for the intent
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::SmallTalk => "small_talk",
            Intent::Help => "help",
            Intent::AboutProduct => "about_product",
            Intent::Symptoms => "symptoms",
            Intent::RemoteCompletion => "remote_completion",
            Intent::Fallback => "fallback",
        }
    }
}

/// Result of intent routing
#[derive(Debug, Clone, PartialEq)]
pub struct IntentResult {
    /// Detected intent
    pub intent: Intent,
    /// Markers of the winning rule found in the input
    pub matched_markers: Vec<String>,
}

/// One (predicate, intent) pair in the priority list.
struct IntentRule {
    intent: Intent,
    markers: Vec<String>,
}

impl IntentRule {
    fn matches(&self, text: &str) -> Vec<String> {
        self.markers
            .iter()
            .filter(|m| text.contains(m.as_str()))
            .cloned()
            .collect()
    }
}

/// Ordered rule list built from a knowledge base.
pub struct IntentClassifier {
    rules: Vec<IntentRule>,
}

impl IntentClassifier {
    /// Builds the rule list in priority order: greeting, small talk, help, about, symptoms.
    pub fn new(knowledge: &KnowledgeBase) -> Self {
        let mut symptom_markers = vec![SYMPTOM_SENTINEL.to_string()];
        symptom_markers.extend(knowledge.topic_keywords().iter().cloned());

        let rules = vec![
            IntentRule {
                intent: Intent::Greeting,
                markers: knowledge.greeting_markers().to_vec(),
            },
            IntentRule {
                intent: Intent::SmallTalk,
                markers: knowledge.small_talk_markers().to_vec(),
            },
            IntentRule {
                intent: Intent::Help,
                markers: knowledge.help_markers().to_vec(),
            },
            IntentRule {
                intent: Intent::AboutProduct,
                markers: knowledge.about_markers().to_vec(),
            },
            IntentRule {
                intent: Intent::Symptoms,
                markers: symptom_markers,
            },
        ];

        Self { rules }
    }

    /// Routes already-normalized (trimmed, lower-cased) text.
    ///
    /// Returns `None` when no local rule matches; the caller decides between
    /// remote completion and the fallback answer.
    pub fn classify(&self, normalized: &str) -> Option<IntentResult> {
        if normalized.is_empty() {
            return None;
        }

        self.rules.iter().find_map(|rule| {
            let matched = rule.matches(normalized);
            (!matched.is_empty()).then(|| IntentResult {
                intent: rule.intent,
                matched_markers: matched,
            })
        })
    }

    /// Intents covered by local rules, in evaluation order.
    pub fn priority(&self) -> Vec<Intent> {
        self.rules.iter().map(|r| r.intent).collect()
    }
}

/// Folds case and trims edge whitespace.
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> IntentClassifier {
        IntentClassifier::new(&KnowledgeBase::builtin())
    }

    fn intent_of(text: &str) -> Option<Intent> {
        classifier().classify(&normalize(text)).map(|r| r.intent)
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(
            classifier().priority(),
            vec![
                Intent::Greeting,
                Intent::SmallTalk,
                Intent::Help,
                Intent::AboutProduct,
                Intent::Symptoms
            ]
        );
    }

    #[test]
    fn test_greeting_detection() {
        assert_eq!(intent_of("Hello there"), Some(Intent::Greeting));
        assert_eq!(intent_of("  HEY  "), Some(Intent::Greeting));
    }

    #[test]
    fn test_greeting_beats_symptoms() {
        assert_eq!(intent_of("hello, I have a fever"), Some(Intent::Greeting));
    }

    #[test]
    fn test_small_talk_and_help() {
        assert_eq!(intent_of("How are you today"), Some(Intent::SmallTalk));
        assert_eq!(intent_of("I need help"), Some(Intent::Help));
    }

    #[test]
    fn test_about_product() {
        assert_eq!(intent_of("Tell me about MedBridge AI"), Some(Intent::AboutProduct));
    }

    #[test]
    fn test_symptom_markers() {
        let result = classifier().classify("headache and fever").unwrap();
        assert_eq!(result.intent, Intent::Symptoms);
        assert_eq!(result.matched_markers, vec!["headache", "fever"]);

        assert_eq!(intent_of("symptoms"), Some(Intent::Symptoms));
    }

    #[test]
    fn test_substring_matching() {
        // "chi" + "lls" contains "hi"
        assert_eq!(intent_of("chills"), Some(Intent::Greeting));
    }

    #[test]
    fn test_unmatched_input() {
        assert_eq!(intent_of(""), None);
        assert_eq!(intent_of("   "), None);
        assert_eq!(intent_of("what's the capital of France"), None);
    }
}
