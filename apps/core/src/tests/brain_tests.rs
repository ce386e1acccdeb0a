//! Brain Module Tests
//!
//! Routing priority, symptom assembly and greeting selection through the
//! public `ResponseClassifier` entry point.

use crate::brain::{Intent, KnowledgeBase, KnowledgeBaseConfig, ResponseClassifier};
use std::sync::Arc;

fn classifier() -> ResponseClassifier {
    ResponseClassifier::new(Arc::new(KnowledgeBase::builtin()))
}

#[cfg(test)]
mod routing_tests {
    use super::*;

    #[test]
    fn test_each_branch_routes_independently() {
        let classifier = classifier();

        let cases = vec![
            ("hello", Intent::Greeting),
            ("how are you", Intent::SmallTalk),
            ("can you help", Intent::Help),
            ("what is medbridge", Intent::AboutProduct),
            ("I have a cold", Intent::Symptoms),
            ("what's the capital of France", Intent::Fallback),
        ];

        for (input, expected) in cases {
            assert_eq!(classifier.route(input), expected, "Wrong route for '{}'", input);
        }
    }

    #[test]
    fn test_greeting_wins_over_every_other_branch() {
        let classifier = classifier();

        let inputs = vec![
            "hello, how are you",
            "hey, I need help",
            "hi, what is medbridge ai",
            "hello, I have a severe headache and fever",
        ];

        for input in inputs {
            assert_eq!(classifier.route(input), Intent::Greeting, "'{}'", input);
        }
    }

    #[test]
    fn test_small_talk_beats_help() {
        assert_eq!(classifier().route("how are you? help"), Intent::SmallTalk);
    }

    #[test]
    fn test_help_beats_symptoms() {
        assert_eq!(classifier().route("help with my fever"), Intent::Help);
    }
}

#[cfg(test)]
mod response_tests {
    use super::*;

    #[tokio::test]
    async fn test_greeting_is_member_of_greeting_set() {
        let classifier = classifier();
        let greetings = classifier.knowledge().greeting_answers().to_vec();

        // Selection is random per call; only membership is asserted.
        for input in ["hi", "Hello there", "HEY", "hello, I have a fever"] {
            let answer = classifier.classify(input).await;
            assert!(greetings.contains(&answer), "'{}' gave '{}'", input, answer);
        }
    }

    #[tokio::test]
    async fn test_fever_with_severity_escalates() {
        let classifier = classifier();
        let kb = classifier.knowledge();

        let answer = classifier.classify("I have a fever and it feels severe").await;

        assert!(answer.contains(kb.topic_answer("fever").unwrap()));
        assert!(answer.contains(kb.escalation_notice()));
        assert!(!answer.contains(kb.disclaimer()));
    }

    #[tokio::test]
    async fn test_headache_gets_disclaimer() {
        let classifier = classifier();
        let kb = classifier.knowledge();

        let answer = classifier.classify("I have a headache").await;

        assert_eq!(
            answer,
            format!("{} {}", kb.topic_answer("headache").unwrap(), kb.disclaimer())
        );
        assert!(!answer.contains(kb.escalation_notice()));
    }

    #[tokio::test]
    async fn test_symptoms_sentinel_alone() {
        let classifier = classifier();
        let answer = classifier.classify("symptoms").await;
        assert_eq!(answer, classifier.knowledge().symptoms_prompt());
    }

    #[tokio::test]
    async fn test_empty_input_returns_fallback() {
        let classifier = classifier();
        assert_eq!(classifier.classify("").await, classifier.knowledge().fallback());
        assert_eq!(classifier.classify(" \t ").await, classifier.knowledge().fallback());
    }

    #[tokio::test]
    async fn test_case_and_whitespace_are_ignored() {
        let classifier = classifier();
        let a = classifier.classify("  I HAVE MALARIA  ").await;
        let b = classifier.classify("i have malaria").await;
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_non_greeting_answers_are_repeatable() {
        let classifier = classifier();

        for input in [
            "how are you",
            "help",
            "medbridge ai",
            "cold and fever, getting worse",
            "symptoms",
            "tell me a joke",
            "",
        ] {
            let first = classifier.classify(input).await;
            let second = classifier.classify(input).await;
            assert_eq!(first, second, "'{}' is not repeatable", input);
        }
    }

    #[tokio::test]
    async fn test_multiple_topics_in_table_order() {
        let classifier = classifier();
        let kb = classifier.knowledge();

        let answer = classifier.classify("cold, then malaria").await;
        let expected = format!(
            "{} {} {}",
            kb.topic_answer("malaria").unwrap(),
            kb.topic_answer("cold").unwrap(),
            kb.disclaimer()
        );
        assert_eq!(answer, expected);
    }

    #[tokio::test]
    async fn test_custom_single_greeting_is_deterministic() {
        let config = KnowledgeBaseConfig {
            greeting_answers: vec!["Welcome.".to_string()],
            ..Default::default()
        };
        let kb = KnowledgeBase::try_from(config).unwrap();
        let classifier = ResponseClassifier::new(Arc::new(kb));

        assert_eq!(classifier.classify("hello").await, "Welcome.");
    }
}
