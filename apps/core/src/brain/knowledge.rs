//! Knowledge base: canned answers, trigger phrases and notices.
//!
//! A `KnowledgeBase` is built once at startup (either the built-in table or a JSON file)
//! and is read-only afterwards. Construction validates that every keyword the matching
//! logic can hit has an answer, so lookups cannot silently come back empty.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{info, warn};
use validator::Validate;

/// Literal that marks a message as symptom-related without naming a topic.
pub const SYMPTOM_SENTINEL: &str = "symptoms";

const GREETING_ANSWERS: &[&str] = &[
    "Hello! I am MedBridge AI, your personal health assistant. How can I help you today? You can tell me about your symptoms, ask for general health information, or learn more about MedBridge AI.",
    "Hi there! I'm MedBridge AI. Tell me how you're feeling, or ask me a general health question.",
    "Hey! MedBridge AI here. I can share basic health information about common symptoms. What's on your mind?",
];

const GREETING_MARKERS: &[&str] = &["hi", "hello", "hey"];
const SMALL_TALK_MARKERS: &[&str] = &["how are you"];
const HELP_MARKERS: &[&str] = &["help"];
const ABOUT_MARKERS: &[&str] = &["what is medbridge", "medbridge ai"];

const SMALL_TALK_ANSWER: &str = "I am an AI, so I don't have feelings, but I'm ready to assist you! How can I help you with your health today?";
const HELP_ANSWER: &str = "I can help you with basic health information, answer questions about common symptoms, or tell you more about MedBridge AI. What would you like to know?";
const ABOUT_ANSWER: &str = "MedBridge AI is an artificial intelligence-powered platform designed to improve healthcare accessibility in emerging markets. We provide preliminary health information and guidance through a simple chat interface, helping connect people to the care they need.";
const SYMPTOMS_PROMPT: &str = "Please describe your symptoms in more detail. For example, 'I have a cough and a sore throat.'";

const TOPICS: &[(&str, &str)] = &[
    (
        "headache",
        "Headaches can be caused by stress, dehydration, or lack of sleep. If your headache is severe, persistent, or accompanied by other symptoms like fever or vision changes, please consult a doctor immediately.",
    ),
    (
        "fever",
        "Fever is often a sign that your body is fighting an infection. Rest, drink plenty of fluids, and consider fever-reducing medication if needed. If your fever is very high, lasts for more than a few days, or is accompanied by severe symptoms, seek medical attention.",
    ),
    (
        "malaria",
        "Malaria is a serious disease caused by a parasite spread by mosquitoes. Symptoms include fever, chills, and flu-like illness. It is preventable and curable. If you suspect you have malaria, please seek medical attention for proper diagnosis and treatment.",
    ),
    (
        "cold",
        "The common cold is a viral infection of your nose and throat. Symptoms usually include a runny nose, sore throat, cough, and congestion. Rest, fluids, and over-the-counter remedies can help. It usually resolves within a week or two.",
    ),
];

const SEVERITY_MARKERS: &[&str] = &[
    "severe",
    "emergency",
    "persistent",
    "worse",
    "worsening",
    "can't breathe",
    "bleeding",
];

const ESCALATION_NOTICE: &str = "Important: Your symptoms sound concerning. Please seek immediate medical attention from a qualified healthcare professional or visit the nearest clinic.";
const DISCLAIMER: &str = "Remember, I am an AI and cannot provide a diagnosis. Always consult a healthcare professional for accurate medical advice.";
const FALLBACK: &str = "I'm not sure how to respond to that. Can you rephrase your question or ask about a specific symptom or health topic?";
const REMOTE_APOLOGY: &str = "I'm sorry, I couldn't reach the medical assistant service right now.";

/// Serializable form of the knowledge base, as read from a JSON file.
///
/// Every field is optional in the file; missing fields keep the built-in value.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct KnowledgeBaseConfig {
    #[validate(length(min = 1))]
    pub greeting_answers: Vec<String>,
    #[validate(length(min = 1))]
    pub greeting_markers: Vec<String>,
    #[validate(length(min = 1))]
    pub small_talk_markers: Vec<String>,
    #[validate(length(min = 1))]
    pub small_talk_answer: String,
    #[validate(length(min = 1))]
    pub help_markers: Vec<String>,
    #[validate(length(min = 1))]
    pub help_answer: String,
    #[validate(length(min = 1))]
    pub about_markers: Vec<String>,
    #[validate(length(min = 1))]
    pub about_answer: String,
    #[validate(length(min = 1))]
    pub symptoms_prompt: String,
    /// Ordered topic keywords. Order decides the order of answers in a response.
    pub topic_keywords: Vec<String>,
    /// Answer per topic keyword.
    pub topic_answers: HashMap<String, String>,
    pub severity_markers: Vec<String>,
    #[validate(length(min = 1))]
    pub escalation_notice: String,
    #[validate(length(min = 1))]
    pub disclaimer: String,
    #[validate(length(min = 1))]
    pub fallback: String,
    #[validate(length(min = 1))]
    pub remote_apology: String,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for KnowledgeBaseConfig {
    fn default() -> Self {
        Self {
            greeting_answers: owned(GREETING_ANSWERS),
            greeting_markers: owned(GREETING_MARKERS),
            small_talk_markers: owned(SMALL_TALK_MARKERS),
            small_talk_answer: SMALL_TALK_ANSWER.to_string(),
            help_markers: owned(HELP_MARKERS),
            help_answer: HELP_ANSWER.to_string(),
            about_markers: owned(ABOUT_MARKERS),
            about_answer: ABOUT_ANSWER.to_string(),
            symptoms_prompt: SYMPTOMS_PROMPT.to_string(),
            topic_keywords: TOPICS.iter().map(|(k, _)| k.to_string()).collect(),
            topic_answers: TOPICS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            severity_markers: owned(SEVERITY_MARKERS),
            escalation_notice: ESCALATION_NOTICE.to_string(),
            disclaimer: DISCLAIMER.to_string(),
            fallback: FALLBACK.to_string(),
            remote_apology: REMOTE_APOLOGY.to_string(),
        }
    }
}

/// Validated, immutable knowledge base.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    greeting_answers: Vec<String>,
    greeting_markers: Vec<String>,
    small_talk_markers: Vec<String>,
    small_talk_answer: String,
    help_markers: Vec<String>,
    help_answer: String,
    about_markers: Vec<String>,
    about_answer: String,
    symptoms_prompt: String,
    topic_keywords: Vec<String>,
    topic_answers: HashMap<String, String>,
    severity_markers: Vec<String>,
    escalation_notice: String,
    disclaimer: String,
    fallback: String,
    remote_apology: String,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

impl KnowledgeBase {
    /// The built-in MedBridge table.
    pub fn builtin() -> Self {
        Self::from_parts(KnowledgeBaseConfig::default())
    }

    /// Loads and validates a knowledge base from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        let config: KnowledgeBaseConfig = serde_json::from_str(&raw)?;
        let kb = Self::try_from(config)?;
        info!(
            "Loaded knowledge base from {} ({} topics)",
            path.display(),
            kb.topic_keywords.len()
        );
        Ok(kb)
    }

    fn from_parts(config: KnowledgeBaseConfig) -> Self {
        let lower = |items: Vec<String>| -> Vec<String> {
            items
                .into_iter()
                .map(|s| s.trim().to_lowercase())
                .collect()
        };

        Self {
            greeting_answers: config.greeting_answers,
            greeting_markers: lower(config.greeting_markers),
            small_talk_markers: lower(config.small_talk_markers),
            small_talk_answer: config.small_talk_answer,
            help_markers: lower(config.help_markers),
            help_answer: config.help_answer,
            about_markers: lower(config.about_markers),
            about_answer: config.about_answer,
            symptoms_prompt: config.symptoms_prompt,
            topic_keywords: lower(config.topic_keywords),
            topic_answers: config
                .topic_answers
                .into_iter()
                .map(|(k, v)| (k.trim().to_lowercase(), v))
                .collect(),
            severity_markers: lower(config.severity_markers),
            escalation_notice: config.escalation_notice,
            disclaimer: config.disclaimer,
            fallback: config.fallback,
            remote_apology: config.remote_apology,
        }
    }

    /// Checks the cross-field invariants the derive-based validation can't express.
    fn check_invariants(&self) -> Result<(), AppError> {
        let marker_groups = [
            ("greeting", &self.greeting_markers),
            ("small talk", &self.small_talk_markers),
            ("help", &self.help_markers),
            ("about", &self.about_markers),
            ("topic", &self.topic_keywords),
            ("severity", &self.severity_markers),
        ];
        for (group, markers) in marker_groups {
            if markers.iter().any(|m| m.is_empty()) {
                return Err(AppError::Config(format!(
                    "Empty {} marker would match every message",
                    group
                )));
            }
        }

        if self.greeting_answers.iter().any(|a| a.trim().is_empty()) {
            return Err(AppError::Config("Greeting answers must not be blank".to_string()));
        }

        let control: HashSet<&str> = self
            .greeting_markers
            .iter()
            .chain(&self.small_talk_markers)
            .chain(&self.help_markers)
            .chain(&self.about_markers)
            .map(String::as_str)
            .collect();

        let mut seen = HashSet::new();
        for keyword in &self.topic_keywords {
            if keyword == SYMPTOM_SENTINEL {
                return Err(AppError::Config(format!(
                    "'{}' is reserved and cannot be a topic keyword",
                    SYMPTOM_SENTINEL
                )));
            }
            if control.contains(keyword.as_str()) {
                return Err(AppError::Config(format!(
                    "Topic keyword '{}' collides with a control phrase",
                    keyword
                )));
            }
            if !seen.insert(keyword.as_str()) {
                return Err(AppError::Config(format!("Duplicate topic keyword '{}'", keyword)));
            }
            match self.topic_answers.get(keyword) {
                Some(answer) if !answer.trim().is_empty() => {}
                _ => {
                    return Err(AppError::Config(format!(
                        "Topic keyword '{}' has no answer",
                        keyword
                    )))
                }
            }
        }

        Ok(())
    }

    pub fn greeting_answers(&self) -> &[String] {
        &self.greeting_answers
    }

    pub fn greeting_markers(&self) -> &[String] {
        &self.greeting_markers
    }

    pub fn small_talk_markers(&self) -> &[String] {
        &self.small_talk_markers
    }

    pub fn small_talk_answer(&self) -> &str {
        &self.small_talk_answer
    }

    pub fn help_markers(&self) -> &[String] {
        &self.help_markers
    }

    pub fn help_answer(&self) -> &str {
        &self.help_answer
    }

    pub fn about_markers(&self) -> &[String] {
        &self.about_markers
    }

    pub fn about_answer(&self) -> &str {
        &self.about_answer
    }

    pub fn symptoms_prompt(&self) -> &str {
        &self.symptoms_prompt
    }

    /// Topic keywords in table order. Never contains the sentinel.
    pub fn topic_keywords(&self) -> &[String] {
        &self.topic_keywords
    }

    /// Canned answer for a topic keyword.
    ///
    /// A miss is reported as `None` and logged; callers treat it as "not matched".
    pub fn topic_answer(&self, keyword: &str) -> Option<&str> {
        let answer = self.topic_answers.get(keyword).map(String::as_str);
        if answer.is_none() {
            warn!("No canned answer for topic keyword '{}'", keyword);
        }
        answer
    }

    pub fn severity_markers(&self) -> &[String] {
        &self.severity_markers
    }

    pub fn escalation_notice(&self) -> &str {
        &self.escalation_notice
    }

    pub fn disclaimer(&self) -> &str {
        &self.disclaimer
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn remote_apology(&self) -> &str {
        &self.remote_apology
    }
}

impl TryFrom<KnowledgeBaseConfig> for KnowledgeBase {
    type Error = AppError;

    fn try_from(config: KnowledgeBaseConfig) -> Result<Self, Self::Error> {
        config.validate()?;
        let kb = Self::from_parts(config);
        kb.check_invariants()?;
        Ok(kb)
    }
}
