//! # Brain Module
//!
//! Rule-based answering for MedBridge AI.
//! Every message is answered locally when a rule matches; the remote
//! completion service only sees what nothing else handles.
//!
//! ## Components
//! - `knowledge`: canned answers, trigger phrases and notices
//! - `intent`: ordered substring rules (first match wins)
//! - `symptoms`: topic and severity scan, symptom answer assembly
//! - `responder`: main entry point

pub mod intent;
pub mod knowledge;
pub mod responder;
pub mod symptoms;

pub use intent::{normalize, Intent, IntentClassifier, IntentResult};
pub use knowledge::{KnowledgeBase, KnowledgeBaseConfig, SYMPTOM_SENTINEL};
pub use responder::ResponseClassifier;
pub use symptoms::{ClassificationResult, SymptomAssembler, SymptomResponse};
