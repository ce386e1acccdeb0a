//! Test Module
//!
//! ## Test Categories
//! - `brain_tests`: routing priority, symptom assembly, greeting randomness
//! - `actor_tests`: remote completion delegation and failure recovery
//! - `session_tests`: transcript recording and export
//! - `config_tests`: environment-driven configuration and knowledge base loading

pub mod brain_tests;
pub mod session_tests;
