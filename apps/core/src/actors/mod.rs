//! Actors that wrap external collaborators.

pub mod llm;
pub mod messages;
pub mod traits;
