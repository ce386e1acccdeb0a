//! Chat session transcript.

use crate::brain::ResponseClassifier;
use crate::error::AppError;
use crate::models::{Message, Role};
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::info;
use uuid::Uuid;

/// An ordered conversation between the user and the assistant.
#[derive(Debug, Clone)]
pub struct ChatSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    messages: Vec<Message>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            messages: Vec::new(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(Message::new(role, content));
    }

    /// Records the user's message, answers it, records the answer and returns it.
    pub async fn send(&mut self, classifier: &ResponseClassifier, text: &str) -> String {
        self.push(Role::User, text);
        let answer = classifier.classify(text).await;
        self.push(Role::Assistant, answer.clone());
        answer
    }

    /// Plain-text export: one `Role: content` line per entry, entries separated by a blank line.
    pub fn export_transcript(&self) -> String {
        self.messages
            .iter()
            .map(|m| format!("{}: {}", m.role, m.content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn save_transcript(&self, path: &Path) -> Result<(), AppError> {
        std::fs::write(path, self.export_transcript())?;
        info!(
            "Saved transcript of session {} ({} messages) to {}",
            self.id,
            self.messages.len(),
            path.display()
        );
        Ok(())
    }
}
