//! Session Tests

use crate::brain::{KnowledgeBase, ResponseClassifier};
use crate::models::Role;
use crate::session::ChatSession;
use std::sync::Arc;
use tempfile::tempdir;

#[tokio::test]
async fn test_send_records_both_turns() {
    let classifier = ResponseClassifier::new(Arc::new(KnowledgeBase::builtin()));
    let mut session = ChatSession::new();

    let answer = session.send(&classifier, "help").await;

    let messages = session.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[0].content, "help");
    assert_eq!(messages[1].role, Role::Assistant);
    assert_eq!(messages[1].content, answer);
}

#[test]
fn test_export_format() {
    let mut session = ChatSession::new();
    session.push(Role::User, "I have a cold");
    session.push(Role::Assistant, "Rest and fluids.");

    assert_eq!(
        session.export_transcript(),
        "User: I have a cold\n\nAssistant: Rest and fluids."
    );
}

#[test]
fn test_empty_export() {
    assert_eq!(ChatSession::new().export_transcript(), "");
}

#[tokio::test]
async fn test_save_transcript() {
    let classifier = ResponseClassifier::new(Arc::new(KnowledgeBase::builtin()));
    let mut session = ChatSession::new();
    session.send(&classifier, "symptoms").await;

    let dir = tempdir().unwrap();
    let path = dir.path().join("transcript.txt");
    session.save_transcript(&path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, session.export_transcript());
    assert!(written.starts_with("User: symptoms\n\nAssistant: "));
}
