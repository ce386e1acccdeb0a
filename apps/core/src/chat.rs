//! Line-oriented chat loop.

use crate::brain::ResponseClassifier;
use crate::error::AppError;
use crate::session::ChatSession;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

pub const WELCOME: &str = "MedBridge AI Chatbot: Hello! I am MedBridge AI, your personal health assistant. How can I help you today? Type 'exit' to end the conversation.";
pub const GOODBYE: &str = "MedBridge AI Chatbot: Goodbye! Stay healthy.";

/// Answers one message per input line until `exit` or end of input.
///
/// A read error ends the conversation like end of input does; the messages
/// exchanged so far stay in `session` and the error is returned afterwards.
pub async fn run<R, W>(
    classifier: &ResponseClassifier,
    session: &mut ChatSession,
    input: R,
    out: &mut W,
) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut read_error = None;

    writeln!(out, "{}", WELCOME)?;
    loop {
        write!(out, "You: ")?;
        out.flush()?;

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to read input, ending conversation: {}", e);
                read_error = Some(e);
                break;
            }
        };
        if line.trim().eq_ignore_ascii_case("exit") {
            break;
        }

        let answer = session.send(classifier, &line).await;
        writeln!(out, "MedBridge AI Chatbot: {}", answer)?;
    }
    writeln!(out, "{}", GOODBYE)?;

    match read_error {
        Some(e) => Err(AppError::Io(e)),
        None => Ok(()),
    }
}
