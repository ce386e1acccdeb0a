// MedBridge AI terminal chat
// Reads one message per line from stdin and prints the assistant's answer.

use anyhow::Context;
use clap::Parser;
use medbridge_core::config::{AppConfig, LogFormat};
use medbridge_core::session::ChatSession;
use medbridge_core::{build_classifier, chat, telemetry};
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::info;

#[derive(Parser)]
#[command(name = "medbridge")]
#[command(about = "MedBridge AI health information chatbot")]
struct Cli {
    /// JSON knowledge base to use instead of the built-in one
    #[arg(long)]
    knowledge: Option<PathBuf>,
    /// Write the conversation transcript here on exit
    #[arg(long)]
    transcript: Option<PathBuf>,
    /// Enable remote completion for messages no rule matches (needs OPENAI_API_KEY)
    #[arg(long)]
    remote: bool,
    /// Emit logs as bunyan JSON
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = AppConfig::from_env().context("Failed to load configuration")?;
    if cli.log_json {
        config.log_format = LogFormat::Json;
    }
    if cli.knowledge.is_some() {
        config.knowledge_path = cli.knowledge.clone();
    }
    if cli.remote && config.completion.is_none() {
        config.completion = Some(AppConfig::completion_from_env().context("Remote completion requested")?);
    }

    telemetry::init_tracing(config.log_format);

    let classifier = build_classifier(&config).context("Failed to initialize chatbot")?;
    info!(
        remote_completion = classifier.has_remote(),
        "MedBridge AI ready"
    );

    let mut session = ChatSession::new();
    let result = chat::run(
        &classifier,
        &mut session,
        BufReader::new(tokio::io::stdin()),
        &mut std::io::stdout(),
    )
    .await;

    if let Some(path) = &cli.transcript {
        session
            .save_transcript(path)
            .with_context(|| format!("Failed to write transcript to {}", path.display()))?;
    }

    result.context("Chat session ended with an error")?;
    Ok(())
}
