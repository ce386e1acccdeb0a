//! Runtime configuration loaded from the environment (and `.env`, loaded by the binary).

use crate::error::AppError;
use crate::models::ModelConfig;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;
use validator::Validate;

// --- Environment keys ---
pub const ENV_REMOTE_COMPLETION: &str = "MEDBRIDGE_REMOTE_COMPLETION";
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_API_URL: &str = "MEDBRIDGE_API_URL";
pub const ENV_MODEL: &str = "MEDBRIDGE_MODEL";
pub const ENV_MAX_TOKENS: &str = "MEDBRIDGE_MAX_TOKENS";
pub const ENV_TEMPERATURE: &str = "MEDBRIDGE_TEMPERATURE";
pub const ENV_TIMEOUT_SECS: &str = "MEDBRIDGE_TIMEOUT_SECS";
pub const ENV_KNOWLEDGE_PATH: &str = "MEDBRIDGE_KNOWLEDGE_PATH";
pub const ENV_LOG_FORMAT: &str = "MEDBRIDGE_LOG_FORMAT";

// --- Defaults ---
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Output format for log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Settings for the remote completion service.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub api_url: Url,
    pub api_key: String,
    pub model: ModelConfig,
    /// Per-request timeout. A single attempt is made.
    pub timeout: Duration,
}

impl CompletionConfig {
    /// Builds a completion config, failing fast when the credential is missing.
    pub fn new(api_url: &str, api_key: &str, model: ModelConfig, timeout: Duration) -> Result<Self, AppError> {
        if api_key.trim().is_empty() {
            return Err(AppError::Config(format!(
                "{} is not set. Remote completion is enabled and cannot run without an API key.",
                ENV_API_KEY
            )));
        }
        model.validate()?;
        let api_url = Url::parse(api_url)?;

        Ok(Self {
            api_url,
            api_key: api_key.trim().to_string(),
            model,
            timeout,
        })
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// `None` when remote completion is disabled.
    pub completion: Option<CompletionConfig>,
    /// JSON knowledge base overriding the built-in table.
    pub knowledge_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// Returns `AppError::Config` when remote completion is enabled without an API key,
    /// or when any numeric setting fails to parse.
    pub fn from_env() -> Result<Self, AppError> {
        let remote_enabled = match env::var(ENV_REMOTE_COMPLETION) {
            Ok(raw) => parse_bool(ENV_REMOTE_COMPLETION, &raw)?,
            Err(_) => false,
        };

        let completion = if remote_enabled {
            Some(Self::completion_from_env()?)
        } else {
            None
        };

        let knowledge_path = env::var(ENV_KNOWLEDGE_PATH)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let log_format = match env::var(ENV_LOG_FORMAT) {
            Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            completion,
            knowledge_path,
            log_format,
        })
    }

    /// Reads only the remote completion section. Used when the CLI forces remote mode on.
    pub fn completion_from_env() -> Result<CompletionConfig, AppError> {
        let api_key = env::var(ENV_API_KEY).unwrap_or_default();
        let api_url = env::var(ENV_API_URL).unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let defaults = ModelConfig::default();
        let model = ModelConfig {
            model_id: env::var(ENV_MODEL).unwrap_or(defaults.model_id),
            temperature: parse_env(ENV_TEMPERATURE)?.unwrap_or(defaults.temperature),
            max_tokens: parse_env(ENV_MAX_TOKENS)?.unwrap_or(defaults.max_tokens),
            system_prompt: defaults.system_prompt,
        };
        let timeout_secs: u64 = parse_env(ENV_TIMEOUT_SECS)?.unwrap_or(DEFAULT_TIMEOUT_SECS);

        CompletionConfig::new(&api_url, &api_key, model, Duration::from_secs(timeout_secs))
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(AppError::Config(format!("{} has an invalid value: {:?}", key, raw))),
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>, AppError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::Config(format!("{} has an invalid value: {:?}", key, raw))),
        Err(_) => Ok(None),
    }
}
