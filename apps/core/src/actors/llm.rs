use crate::actors::messages::{ActorError, AppError, CompletionRequest, LlmMessage};
use crate::actors::traits::LlmActor;
use crate::config::CompletionConfig;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{debug, error, info};

/// A handle to the `LlmActor`.
///
/// This struct provides a public, cloneable interface for sending messages to the
/// running LLM actor. It abstracts away the `mpsc::Sender`.
#[derive(Clone)]
pub struct LlmActorHandle {
    sender: mpsc::Sender<LlmMessage>,
    request_timeout: Duration,
}

impl LlmActorHandle {
    /// Creates a new `LlmActor` and returns a handle to it.
    ///
    /// This will spawn the `LlmActorRunner` in a new Tokio task, so it must be called
    /// from within a Tokio runtime. Fails with `AppError::Config` when the API key is
    /// blank or the HTTP client cannot be built.
    pub fn new(config: CompletionConfig) -> Result<Self, AppError> {
        let request_timeout = config.timeout;
        let (sender, receiver) = mpsc::channel(32);
        let actor = LlmActorRunner::new(receiver, CompletionClient::new(config)?);
        tokio::spawn(async move { actor.run().await });
        Ok(Self {
            sender,
            request_timeout,
        })
    }
}

#[async_trait]
impl LlmActor for LlmActorHandle {
    async fn generate(&self, request: CompletionRequest) -> Result<String, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = LlmMessage::Generate {
            request,
            responder: send,
        };

        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Actor(ActorError::Internal(e.to_string())))?;
        // The runner never queues requests behind each other, so this only waits on one call.
        timeout(self.request_timeout + HANDLE_GRACE, recv)
            .await
            .map_err(|e| AppError::Actor(ActorError::from(e)))?
            .map_err(|e| AppError::Actor(ActorError::Internal(e.to_string())))?
    }
}

// --- Constants ---
/// Slack on top of the HTTP timeout so the runner reports its own timeout first.
const HANDLE_GRACE: Duration = Duration::from_secs(2);

// --- Actor Runner (Internal Logic) ---
struct LlmActorRunner {
    receiver: mpsc::Receiver<LlmMessage>,
    client: CompletionClient,
}

impl LlmActorRunner {
    fn new(receiver: mpsc::Receiver<LlmMessage>, client: CompletionClient) -> Self {
        Self { receiver, client }
    }

    async fn run(mut self) {
        info!("LlmActor started (endpoint: {})", self.client.endpoint);

        while let Some(msg) = self.receiver.recv().await {
            self.handle_message(msg);
        }

        info!("LlmActor stopped");
    }

    /// Each request runs in its own task so concurrent sessions don't wait on each other.
    fn handle_message(&self, msg: LlmMessage) {
        match msg {
            LlmMessage::Generate { request, responder } => {
                let client = self.client.clone();
                tokio::spawn(async move {
                    let result = client.generate_completion(request).await;
                    if let Err(e) = &result {
                        error!("Remote completion failed: {}", e);
                    }
                    let _ = responder.send(result);
                });
            }
        }
    }
}

/// HTTP side of the actor. Cheap to clone: `reqwest::Client` shares its pool.
#[derive(Clone)]
struct CompletionClient {
    endpoint: String,
    model_id: String,
    http: Client,
    headers: HeaderMap,
}

impl CompletionClient {
    fn new(config: CompletionConfig) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        let auth_value = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| AppError::Config(format!("API key is not a valid header value: {}", e)))?;
        headers.insert(AUTHORIZATION, auth_value);

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: config.api_url.to_string(),
            model_id: config.model.model_id,
            http,
            headers,
        })
    }

    async fn generate_completion(&self, request: CompletionRequest) -> Result<String, AppError> {
        info!(
            model = %self.model_id,
            max_tokens = request.max_tokens,
            "Requesting remote completion"
        );
        debug!("Remote completion prompt: {}", request.prompt);

        let payload = json!({
            "model": self.model_id,
            "messages": [
                {"role": "system", "content": request.system_prompt},
                {"role": "user", "content": request.prompt}
            ],
            "max_tokens": request.max_tokens,
            "temperature": request.temperature
        });

        let res = self
            .http
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .json(&payload)
            .send()
            .await?;

        let status = res.status();

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::Actor(ActorError::LlmError(format!(
                "Completion request failed with status {}: {}",
                status, body
            ))));
        }

        let json: Value = res
            .json()
            .await
            .map_err(|e| AppError::Actor(ActorError::LlmError(e.to_string())))?;

        extract_content(&json)
    }
}

/// Pulls `choices[0].message.content` out of a chat-completions body.
fn extract_content(json: &Value) -> Result<String, AppError> {
    json["choices"][0]["message"]["content"]
        .as_str()
        .map(|s| s.trim().to_string())
        .ok_or_else(|| {
            AppError::Actor(ActorError::LlmError(
                "Malformed completion response: missing choices[0].message.content".to_string(),
            ))
        })
}
