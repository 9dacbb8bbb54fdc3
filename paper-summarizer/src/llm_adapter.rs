use crate::config::{
    ApiType, LlmSettings, ModelEndpoint, DEFAULT_AZURE_API_VERSION, DEFAULT_OPENAI_BASE_URL,
};
use crate::types::{Result, SummarizerError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Trait for LLM adapters that turn a feed document into a summary
#[async_trait]
pub trait LlmAdapter: Send + Sync {
    /// Get the name of this LLM adapter
    fn adapter_name(&self) -> String;

    /// Send `feed_xml` to the model under `instruction` and return its reply.
    /// `Ok(None)` means the model answered without any content.
    async fn compose_summary(&self, feed_xml: &str, instruction: &str) -> Result<Option<String>>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completions client for OpenAI and Azure OpenAI endpoints.
pub struct OpenAiCompatibleAdapter {
    client: Client,
    endpoint: ModelEndpoint,
    settings: LlmSettings,
}

impl OpenAiCompatibleAdapter {
    pub fn new(endpoint: ModelEndpoint, settings: LlmSettings) -> Result<Self> {
        if endpoint.api_type == ApiType::Azure && endpoint.base_url.is_none() {
            return Err(SummarizerError::Config(
                "Azure endpoints require a base_url".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        info!(
            "Initialized OpenAiCompatibleAdapter: model={}, api_type={:?}",
            endpoint.model, endpoint.api_type
        );

        Ok(Self {
            client,
            endpoint,
            settings,
        })
    }

    fn completions_url(&self) -> String {
        match self.endpoint.api_type {
            ApiType::OpenAi => {
                let base = self
                    .endpoint
                    .base_url
                    .as_deref()
                    .unwrap_or(DEFAULT_OPENAI_BASE_URL)
                    .trim_end_matches('/');
                format!("{}/chat/completions", base)
            }
            ApiType::Azure => {
                let base = self
                    .endpoint
                    .base_url
                    .as_deref()
                    .unwrap_or_default()
                    .trim_end_matches('/');
                let version = self
                    .endpoint
                    .api_version
                    .as_deref()
                    .unwrap_or(DEFAULT_AZURE_API_VERSION);
                format!(
                    "{}/openai/deployments/{}/chat/completions?api-version={}",
                    base, self.endpoint.model, version
                )
            }
        }
    }
}

#[async_trait]
impl LlmAdapter for OpenAiCompatibleAdapter {
    fn adapter_name(&self) -> String {
        format!("openai-compatible ({})", self.endpoint.model)
    }

    async fn compose_summary(&self, feed_xml: &str, instruction: &str) -> Result<Option<String>> {
        let start_time = Instant::now();

        let body = ChatCompletionRequest {
            // Azure routes by deployment name in the path
            model: match self.endpoint.api_type {
                ApiType::OpenAi => Some(self.endpoint.model.as_str()),
                ApiType::Azure => None,
            },
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: instruction,
                },
                ChatMessage {
                    role: "user",
                    content: feed_xml,
                },
            ],
            temperature: self.settings.temperature,
            seed: self.settings.seed,
        };

        let url = self.completions_url();
        debug!("Sending {} bytes of feed to {}", feed_xml.len(), url);

        let request = self.client.post(&url).json(&body);
        let request = match self.endpoint.api_type {
            ApiType::OpenAi => request.bearer_auth(&self.endpoint.api_key),
            ApiType::Azure => request.header("api-key", &self.endpoint.api_key),
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(SummarizerError::Llm(format!(
                "HTTP {}: {}",
                status,
                error_body.trim()
            )));
        }

        let completion: ChatCompletionResponse = serde_json::from_slice(&response.bytes().await?)?;
        let reply = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);

        match &reply {
            Some(content) => info!(
                reply_bytes = content.len(),
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                "Summary received"
            ),
            None => warn!("Model returned no reply content"),
        }

        Ok(reply)
    }
}

/// Mock LLM adapter for development and testing
pub struct MockLlmAdapter {
    name: String,
    reply: Option<String>,
    received: Mutex<Vec<(String, String)>>,
}

impl MockLlmAdapter {
    /// Adapter that answers every request with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            name: "mock".to_string(),
            reply: Some(reply.into()),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Adapter that never produces a reply.
    pub fn silent() -> Self {
        Self {
            name: "mock-silent".to_string(),
            reply: None,
            received: Mutex::new(Vec::new()),
        }
    }

    /// `(feed_xml, instruction)` pairs seen so far.
    pub async fn received(&self) -> Vec<(String, String)> {
        self.received.lock().await.clone()
    }
}

#[async_trait]
impl LlmAdapter for MockLlmAdapter {
    fn adapter_name(&self) -> String {
        format!("Mock LLM Adapter ({})", self.name)
    }

    async fn compose_summary(&self, feed_xml: &str, instruction: &str) -> Result<Option<String>> {
        self.received
            .lock()
            .await
            .push((feed_xml.to_string(), instruction.to_string()));

        Ok(self.reply.clone())
    }
}
