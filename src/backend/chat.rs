//! Hosted chat-completion adapter (OpenAI compatible: Groq, OpenAI, vLLM)

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::backend::ModelBackend;
use crate::config::{BackendConfig, SamplingConfig};
use crate::error::{AppError, Result};

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Chat completion request.
///
/// `stream` is always serialized; the relay never streams.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub stream: bool,
}

/// Chat completion response; only the fields the relay reads
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

/// Adapter for a hosted chat-completion API.
///
/// Sends the configured system instruction plus the user query as a
/// two-message conversation with fixed sampling parameters, and extracts
/// the first choice's message content.
pub struct ChatCompletionBackend {
    client: Client,
    endpoint: String,
    model: String,
    system_prompt: String,
    sampling: SamplingConfig,
    headers: HeaderMap,
}

impl ChatCompletionBackend {
    /// Build the adapter, resolving the credential once.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(AppError::BackendUnreachable)?;

        let api_key = config.auth.resolve()?;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| AppError::InvalidCredential(e.to_string()))?;
        headers.insert(AUTHORIZATION, bearer);

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            system_prompt: config.prompt.system.clone(),
            sampling: config.sampling.clone(),
            headers,
        })
    }

    fn build_request(&self, query: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: self.system_prompt.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: query.to_string(),
                },
            ],
            temperature: self.sampling.temperature,
            max_tokens: self.sampling.max_tokens,
            top_p: self.sampling.top_p,
            stream: false,
        }
    }
}

#[async_trait]
impl ModelBackend for ChatCompletionBackend {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, query: &str) -> Result<String> {
        let request = self.build_request(query);

        let url = format!("{}/chat/completions", self.endpoint);
        debug!(model = %request.model, url = %url, "sending chat completion request");

        let response = self
            .client
            .post(&url)
            .headers(self.headers.clone())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::BackendStatus { status, body });
        }

        let reply: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::MalformedResponse(e.to_string()))?;

        reply
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                AppError::MalformedResponse("completion contained no choices".to_string())
            })
    }

    async fn health_check(&self) -> bool {
        let url = format!("{}/models", self.endpoint);
        match self.client.get(&url).headers(self.headers.clone()).send().await {
            // 401 means the server is up but rejected the key
            Ok(response) => response.status().is_success() || response.status().as_u16() == 401,
            Err(_) => false,
        }
    }
}
