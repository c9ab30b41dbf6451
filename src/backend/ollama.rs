//! Local inference adapter speaking the Ollama generate API

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::backend::ModelBackend;
use crate::config::{settings::QUERY_PLACEHOLDER, BackendConfig};
use crate::error::{AppError, Result};

/// Answer substituted when the upstream reply carries no `response` field.
pub const FALLBACK_ANSWER: &str = "No response from model.";

/// Generate request sent to the local server
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
}

/// Generate reply; `response` may be absent
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateReply {
    #[serde(default)]
    pub response: Option<String>,
}

/// Adapter for a local Ollama-style inference server.
///
/// Renders the configured prompt template around the query and posts it to
/// `<endpoint>/api/generate`.
pub struct OllamaBackend {
    client: Client,
    endpoint: String,
    model: String,
    prompt_template: String,
}

impl OllamaBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(AppError::BackendUnreachable)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            prompt_template: config.prompt.template.clone(),
        })
    }

    fn render_prompt(&self, query: &str) -> String {
        self.prompt_template.replace(QUERY_PLACEHOLDER, query)
    }
}

#[async_trait]
impl ModelBackend for OllamaBackend {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(&self, query: &str) -> Result<String> {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: self.render_prompt(query),
        };

        let url = format!("{}/api/generate", self.endpoint);
        debug!(model = %request.model, url = %url, "sending generate request");

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::BackendStatus { status, body });
        }

        let reply: GenerateReply = response
            .json()
            .await
            .map_err(|e| AppError::MalformedResponse(e.to_string()))?;

        Ok(reply
            .response
            .unwrap_or_else(|| FALLBACK_ANSWER.to_string()))
    }

    async fn health_check(&self) -> bool {
        // any HTTP reply means the server is up
        self.client.get(&self.endpoint).send().await.is_ok()
    }
}
