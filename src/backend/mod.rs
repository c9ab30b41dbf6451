//! Backend module - the model backend trait and its adapters

pub mod chat;
pub mod ollama;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{BackendConfig, ProtocolType};
use crate::error::Result;

pub use chat::ChatCompletionBackend;
pub use ollama::OllamaBackend;

/// Trait for model backends.
///
/// Each adapter owns the full request/response translation for one
/// upstream integration: it derives the prompt or message set from the
/// raw user query, performs the network call, and extracts the answer
/// text. Every request is independent; adapters hold no mutable state.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Short protocol name, for logs and the health endpoint
    fn name(&self) -> &str;

    /// Forward the user query to the upstream model and return its answer.
    async fn generate(&self, query: &str) -> Result<String>;

    /// Probe upstream reachability.
    async fn health_check(&self) -> bool;
}

/// Create the backend adapter selected by configuration.
///
/// Runs once at startup; the hosted adapter resolves its credential here.
pub fn create_backend(config: &BackendConfig) -> Result<Arc<dyn ModelBackend>> {
    match config.protocol {
        ProtocolType::Ollama => Ok(Arc::new(OllamaBackend::new(config)?)),
        ProtocolType::OpenAI => Ok(Arc::new(ChatCompletionBackend::new(config)?)),
    }
}
