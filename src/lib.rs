//! Medical Query Gateway
//!
//! A Rust-based relay that accepts free-text medical queries over HTTP and
//! forwards them to an LLM backend (a local inference server or a hosted
//! chat-completion API) behind a single adapter trait.

pub mod api;
pub mod backend;
pub mod config;
pub mod error;

pub use error::{AppError, Result};

use std::sync::Arc;

use backend::ModelBackend;
use config::Settings;

/// Application state shared across all handlers.
///
/// Built once at startup; nothing in it is mutated afterwards.
pub struct AppState {
    pub settings: Arc<Settings>,
    pub backend: Arc<dyn ModelBackend>,
}
