//! Application settings and configuration management

use crate::error::{AppError, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Placeholder the user query is substituted into within the local prompt
/// template.
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Protocol spoken by the configured model backend
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolType {
    /// Local inference server speaking the Ollama generate API
    Ollama,
    /// Hosted OpenAI-compatible chat completion API (Groq, OpenAI, vLLM, ...)
    OpenAI,
}

impl Default for ProtocolType {
    fn default() -> Self {
        ProtocolType::Ollama
    }
}

impl std::fmt::Display for ProtocolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolType::Ollama => write!(f, "ollama"),
            ProtocolType::OpenAI => write!(f, "openai"),
        }
    }
}

/// Credential source for hosted backends.
///
/// `api_key` wins over `token_env`; the environment variable is read once,
/// when the adapter is constructed at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendAuth {
    #[serde(default = "default_token_env")]
    pub token_env: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_token_env() -> String {
    "GROQ_API_KEY".to_string()
}

impl Default for BackendAuth {
    fn default() -> Self {
        Self {
            token_env: default_token_env(),
            api_key: None,
        }
    }
}

impl BackendAuth {
    /// Resolve the credential, preferring the inline key.
    pub fn resolve(&self) -> Result<String> {
        if let Some(key) = &self.api_key {
            return Ok(key.clone());
        }
        std::env::var(&self.token_env)
            .map_err(|_| AppError::MissingCredential(self.token_env.clone()))
    }
}

/// Sampling parameters forwarded to chat-completion backends
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SamplingConfig {
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
}

fn default_temperature() -> f32 {
    0.5
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_top_p() -> f32 {
    0.85
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
        }
    }
}

/// Prompt configuration.
///
/// `template` is rendered by the local adapter and must contain the
/// `{query}` placeholder; `system` is the system instruction sent by the
/// chat-completion adapter. Both are opaque domain text.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PromptConfig {
    #[serde(default = "default_prompt_template")]
    pub template: String,
    #[serde(default = "default_system_prompt")]
    pub system: String,
}

fn default_prompt_template() -> String {
    DEFAULT_PROMPT_TEMPLATE.to_string()
}

fn default_system_prompt() -> String {
    "You are a highly specialized medical assistant for diabetic foot thermogram analysis. \
     Provide medically accurate and comprehensive responses."
        .to_string()
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            template: default_prompt_template(),
            system: default_system_prompt(),
        }
    }
}

const DEFAULT_PROMPT_TEMPLATE: &str = r#"
You are a highly specialized medical assistant with expertise in diabetic foot care and thermogram analysis. Your primary goal is to provide medically accurate, detailed, and empathetic responses to user queries. Consider the following guidelines when crafting your responses:

1. **Thermogram Analysis**:
   - Explain what specific heat patterns on a thermogram signify in the context of diabetic foot health.
   - Highlight correlations between thermogram findings and conditions like neuropathy, ischemia, or infection.

2. **Preventive Care**:
   - Provide actionable advice on preventing diabetic foot ulcers, such as hygiene, footwear, and monitoring.
   - Offer early intervention strategies for abnormalities detected in thermograms.

3. **Treatment Guidance**:
   - Suggest treatment options or next steps based on common thermogram patterns.
   - Always include the recommendation to consult a healthcare provider for personalized advice.

4. **Empathy and Simplicity**:
   - Respond in a way that is easy to understand for patients while maintaining medical accuracy.
   - Acknowledge the user's concerns and provide reassurance where appropriate.

5. **Evidence-Based Information**:
   - Base your responses on up-to-date medical research and practices in diabetic foot care.

**User Question**: {query}

**Your Response**:
"#;

/// Backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub protocol: ProtocolType,

    /// Base URL of the upstream server, without a trailing API path.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,

    #[serde(default)]
    pub auth: BackendAuth,

    #[serde(default)]
    pub prompt: PromptConfig,

    #[serde(default)]
    pub sampling: SamplingConfig,
}

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "medllama2".to_string()
}

fn default_timeout() -> u64 {
    30_000
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            protocol: ProtocolType::default(),
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_ms: default_timeout(),
            auth: BackendAuth::default(),
            prompt: PromptConfig::default(),
            sampling: SamplingConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file and environment
    /// variables.
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/gateway.yaml")
    }

    /// Load settings from a specific configuration file path.
    ///
    /// The file is optional; environment variables prefixed with
    /// `MED_GATEWAY` (separator `__`) override file values, which override
    /// coded defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let format = if path.extension().map_or(false, |ext| ext == "toml") {
            FileFormat::Toml
        } else {
            FileFormat::Yaml
        };

        let mut builder = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?
            .set_default("backend.endpoint", default_endpoint())?
            .set_default("backend.model", default_model())?
            .set_default("backend.timeout_ms", default_timeout() as i64)?;

        if path.exists() {
            builder = builder.add_source(File::from(path).format(format));
        }

        builder = builder.add_source(
            Environment::with_prefix("MED_GATEWAY")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "server port cannot be 0".to_string(),
            )));
        }

        if self.backend.endpoint.is_empty() {
            return Err(AppError::Config(config::ConfigError::Message(
                "backend endpoint cannot be empty".to_string(),
            )));
        }

        if self.backend.model.is_empty() {
            return Err(AppError::Config(config::ConfigError::Message(
                "backend model cannot be empty".to_string(),
            )));
        }

        if self.backend.timeout_ms == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "backend timeout cannot be 0".to_string(),
            )));
        }

        if self.backend.protocol == ProtocolType::Ollama
            && !self.backend.prompt.template.contains(QUERY_PLACEHOLDER)
        {
            return Err(AppError::Config(config::ConfigError::Message(format!(
                "prompt template must contain the {QUERY_PLACEHOLDER} placeholder"
            ))));
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            backend: BackendConfig::default(),
        }
    }
}
