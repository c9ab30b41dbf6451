//! Configuration module

pub mod settings;

pub use settings::{
    BackendAuth, BackendConfig, LoggingConfig, PromptConfig, ProtocolType, SamplingConfig,
    ServerConfig, Settings,
};
