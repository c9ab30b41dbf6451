//! Configuration loading tests

use med_query_gateway::config::{ProtocolType, Settings};

#[test]
fn load_without_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load_from_path(dir.path().join("missing.yaml")).unwrap();

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.backend.protocol, ProtocolType::Ollama);
    assert_eq!(settings.backend.endpoint, "http://localhost:11434");
    assert_eq!(settings.backend.model, "medllama2");
    assert_eq!(settings.backend.timeout_ms, 30_000);
    assert!(settings.validate().is_ok());
}

#[test]
fn load_yaml_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gateway.yaml");
    std::fs::write(
        &path,
        r#"
server:
  port: 9099
logging:
  format: pretty
backend:
  protocol: openai
  endpoint: https://api.groq.com/openai/v1
  model: llama3-groq-70b-8192-tool-use-preview
  timeout_ms: 5000
  auth:
    token_env: MY_PROVIDER_KEY
"#,
    )
    .unwrap();

    let settings = Settings::load_from_path(&path).unwrap();

    assert_eq!(settings.server.port, 9099);
    assert_eq!(settings.logging.format, "pretty");
    assert_eq!(settings.backend.protocol, ProtocolType::OpenAI);
    assert_eq!(settings.backend.endpoint, "https://api.groq.com/openai/v1");
    assert_eq!(
        settings.backend.model,
        "llama3-groq-70b-8192-tool-use-preview"
    );
    assert_eq!(settings.backend.timeout_ms, 5000);
    assert_eq!(settings.backend.auth.token_env, "MY_PROVIDER_KEY");
    assert!(settings.validate().is_ok());
}

#[test]
fn load_yaml_partial_backend_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gateway.yaml");
    std::fs::write(
        &path,
        r#"
backend:
  endpoint: http://inference-host:11434
"#,
    )
    .unwrap();

    let settings = Settings::load_from_path(&path).unwrap();

    assert_eq!(settings.backend.endpoint, "http://inference-host:11434");
    assert_eq!(settings.backend.model, "medllama2");
    assert_eq!(settings.backend.sampling.max_tokens, 1024);
}

#[test]
fn validation_rejects_empty_endpoint() {
    let mut settings = Settings::default();
    settings.backend.endpoint = String::new();
    assert!(settings.validate().is_err());
}

#[test]
fn validation_rejects_empty_model() {
    let mut settings = Settings::default();
    settings.backend.model = String::new();
    assert!(settings.validate().is_err());
}

#[test]
fn validation_rejects_zero_timeout() {
    let mut settings = Settings::default();
    settings.backend.timeout_ms = 0;
    assert!(settings.validate().is_err());
}
