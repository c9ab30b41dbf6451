//! Backend adapter integration tests

use med_query_gateway::{
    backend::{create_backend, ChatCompletionBackend, ModelBackend, OllamaBackend},
    config::{BackendAuth, BackendConfig, ProtocolType},
    AppError,
};
use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

fn ollama_config(endpoint: &str) -> BackendConfig {
    BackendConfig {
        endpoint: endpoint.to_string(),
        ..BackendConfig::default()
    }
}

fn hosted_config(endpoint: &str) -> BackendConfig {
    BackendConfig {
        protocol: ProtocolType::OpenAI,
        endpoint: endpoint.to_string(),
        auth: BackendAuth {
            token_env: "MED_GATEWAY_TEST_NO_SUCH_VAR".to_string(),
            api_key: Some("test-key".to_string()),
        },
        ..BackendConfig::default()
    }
}

#[tokio::test]
async fn factory_selects_adapter_by_protocol() {
    let ollama = create_backend(&ollama_config("http://localhost:11434")).unwrap();
    assert_eq!(ollama.name(), "ollama");

    let hosted = create_backend(&hosted_config("https://api.groq.com/openai/v1")).unwrap();
    assert_eq!(hosted.name(), "openai");
}

#[tokio::test]
async fn factory_fails_for_hosted_backend_without_credential() {
    let mut config = hosted_config("https://api.groq.com/openai/v1");
    config.auth.api_key = None;

    assert!(matches!(
        create_backend(&config),
        Err(AppError::MissingCredential(_))
    ));
}

#[tokio::test]
async fn ollama_generate_posts_model_and_rendered_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"response": "an answer"})),
        )
        .mount(&server)
        .await;

    let backend = OllamaBackend::new(&ollama_config(&server.uri())).unwrap();
    let answer = backend.generate("should I see a doctor").await.unwrap();
    assert_eq!(answer, "an answer");

    let requests = server.received_requests().await.unwrap();
    let outbound: Value = requests[0].body_json().unwrap();
    assert_eq!(outbound["model"], json!("medllama2"));
    let prompt = outbound["prompt"].as_str().unwrap();
    assert!(prompt.contains("should I see a doctor"));
    assert!(!prompt.contains("{query}"));
}

#[tokio::test]
async fn ollama_generate_maps_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(404).set_body_string("model not found"))
        .mount(&server)
        .await;

    let backend = OllamaBackend::new(&ollama_config(&server.uri())).unwrap();
    let err = backend.generate("hello").await.unwrap_err();

    match err {
        AppError::BackendStatus { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "model not found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn chat_generate_extracts_first_choice_only() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                {"message": {"role": "assistant", "content": "first"}},
                {"message": {"role": "assistant", "content": "second"}}
            ]
        })))
        .mount(&server)
        .await;

    let backend = ChatCompletionBackend::new(&hosted_config(&server.uri())).unwrap();
    let answer = backend.generate("hello").await.unwrap();
    assert_eq!(answer, "first");
}

#[tokio::test]
async fn chat_generate_maps_auth_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let backend = ChatCompletionBackend::new(&hosted_config(&server.uri())).unwrap();
    let err = backend.generate("hello").await.unwrap_err();

    assert!(err.to_string().contains("401"));
    assert!(err.to_string().contains("invalid api key"));
}

#[tokio::test]
async fn chat_health_check_accepts_auth_challenge() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let backend = ChatCompletionBackend::new(&hosted_config(&server.uri())).unwrap();
    assert!(backend.health_check().await);
}

#[tokio::test]
async fn health_check_fails_when_unreachable() {
    let backend = OllamaBackend::new(&ollama_config("http://127.0.0.1:9")).unwrap();
    assert!(!backend.health_check().await);
}
