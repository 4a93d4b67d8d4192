//! Integration tests for the law school site content service
//!
//! These tests run the real OpenAI backend against a mock server, with
//! content loaded from files, and drive language switches end to end through
//! the orchestrator and the HTTP API.

mod common;

use common::tag_strings;
use law_school_site::alert::{AlertBoard, AlertType};
use law_school_site::backend::OpenAiBackend;
use law_school_site::config::Config;
use law_school_site::content::{ContentSetter, ContentStore, SectionId};
use law_school_site::error::ErrorKind;
use law_school_site::i18n::{get_error_message, Language};
use law_school_site::orchestrator::TranslationOrchestrator;
use law_school_site::server::{router, AppState};
use law_school_site::translation::CONTENT_MARKER;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, Request, Respond, ResponseTemplate,
};

// ==================== Test Helpers ====================

/// Create a test config pointing at the mock server, with a content file
fn create_test_config(api_url: &str, api_key: Option<&str>, temp_dir: &TempDir) -> Config {
    let content_path = temp_dir.path().join("content.json");
    std::fs::write(&content_path, sample_content().to_string()).expect("Failed to write content");

    Config {
        openai_api_key: api_key.map(str::to_string),
        openai_model: "gpt-4o-mini".to_string(),
        openai_api_url: format!("{}/v1/chat/completions", api_url),
        translation_max_retries: 1,
        translation_initial_delay_ms: 10,
        translation_max_delay_ms: 50,
        translation_timeout_ms: 2000,
        content_file: content_path.to_str().unwrap().to_string(),
        port: 0,
    }
}

fn sample_content() -> Value {
    json!({
        "Home Content": {"title": "Welcome", "links": ["Apply", "Visit"]},
        "Admissions": {"title": "Admissions", "deadline": "March 1", "seats": 120},
        "Faculty": {"title": "Faculty", "members": [{"name": "Eleanor Park", "role": "Dean"}]}
    })
}

fn chat_completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

/// Mock model that tags every string of the prompt's JSON with "ko"
struct EchoTranslator {
    /// Drop a key from the answer to simulate structural drift
    corrupt: bool,
}

impl Respond for EchoTranslator {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).expect("request body is JSON");
        let prompt = body["messages"][0]["content"].as_str().expect("prompt");
        let (_, payload) = prompt.split_once(CONTENT_MARKER).expect("prompt has content");
        let content: Value = serde_json::from_str(payload.trim()).expect("payload is JSON");

        let mut translated = tag_strings(&content, "ko");
        if self.corrupt {
            if let Some(map) = translated.as_object_mut() {
                map.remove("title");
            }
        }

        ResponseTemplate::new(200).set_body_json(chat_completion(&format!(
            "```json\n{}\n```",
            translated
        )))
    }
}

fn build(
    config: &Config,
) -> (
    TranslationOrchestrator<OpenAiBackend>,
    Arc<ContentStore>,
    Arc<AlertBoard>,
) {
    let content = Arc::new(ContentStore::load(&config.content_file).expect("content loads"));
    let alerts = Arc::new(AlertBoard::new());
    let orchestrator = TranslationOrchestrator::new(
        OpenAiBackend::new(config),
        config.retry_config(),
        content.clone(),
        alerts.clone(),
    );
    (orchestrator, content, alerts)
}

async fn switch_and_settle(
    orchestrator: &TranslationOrchestrator<OpenAiBackend>,
    language: Language,
    page: &str,
) {
    let outcome = orchestrator.switch(language, page).await;
    if let Some(background) = outcome.into_background() {
        background.wait().await;
    }
}

// ==================== Shipped Content Tests ====================

#[test]
fn test_shipped_content_file_has_every_section() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/content.json");
    let store = ContentStore::load(path).expect("shipped content loads");

    assert_eq!(store.sections(), SectionId::ALL.to_vec());
}

// ==================== Translation Flow Tests ====================

#[tokio::test]
async fn test_full_switch_through_openai_backend() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), Some("test-openai-key"), &temp_dir);

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer test-openai-key"))
        .respond_with(EchoTranslator { corrupt: false })
        .expect(3)
        .mount(&mock_server)
        .await;

    let (orchestrator, content, alerts) = build(&config);
    switch_and_settle(&orchestrator, Language::KOREAN, "admissions").await;

    let sample = sample_content();
    for section in content.sections() {
        let expected = tag_strings(&sample[section.name()], "ko");
        assert_eq!(content.current(section), Some(expected), "{}", section);
    }
    // Non-string leaves pass through untouched
    assert_eq!(content.current(SectionId::Admissions).unwrap()["seats"], 120);
    assert!(alerts.current().is_none());
    assert!(!orchestrator.is_translating());
}

#[tokio::test]
async fn test_rejected_key_is_not_retried_and_alerts_in_target_language() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), Some("revoked-key"), &temp_dir);

    // One request per section: 401 is never retried
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Incorrect API key provided"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let (orchestrator, content, alerts) = build(&config);
    switch_and_settle(&orchestrator, Language::KOREAN, "home").await;

    let sample = sample_content();
    for section in content.sections() {
        assert_eq!(content.current(section).as_ref(), Some(&sample[section.name()]));
    }

    let alert = alerts.current().expect("alert raised");
    let text = get_error_message(ErrorKind::ApiKeyInvalid, Language::KOREAN);
    assert!(alert.message.starts_with(&text.title));
    assert_eq!(alert.alert_type, AlertType::Error);
    assert_eq!(orchestrator.metrics().api_failures(), 3);
}

#[tokio::test]
async fn test_missing_key_makes_no_requests() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), None, &temp_dir);

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (orchestrator, _content, alerts) = build(&config);
    switch_and_settle(&orchestrator, Language::SPANISH, "home").await;

    let alert = alerts.current().expect("alert raised");
    let text = get_error_message(ErrorKind::ApiKeyMissing, Language::SPANISH);
    assert!(alert.message.contains(&text.message));
}

#[tokio::test]
async fn test_structural_drift_is_never_committed() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), Some("test-openai-key"), &temp_dir);

    // Each section: first attempt plus one retry
    Mock::given(method("POST"))
        .respond_with(EchoTranslator { corrupt: true })
        .expect(6)
        .mount(&mock_server)
        .await;

    let (orchestrator, content, alerts) = build(&config);
    switch_and_settle(&orchestrator, Language::KOREAN, "faculty").await;

    let sample = sample_content();
    for section in content.sections() {
        assert_eq!(content.current(section).as_ref(), Some(&sample[section.name()]));
    }
    let alert = alerts.current().expect("alert raised");
    assert_eq!(alert.alert_type, AlertType::Error);
    assert_eq!(orchestrator.metrics().sections_committed(), 0);
}

#[tokio::test]
async fn test_slow_backend_times_out_per_attempt() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let mut config = create_test_config(&mock_server.uri(), Some("test-openai-key"), &temp_dir);
    config.translation_max_retries = 0;
    config.translation_timeout_ms = 100;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_completion(r#"{"title":"late"}"#))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let (orchestrator, _content, alerts) = build(&config);
    let started = std::time::Instant::now();
    switch_and_settle(&orchestrator, Language::JAPANESE, "home").await;

    assert!(started.elapsed() < Duration::from_secs(1));
    let alert = alerts.current().expect("alert raised");
    assert_eq!(alert.alert_type, AlertType::Warning);
    let text = get_error_message(ErrorKind::Timeout, Language::JAPANESE);
    assert!(alert.message.starts_with(&text.title));
}

// ==================== HTTP API Tests ====================

#[tokio::test]
async fn test_http_api_against_live_listener() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), Some("test-openai-key"), &temp_dir);

    Mock::given(method("POST"))
        .respond_with(EchoTranslator { corrupt: false })
        .mount(&mock_server)
        .await;

    let (orchestrator, content, alerts) = build(&config);
    let app = router(Arc::new(AppState {
        orchestrator,
        content,
        alerts,
    }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await });

    let client = reqwest::Client::new();
    let base = format!("http://{}", addr);

    let health = client.get(format!("{}/health", base)).send().await.unwrap();
    assert_eq!(health.text().await.unwrap(), "ok");

    let switched: Value = client
        .post(format!("{}/api/language", base))
        .json(&json!({"language": "ko", "page": "faculty"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(switched["priority_section"], "Faculty");
    assert_eq!(switched["priority_translated"], true);

    let faculty: Value = client
        .get(format!("{}/api/content/faculty", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(faculty["members"][0]["name"], "[ko] Eleanor Park");

    let status: Value = client
        .get(format!("{}/api/status", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status["language"], "ko");
    assert_eq!(status["alert"], Value::Null);
    assert_eq!(status["metrics"]["runs_started"], 1);

    let missing = client
        .get(format!("{}/api/content/library", base))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), 404);
}
