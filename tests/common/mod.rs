#![allow(dead_code)]

use law_school_site::backend::TranslationBackend;
use law_school_site::content::{ContentSetter, ContentStore, SectionId};
use law_school_site::error::TranslationError;
use law_school_site::retry::RetryConfig;
use law_school_site::translation::CONTENT_MARKER;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Fake backend that "translates" by tagging every string with the target
/// language name, after a per-section delay. Sections are recognised by the
/// `heading` field of their content.
pub struct ScriptedBackend {
    default_delay: Duration,
    delays: HashMap<SectionId, Duration>,
    failures: HashMap<SectionId, u16>,
    calls: Arc<Mutex<Vec<SectionId>>>,
}

impl ScriptedBackend {
    pub fn new(default_delay: Duration) -> Self {
        Self {
            default_delay,
            delays: HashMap::new(),
            failures: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_delay(mut self, section: SectionId, delay: Duration) -> Self {
        self.delays.insert(section, delay);
        self
    }

    /// Fail every call for `section` with the given HTTP status.
    pub fn failing(mut self, section: SectionId, status: u16) -> Self {
        self.failures.insert(section, status);
        self
    }

    /// Sections the backend was asked to translate, in call order.
    pub fn call_log(&self) -> Arc<Mutex<Vec<SectionId>>> {
        Arc::clone(&self.calls)
    }
}

pub fn tag_strings(value: &Value, tag: &str) -> Value {
    match value {
        Value::String(s) => Value::String(format!("[{}] {}", tag, s)),
        Value::Array(items) => Value::Array(items.iter().map(|v| tag_strings(v, tag)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), tag_strings(v, tag)))
                .collect(),
        ),
        other => other.clone(),
    }
}

impl TranslationBackend for ScriptedBackend {
    async fn generate(&self, prompt: &str) -> Result<String, TranslationError> {
        let language = prompt
            .split_once("from English to ")
            .and_then(|(_, rest)| rest.split_once('.'))
            .map(|(name, _)| name.to_string())
            .ok_or(TranslationError::EmptyResponse)?;
        let (_, payload) = prompt
            .split_once(CONTENT_MARKER)
            .ok_or(TranslationError::EmptyResponse)?;
        let content: Value = serde_json::from_str(payload.trim())?;
        let section = content["heading"]
            .as_str()
            .and_then(SectionId::from_name)
            .ok_or(TranslationError::EmptyResponse)?;

        self.calls.lock().unwrap().push(section);

        let delay = self.delays.get(&section).copied().unwrap_or(self.default_delay);
        tokio::time::sleep(delay).await;

        if let Some(status) = self.failures.get(&section) {
            return Err(TranslationError::from_status(*status, "scripted failure".to_string()));
        }

        Ok(tag_strings(&content, &language).to_string())
    }
}

pub fn section_source(section: SectionId) -> Value {
    json!({
        "heading": section.name(),
        "paragraphs": [
            format!("About {}", section.name()),
            "Contact the registrar for details"
        ],
        "order": 1
    })
}

/// A store holding English content for every section.
pub fn sample_store() -> ContentStore {
    ContentStore::new(
        SectionId::ALL
            .into_iter()
            .map(|section| (section, section_source(section)))
            .collect(),
    )
}

/// Whether the section currently shows content tagged for `language`.
pub fn shows(store: &ContentStore, section: SectionId, language: &str) -> bool {
    store.current(section)
        == Some(tag_strings(&section_source(section), language))
}

/// Whether the section currently shows its English source.
pub fn shows_source(store: &ContentStore, section: SectionId) -> bool {
    store.current(section) == Some(section_source(section))
}

/// No retries and a generous attempt timeout, so timings are the backend's own.
pub fn single_attempt() -> RetryConfig {
    RetryConfig::new(0, Duration::from_millis(10)).with_timeout(Duration::from_secs(5))
}
