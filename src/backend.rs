use crate::config::Config;
use crate::error::TranslationError;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// A generative-text service that answers a prompt with JSON-constrained text.
///
/// Any service that accepts a prompt and can be told to reply with raw JSON
/// fits here; orchestration does not depend on which one is used.
pub trait TranslationBackend: Send + Sync + 'static {
    fn generate(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, TranslationError>> + Send;
}

/// OpenAI Chat Completion request with JSON output mode
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    response_format: ResponseFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

/// Check if a model is a reasoning model that doesn't support temperature
fn is_reasoning_model(model: &str) -> bool {
    model.starts_with("gpt-5")
        || model.starts_with("o1")
        || model.starts_with("o3")
        || model.starts_with("o4")
}

/// Chat-completions backend (OpenAI or any compatible endpoint).
#[derive(Debug, Clone)]
pub struct OpenAiBackend {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
    request_timeout: Duration,
}

impl OpenAiBackend {
    pub fn new(config: &Config) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            api_url: config.openai_api_url.clone(),
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
            request_timeout: config.translation_timeout(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: Some(prompt.to_string()),
            }],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            // Translation wants determinism; reasoning models reject the parameter
            temperature: if is_reasoning_model(&self.model) {
                None
            } else {
                Some(0.2)
            },
        }
    }
}

impl TranslationBackend for OpenAiBackend {
    async fn generate(&self, prompt: &str) -> Result<String, TranslationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(TranslationError::MissingApiKey)?;
        let transport = |e: reqwest::Error| TranslationError::from_transport(e, self.request_timeout);

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .timeout(self.request_timeout)
            .json(&self.build_request(prompt))
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(TranslationError::from_status(status.as_u16(), body));
        }

        let body = response.text().await.map_err(transport)?;
        let chat_response: ChatResponse = serde_json::from_str(&body)?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(TranslationError::EmptyResponse)
    }
}
