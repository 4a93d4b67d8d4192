use crate::backend::TranslationBackend;
use crate::content::check_shape;
use crate::error::TranslationError;
use crate::i18n::Language;
use crate::retry::{with_retry_if, RetryConfig};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

/// Line after which every prompt carries the serialized content
pub const CONTENT_MARKER: &str = "JSON to translate:";

static OPENING_FENCE_REGEX: OnceLock<Regex> = OnceLock::new();
static CLOSING_FENCE_REGEX: OnceLock<Regex> = OnceLock::new();

/// Build the prompt for translating a serialized content value
fn build_translation_prompt(content_json: &str, target_language: &str) -> String {
    format!(
        r#"You are a professional translator for a law school website. Translate the JSON below from English to {target_language}.

## Rules

### Structure (must be preserved exactly):
- Keep every key, the nesting, and the length of every array unchanged
- Translate only string values; never translate or rename keys
- Leave numbers, booleans and null untouched

### DO NOT translate:
- URLs, email addresses and phone numbers
- Names of people, courts, cases and statutes
- Course codes and citation formats

### Output:
- Return only the raw JSON value
- No markdown code fences, no commentary

{CONTENT_MARKER}
{content_json}"#
    )
}

/// Remove a leading ```json / ``` fence and a trailing ``` fence.
///
/// Each marker is stripped on its own, so a reply with only one of them is
/// still cleaned up.
fn strip_code_fences(text: &str) -> &str {
    let opening = OPENING_FENCE_REGEX
        .get_or_init(|| Regex::new(r"^\s*```[A-Za-z]*").expect("valid opening fence regex"));
    let closing = CLOSING_FENCE_REGEX
        .get_or_init(|| Regex::new(r"```\s*$").expect("valid closing fence regex"));

    let text = opening.find(text).map_or(text, |m| &text[m.end()..]);
    let text = closing.find(text).map_or(text, |m| &text[..m.start()]);
    text.trim()
}

/// Translate every string leaf of `content` into `target_language`.
///
/// The result has exactly the shape of the input: the backend's answer is
/// parsed and checked against the input's structure before it is returned.
/// Translating into the source language returns the content unchanged
/// without contacting the backend.
pub async fn translate_content<B, T>(
    backend: &B,
    content: &T,
    target_language: Language,
) -> Result<T, TranslationError>
where
    B: TranslationBackend + ?Sized,
    T: Serialize + DeserializeOwned + Clone,
{
    if target_language.is_canonical() {
        return Ok(content.clone());
    }

    let source = serde_json::to_value(content)?;
    let prompt = build_translation_prompt(
        &serde_json::to_string_pretty(&source)?,
        target_language.name(),
    );

    let response = backend.generate(&prompt).await?;
    let cleaned = strip_code_fences(&response);
    if cleaned.is_empty() {
        return Err(TranslationError::EmptyResponse);
    }

    let translated: Value = serde_json::from_str(cleaned)?;
    check_shape(&source, &translated)?;

    Ok(serde_json::from_value(translated)?)
}

/// `translate_content` wrapped in the retry policy.
///
/// Non-retryable failures (missing or rejected key, HTTP 400/404) are
/// returned after a single attempt.
pub async fn translate_with_retry<B, T>(
    backend: &B,
    content: &T,
    target_language: Language,
    retry: &RetryConfig,
    operation_name: &str,
) -> Result<T, TranslationError>
where
    B: TranslationBackend + ?Sized,
    T: Serialize + DeserializeOwned + Clone,
{
    debug!("{}: translating into {}", operation_name, target_language);
    with_retry_if(
        retry,
        operation_name,
        || translate_content(backend, content, target_language),
        TranslationError::is_retryable,
    )
    .await
}
