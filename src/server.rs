//! HTTP surface for page consumers.
//!
//! Pages fetch the current value of their section, poll the status endpoint
//! for the translating flag and the global alert, and post language changes.

use crate::alert::{AlertBoard, GlobalAlert};
use crate::backend::TranslationBackend;
use crate::content::{ContentSetter, ContentStore, SectionId};
use crate::i18n::{Language, MetricsReport};
use crate::orchestrator::{SwitchOutcome, TranslationOrchestrator};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state behind every handler.
pub struct AppState<B> {
    pub orchestrator: TranslationOrchestrator<B>,
    pub content: Arc<ContentStore>,
    pub alerts: Arc<AlertBoard>,
}

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(serde_json::json!({
            "error": true,
            "message": message.into()
        })),
    )
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub language: Language,
    pub translating: bool,
    pub alert: Option<GlobalAlert>,
    pub metrics: MetricsReport,
}

/// One entry of the language selector.
#[derive(Debug, Serialize)]
pub struct LanguageOption {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
    pub selected: bool,
}

#[derive(Debug, Deserialize)]
pub struct LanguageRequest {
    pub language: String,
    #[serde(default)]
    pub page: String,
}

#[derive(Debug, Serialize)]
pub struct LanguageResponse {
    pub language: Language,
    /// Section translated before responding, absent when no translation ran
    pub priority_section: Option<SectionId>,
    pub priority_translated: bool,
    pub translating: bool,
}

/// Build the router over the given state.
pub fn router<B: TranslationBackend>(state: Arc<AppState<B>>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/content/:section", get(get_content::<B>))
        .route("/api/status", get(get_status::<B>))
        .route("/api/languages", get(list_languages::<B>))
        .route("/api/language", post(set_language::<B>))
        .route("/api/alert", delete(dismiss_alert::<B>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn get_content<B: TranslationBackend>(
    State(state): State<Arc<AppState<B>>>,
    Path(section): Path<String>,
) -> Result<Json<Value>, ApiError> {
    SectionId::from_name(&section)
        .and_then(|id| state.content.current(id))
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("Unknown section '{}'", section)))
}

async fn get_status<B: TranslationBackend>(
    State(state): State<Arc<AppState<B>>>,
) -> Json<StatusResponse> {
    Json(StatusResponse {
        language: state.orchestrator.language(),
        translating: state.orchestrator.is_translating(),
        alert: state.alerts.current(),
        metrics: state.orchestrator.metrics().report(),
    })
}

async fn list_languages<B: TranslationBackend>(
    State(state): State<Arc<AppState<B>>>,
) -> Json<Vec<LanguageOption>> {
    let selected = state.orchestrator.language();
    Json(
        Language::all_enabled()
            .into_iter()
            .map(|language| LanguageOption {
                code: language.code(),
                name: language.name(),
                native_name: language.native_name(),
                selected: language == selected,
            })
            .collect(),
    )
}

async fn set_language<B: TranslationBackend>(
    State(state): State<Arc<AppState<B>>>,
    Json(request): Json<LanguageRequest>,
) -> Result<Json<LanguageResponse>, ApiError> {
    let language = Language::parse(&request.language)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

    info!("Language change to {} on page '{}'", language, request.page);
    let outcome = state.orchestrator.switch(language, &request.page).await;

    let (priority_section, priority_translated) = match &outcome {
        SwitchOutcome::Translated {
            priority,
            priority_committed,
            ..
        } => (Some(*priority), *priority_committed),
        SwitchOutcome::Skipped | SwitchOutcome::Restored { .. } => (None, false),
    };

    // Background sections keep running after the response is sent
    drop(outcome);

    Ok(Json(LanguageResponse {
        language,
        priority_section,
        priority_translated,
        translating: state.orchestrator.is_translating(),
    }))
}

async fn dismiss_alert<B: TranslationBackend>(
    State(state): State<Arc<AppState<B>>>,
) -> StatusCode {
    state.alerts.dismiss();
    StatusCode::NO_CONTENT
}
