//! Global alert: the banner shown when a section could not be translated.

use crate::error::ErrorKind;
use crate::i18n::{get_error_message, Language};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalAlert {
    pub active: bool,
    pub message: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub raised_at: DateTime<Utc>,
}

impl GlobalAlert {
    /// Localized alert for a failed translation into `language`.
    ///
    /// Configuration problems are errors; transient backend trouble is a
    /// warning since a later switch may well succeed.
    pub fn for_translation_failure(kind: ErrorKind, language: Language) -> Self {
        let text = get_error_message(kind, language);
        let alert_type = match kind {
            ErrorKind::ApiKeyMissing | ErrorKind::ApiKeyInvalid | ErrorKind::Unknown => {
                AlertType::Error
            }
            ErrorKind::NetworkError | ErrorKind::Timeout | ErrorKind::RateLimit => {
                AlertType::Warning
            }
        };

        Self {
            active: true,
            message: format!("{}: {} {}", text.title, text.message, text.action),
            alert_type,
            raised_at: Utc::now(),
        }
    }
}

/// Where the orchestrator sends alerts. Owned outside the translation core.
pub trait AlertSink: Send + Sync {
    fn raise(&self, alert: GlobalAlert);
}

/// Holds the most recent alert until it is dismissed.
#[derive(Debug, Default)]
pub struct AlertBoard {
    current: Mutex<Option<GlobalAlert>>,
}

impl AlertBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active alert, if any.
    pub fn current(&self) -> Option<GlobalAlert> {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .filter(|alert| alert.active)
    }

    pub fn dismiss(&self) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(alert) = current.as_mut() {
            alert.active = false;
        }
    }
}

impl AlertSink for AlertBoard {
    fn raise(&self, alert: GlobalAlert) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = Some(alert);
    }
}
