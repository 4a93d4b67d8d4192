//! Internationalization (i18n) module for multi-language support.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported languages and their metadata
//! - `language`: Validated `Language` type
//! - `messages`: Localized failure messages, one per error kind and language
//! - `metrics`: Translation counters
//!
//! # Example
//!
//! ```rust,ignore
//! use law_school_site::i18n::{get_error_message, Language};
//! use law_school_site::error::ErrorKind;
//!
//! let korean = Language::from_code("ko")?;
//! let msg = get_error_message(ErrorKind::Timeout, korean);
//! ```

mod language;
mod messages;
mod metrics;
mod registry;

pub use language::Language;
pub use messages::{get_error_message, ErrorMessage, ErrorMessages};
pub use metrics::{MetricsReport, TranslationMetrics};
pub use registry::{LanguageConfig, LanguageRegistry};
