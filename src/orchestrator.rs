//! Language-switch orchestration.
//!
//! A switch translates the section shown on the current page first and
//! reports back as soon as that one section settles; every other section is
//! translated concurrently in a detached task. Each section is its own error
//! boundary: a failure is logged, counted and surfaced as a global alert, and
//! the section keeps whatever it showed before.
//!
//! Every run is tagged with a generation number. Results from a run that has
//! since been superseded are dropped instead of written, and only the newest
//! run may clear the translating flag.

use crate::alert::{AlertSink, GlobalAlert};
use crate::backend::TranslationBackend;
use crate::content::{ContentSetter, SectionId};
use crate::error::detect_error_type;
use crate::i18n::{Language, TranslationMetrics};
use crate::pages::priority_section;
use crate::retry::RetryConfig;
use crate::translation::translate_with_retry;
use futures::future::join_all;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Where the orchestrator is in its switch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrchestratorState {
    /// Content is settled in this language
    Idle(Language),
    /// A run toward `to` has started and its priority section has not settled
    Translating {
        from: Language,
        to: Language,
        generation: u64,
    },
}

impl OrchestratorState {
    /// The language most recently selected.
    pub fn target(&self) -> Language {
        match self {
            OrchestratorState::Idle(language) => *language,
            OrchestratorState::Translating { to, .. } => *to,
        }
    }

    /// The language whose priority section last settled.
    pub fn settled(&self) -> Language {
        match self {
            OrchestratorState::Idle(language) => *language,
            OrchestratorState::Translating { from, .. } => *from,
        }
    }
}

/// Handle on the background sections of one run.
#[derive(Debug)]
pub struct BackgroundRun {
    handle: JoinHandle<()>,
}

impl BackgroundRun {
    /// Wait for every background section of the run to settle.
    pub async fn wait(self) {
        if let Err(e) = self.handle.await {
            let message = e.to_string();
            error!(
                "Background translation task failed ({:?}): {}",
                detect_error_type(&message),
                message
            );
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// What a call to `switch` did.
#[derive(Debug)]
pub enum SwitchOutcome {
    /// English to English: nothing to do
    Skipped,
    /// Back to English: every section restored from its source
    Restored { generation: u64 },
    /// A translation run; the priority section has settled
    Translated {
        generation: u64,
        priority: SectionId,
        priority_committed: bool,
        background: BackgroundRun,
    },
}

impl SwitchOutcome {
    /// Background sections of the run, if it started any.
    pub fn into_background(self) -> Option<BackgroundRun> {
        match self {
            SwitchOutcome::Translated { background, .. } => Some(background),
            _ => None,
        }
    }
}

struct Inner<B> {
    backend: B,
    retry: RetryConfig,
    content: Arc<dyn ContentSetter>,
    alerts: Arc<dyn AlertSink>,
    generation: AtomicU64,
    state: Mutex<OrchestratorState>,
    translating: watch::Sender<bool>,
    metrics: TranslationMetrics,
}

/// Drives language switches over a set of content sections.
///
/// Cheap to clone; clones share state.
pub struct TranslationOrchestrator<B> {
    inner: Arc<Inner<B>>,
}

impl<B> Clone for TranslationOrchestrator<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: TranslationBackend> TranslationOrchestrator<B> {
    /// Create an orchestrator idle in the canonical language.
    pub fn new(
        backend: B,
        retry: RetryConfig,
        content: Arc<dyn ContentSetter>,
        alerts: Arc<dyn AlertSink>,
    ) -> Self {
        let (translating, _) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                backend,
                retry,
                content,
                alerts,
                generation: AtomicU64::new(0),
                state: Mutex::new(OrchestratorState::Idle(Language::canonical())),
                translating,
                metrics: TranslationMetrics::new(),
            }),
        }
    }

    /// Receiver for the translating flag (true while a priority section is pending).
    pub fn subscribe_translating(&self) -> watch::Receiver<bool> {
        self.inner.translating.subscribe()
    }

    pub fn is_translating(&self) -> bool {
        *self.inner.translating.borrow()
    }

    pub fn state(&self) -> OrchestratorState {
        self.inner.current_state()
    }

    /// The language most recently selected.
    pub fn language(&self) -> Language {
        self.state().target()
    }

    pub fn metrics(&self) -> &TranslationMetrics {
        &self.inner.metrics
    }

    /// Switch the displayed content to `target` while `page` is shown.
    ///
    /// Returns once the page's priority section has settled. Remaining
    /// sections continue in the background; await
    /// `SwitchOutcome::into_background` to wait for them.
    pub async fn switch(&self, target: Language, page: &str) -> SwitchOutcome {
        let inner = &self.inner;

        let (from, generation) = {
            let mut state = inner.lock_state();
            if target.is_canonical() && *state == OrchestratorState::Idle(target) {
                debug!("Already showing {}, nothing to translate", target);
                return SwitchOutcome::Skipped;
            }

            let generation = inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
            let from = state.settled();

            if target.is_canonical() {
                *state = OrchestratorState::Idle(target);
                // Under the state lock so no stale commit can land after the restore
                inner.restore_sources();
                inner.translating.send_replace(false);
                info!("Restored source content (run {})", generation);
                return SwitchOutcome::Restored { generation };
            }

            *state = OrchestratorState::Translating {
                from,
                to: target,
                generation,
            };
            inner.translating.send_replace(true);
            inner.metrics.record_run_started();
            (from, generation)
        };

        let priority = priority_section(page);
        info!(
            "Switching {} -> {} for page '{}' (run {}, priority {})",
            from, target, page, generation, priority
        );

        let background_sections: Vec<SectionId> = inner
            .content
            .sections()
            .into_iter()
            .filter(|section| *section != priority)
            .collect();

        let background = {
            let inner = Arc::clone(inner);
            BackgroundRun {
                handle: tokio::spawn(async move {
                    let runs = background_sections
                        .into_iter()
                        .map(|section| inner.translate_section(section, target, generation));
                    let committed = join_all(runs).await.into_iter().filter(|ok| *ok).count();
                    debug!("Run {}: {} background sections committed", generation, committed);
                }),
            }
        };

        let priority_committed = inner.translate_section(priority, target, generation).await;

        {
            let mut state = inner.lock_state();
            if inner.is_current(generation) {
                *state = OrchestratorState::Idle(target);
                inner.translating.send_replace(false);
            } else {
                debug!("Run {} superseded before its priority section settled", generation);
            }
        }

        SwitchOutcome::Translated {
            generation,
            priority,
            priority_committed,
            background,
        }
    }
}

impl<B: TranslationBackend> Inner<B> {
    fn lock_state(&self) -> std::sync::MutexGuard<'_, OrchestratorState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn current_state(&self) -> OrchestratorState {
        *self.lock_state()
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Write a section only if `generation` is still the newest run.
    ///
    /// Runs start and restores happen under the state lock, so holding it
    /// here keeps the check and the write together.
    fn commit_if_current(&self, section: SectionId, value: Value, generation: u64) -> bool {
        let _state = self.lock_state();
        if !self.is_current(generation) {
            return false;
        }
        self.content.replace(section, value);
        true
    }

    fn restore_sources(&self) {
        for section in self.content.sections() {
            if let Some(source) = self.content.source(section) {
                self.content.replace(section, source);
            }
        }
    }

    /// Translate one section and commit it if its run is still current.
    ///
    /// Never fails: errors end here. Returns whether a value was committed.
    async fn translate_section(&self, section: SectionId, target: Language, generation: u64) -> bool {
        let Some(source) = self.content.source(section) else {
            warn!("No content for section {}, skipping", section);
            return false;
        };

        self.metrics.record_api_call();
        let result =
            translate_with_retry(&self.backend, &source, target, &self.retry, section.name()).await;

        match result {
            Ok(translated) => {
                if !self.commit_if_current(section, translated, generation) {
                    self.metrics.record_stale_discard();
                    debug!("Discarding {} from superseded run {}", section, generation);
                    return false;
                }
                self.metrics.record_commit();
                debug!("Committed {} in {}", section, target);
                true
            }
            Err(e) => {
                let kind = e.kind();
                self.metrics.record_api_failure();
                error!(
                    "Failed to translate {} into {} ({:?}): {}",
                    section, target, kind, e
                );
                if self.is_current(generation) {
                    self.alerts
                        .raise(GlobalAlert::for_translation_failure(kind, target));
                }
                false
            }
        }
    }
}
