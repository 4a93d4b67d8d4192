//! Translation metrics and observability module.
//!
//! Counters for backend calls, failures and section commits, owned by an
//! orchestrator and exposed through the status endpoint.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Translation counters.
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Language switches that started a translation run
    runs_started: AtomicUsize,

    /// Section translations handed to the backend (after retries, one per section)
    api_calls: AtomicUsize,

    /// Section translations that failed after all retries
    api_failures: AtomicUsize,

    /// Translated sections written to the content store
    sections_committed: AtomicUsize,

    /// Results dropped because a newer run superseded theirs
    stale_discarded: AtomicUsize,
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_run_started(&self) {
        self.runs_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_api_call(&self) {
        self.api_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_api_failure(&self) {
        self.api_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_commit(&self) {
        self.sections_committed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stale_discard(&self) {
        self.stale_discarded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn runs_started(&self) -> usize {
        self.runs_started.load(Ordering::Relaxed)
    }

    pub fn api_calls(&self) -> usize {
        self.api_calls.load(Ordering::Relaxed)
    }

    pub fn api_failures(&self) -> usize {
        self.api_failures.load(Ordering::Relaxed)
    }

    pub fn sections_committed(&self) -> usize {
        self.sections_committed.load(Ordering::Relaxed)
    }

    pub fn stale_discarded(&self) -> usize {
        self.stale_discarded.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let calls = self.api_calls();
        let failures = self.api_failures();
        let api_success_rate = if calls > 0 {
            (calls.saturating_sub(failures) as f64 / calls as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            runs_started: self.runs_started(),
            api_calls: calls,
            api_failures: failures,
            api_success_rate,
            sections_committed: self.sections_committed(),
            stale_discarded: self.stale_discarded(),
        }
    }
}

/// Snapshot of the translation counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub runs_started: usize,
    pub api_calls: usize,
    pub api_failures: usize,
    /// API success rate as a percentage (0-100)
    pub api_success_rate: f64,
    pub sections_committed: usize,
    pub stale_discarded: usize,
}
