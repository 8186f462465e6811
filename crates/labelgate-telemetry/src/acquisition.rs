//! Label acquisition metrics
//!
//! Counters are kept locally for snapshots and mirrored to the `metrics`
//! facade, so any installed recorder (Prometheus, statsd, ...) sees them too.

use metrics::{counter, describe_counter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Per-learner acquisition counters
#[derive(Clone)]
pub struct LearnerMetrics {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    learner: &'static str,
    examples: AtomicU64,
    warm_up_forwards: AtomicU64,
    labels_acquired: AtomicU64,
    skipped: AtomicU64,
    budget_exhausted: AtomicU64,
    uncertainty_queries: AtomicU64,
    unlabeled_rejected: AtomicU64,
}

impl LearnerMetrics {
    /// Create a metrics collector tagged with the learner kind
    pub fn new(learner: &'static str) -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                learner,
                examples: AtomicU64::new(0),
                warm_up_forwards: AtomicU64::new(0),
                labels_acquired: AtomicU64::new(0),
                skipped: AtomicU64::new(0),
                budget_exhausted: AtomicU64::new(0),
                uncertainty_queries: AtomicU64::new(0),
                unlabeled_rejected: AtomicU64::new(0),
            }),
        }
    }

    /// Learner kind these metrics are tagged with
    pub fn learner(&self) -> &'static str {
        self.inner.learner
    }

    /// Record an incoming example
    pub fn record_example(&self) {
        self.inner.examples.fetch_add(1, Ordering::Relaxed);
        counter!("labelgate_examples_total", "learner" => self.inner.learner).increment(1);
    }

    /// Record an example forwarded during warm-up
    pub fn record_warm_up(&self) {
        self.inner.warm_up_forwards.fetch_add(1, Ordering::Relaxed);
        counter!("labelgate_warm_up_forwards_total", "learner" => self.inner.learner)
            .increment(1);
    }

    /// Record a label acquired by the selection policy
    pub fn record_acquired(&self) {
        self.inner.labels_acquired.fetch_add(1, Ordering::Relaxed);
        counter!("labelgate_labels_acquired_total", "learner" => self.inner.learner)
            .increment(1);
    }

    /// Record an example the policy declined
    pub fn record_skipped(&self) {
        self.inner.skipped.fetch_add(1, Ordering::Relaxed);
        counter!("labelgate_skipped_total", "learner" => self.inner.learner).increment(1);
    }

    /// Record an example skipped because the observed cost exceeded the budget
    pub fn record_budget_exhausted(&self) {
        self.inner.budget_exhausted.fetch_add(1, Ordering::Relaxed);
        counter!("labelgate_budget_exhausted_total", "learner" => self.inner.learner)
            .increment(1);
    }

    /// Record a posterior query against the wrapped classifier
    pub fn record_query(&self) {
        self.inner.uncertainty_queries.fetch_add(1, Ordering::Relaxed);
        counter!("labelgate_uncertainty_queries_total", "learner" => self.inner.learner)
            .increment(1);
    }

    /// Record an unlabeled example that was selected but could not be learned
    pub fn record_unlabeled(&self) {
        self.inner.unlabeled_rejected.fetch_add(1, Ordering::Relaxed);
        counter!("labelgate_unlabeled_rejected_total", "learner" => self.inner.learner)
            .increment(1);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            examples: self.inner.examples.load(Ordering::Relaxed),
            warm_up_forwards: self.inner.warm_up_forwards.load(Ordering::Relaxed),
            labels_acquired: self.inner.labels_acquired.load(Ordering::Relaxed),
            skipped: self.inner.skipped.load(Ordering::Relaxed),
            budget_exhausted: self.inner.budget_exhausted.load(Ordering::Relaxed),
            uncertainty_queries: self.inner.uncertainty_queries.load(Ordering::Relaxed),
            unlabeled_rejected: self.inner.unlabeled_rejected.load(Ordering::Relaxed),
        }
    }
}

impl std::fmt::Debug for LearnerMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LearnerMetrics")
            .field("learner", &self.inner.learner)
            .field("snapshot", &self.snapshot())
            .finish()
    }
}

/// Snapshot of current metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub examples: u64,
    pub warm_up_forwards: u64,
    pub labels_acquired: u64,
    pub skipped: u64,
    pub budget_exhausted: u64,
    pub uncertainty_queries: u64,
    pub unlabeled_rejected: u64,
}

impl MetricsSnapshot {
    /// Examples handed to the wrapped classifier, warm-up included
    pub fn forwarded(&self) -> u64 {
        self.warm_up_forwards + self.labels_acquired
    }

    /// Fraction of examples forwarded to the wrapped classifier
    pub fn labeling_rate(&self) -> f64 {
        if self.examples == 0 {
            0.0
        } else {
            self.forwarded() as f64 / self.examples as f64
        }
    }

    /// Fraction of post-warm-up examples acquired by the selection policy
    pub fn acquisition_rate(&self) -> f64 {
        let gated = self.examples.saturating_sub(self.warm_up_forwards);
        if gated == 0 {
            0.0
        } else {
            self.labels_acquired as f64 / gated as f64
        }
    }
}

/// Register descriptions for every labelgate counter with the installed recorder
pub fn describe_metrics() {
    describe_counter!("labelgate_examples_total", "Examples seen by active learners");
    describe_counter!(
        "labelgate_warm_up_forwards_total",
        "Examples forwarded unconditionally during the mercy period"
    );
    describe_counter!(
        "labelgate_labels_acquired_total",
        "Labels acquired by the selection policy"
    );
    describe_counter!("labelgate_skipped_total", "Examples declined by the selection policy");
    describe_counter!(
        "labelgate_budget_exhausted_total",
        "Examples skipped because the observed labeling cost exceeded the budget"
    );
    describe_counter!(
        "labelgate_uncertainty_queries_total",
        "Posterior queries issued to the wrapped classifier"
    );
    describe_counter!(
        "labelgate_unlabeled_rejected_total",
        "Unlabeled examples selected for acquisition without an oracle"
    );
}
