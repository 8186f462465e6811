//! Active learner trait and decision outcomes

use labelgate_classifiers::Classifier;
use labelgate_core::{Features, Result};
use labelgate_telemetry::LearnerMetrics;

/// What an active learner did with an incoming example
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquisition {
    /// Forwarded unconditionally during the mercy period
    WarmUp,

    /// Selected by the policy and forwarded to the wrapped classifier
    Acquired,

    /// Declined by the policy
    Skipped,

    /// Not evaluated because the observed labeling cost exceeds the budget
    BudgetExhausted,
}

impl Acquisition {
    /// Whether the example reached the wrapped classifier
    pub fn is_forwarded(&self) -> bool {
        matches!(self, Self::WarmUp | Self::Acquired)
    }
}

/// A classifier wrapper that spends a labeling budget on selected examples
///
/// Learners also implement [`Classifier`]: a labeled `learn_one` goes through
/// the same gate as [`ActiveLearner::observe`], and predictions pass through
/// to the wrapped model untouched.
pub trait ActiveLearner: Classifier {
    /// Offer an example to the learner
    ///
    /// `y` is `None` when the example is unlabeled. Selecting an unlabeled
    /// example would require querying an oracle, which is not supported:
    /// that case fails with [`labelgate_core::Error::Unsupported`] instead of
    /// silently dropping the example.
    fn observe(&mut self, x: &Features, y: Option<&Self::Label>) -> Result<Acquisition>;

    /// Labels acquired since the last report; resets the window
    fn last_label_report(&mut self) -> u64;

    /// Acquisition counters for this learner
    fn metrics(&self) -> &LearnerMetrics;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwarded_outcomes() {
        assert!(Acquisition::WarmUp.is_forwarded());
        assert!(Acquisition::Acquired.is_forwarded());
        assert!(!Acquisition::Skipped.is_forwarded());
        assert!(!Acquisition::BudgetExhausted.is_forwarded());
    }
}
