//! Random active learning
//!
//! Every incoming example draws a uniform value that is handed to a
//! [`BudgetManager`]; the example is learned only when the manager acquires
//! its label. The generator is private to the learner and seeded, so a given
//! seed always produces the same decision sequence.

use crate::{Acquisition, ActiveLearner, BudgetManager, FixedBudget};
use labelgate_classifiers::Classifier;
use labelgate_core::{Error, Features, Posterior, Result};
use labelgate_telemetry::LearnerMetrics;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

/// Default seed of the learner's generator
pub const DEFAULT_SEED: u64 = 42;

/// Active learner acquiring labels at random within a budget
pub struct RandomSampling<C, B = FixedBudget> {
    classifier: C,
    budget_manager: B,
    seed: u64,
    rng: StdRng,
    metrics: LearnerMetrics,
}

impl<C: Classifier> RandomSampling<C, FixedBudget> {
    /// Wrap `classifier` with a 10% fixed budget and the default seed
    pub fn with_defaults(classifier: C) -> Self {
        Self::new(classifier, FixedBudget::default(), DEFAULT_SEED)
    }
}

impl<C: Classifier, B: BudgetManager> RandomSampling<C, B> {
    /// Wrap `classifier`, acquiring labels through `budget_manager`
    pub fn new(classifier: C, budget_manager: B, seed: u64) -> Self {
        info!(
            classifier = classifier.name(),
            budget = budget_manager.budget(),
            seed,
            "random sampling learner created"
        );

        Self {
            classifier,
            budget_manager,
            seed,
            rng: StdRng::seed_from_u64(seed),
            metrics: LearnerMetrics::new("random"),
        }
    }

    /// Seed of the decision generator
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The budget manager making acquisition decisions
    pub fn budget_manager(&self) -> &B {
        &self.budget_manager
    }

    /// The wrapped classifier
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Unwrap the classifier
    pub fn into_inner(self) -> C {
        self.classifier
    }
}

impl<C: Classifier, B: BudgetManager> ActiveLearner for RandomSampling<C, B> {
    fn observe(&mut self, x: &Features, y: Option<&C::Label>) -> Result<Acquisition> {
        self.metrics.record_example();

        let value: f64 = self.rng.gen();
        if !self.budget_manager.is_above(value) {
            debug!(value, "label declined");
            self.metrics.record_skipped();
            return Ok(Acquisition::Skipped);
        }

        match y {
            Some(y) => {
                debug!(value, label = ?y, "label acquired");
                self.classifier.learn_one(x, y)?;
                self.metrics.record_acquired();
                Ok(Acquisition::Acquired)
            }
            None => {
                // TODO: queue the example for an oracle and learn it once labeled
                warn!(value, "unlabeled example selected for acquisition");
                self.metrics.record_unlabeled();
                Err(Error::unsupported(
                    "acquiring labels for unlabeled examples requires an oracle query",
                ))
            }
        }
    }

    fn last_label_report(&mut self) -> u64 {
        self.budget_manager.label_acquisition_report()
    }

    fn metrics(&self) -> &LearnerMetrics {
        &self.metrics
    }
}

impl<C: Classifier, B: BudgetManager> Classifier for RandomSampling<C, B> {
    type Label = C::Label;

    fn learn_one(&mut self, x: &Features, y: &Self::Label) -> Result<()> {
        self.observe(x, Some(y)).map(|_| ())
    }

    fn predict_proba_one(&self, x: &Features) -> Result<Posterior<Self::Label>> {
        self.classifier.predict_proba_one(x)
    }

    fn predict_one(&self, x: &Features) -> Result<Option<Self::Label>> {
        self.classifier.predict_one(x)
    }

    fn name(&self) -> &str {
        "random_sampling"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labelgate_classifiers::ComplementNB;
    use labelgate_core::bag_of_words;

    fn learner(budget: f64, seed: u64) -> RandomSampling<ComplementNB<String>> {
        RandomSampling::new(ComplementNB::new(), FixedBudget::new(budget).unwrap(), seed)
    }

    fn decisions(learner: &mut RandomSampling<ComplementNB<String>>, n: usize) -> Vec<bool> {
        let x = bag_of_words("a b c");
        let y = "label".to_string();
        (0..n)
            .map(|_| learner.observe(&x, Some(&y)).unwrap().is_forwarded())
            .collect()
    }

    #[test]
    fn test_seeded_reproducibility() {
        let mut first = learner(0.3, 7);
        let mut second = learner(0.3, 7);
        assert_eq!(decisions(&mut first, 500), decisions(&mut second, 500));
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut first = learner(0.5, 1);
        let mut second = learner(0.5, 2);
        assert_ne!(decisions(&mut first, 200), decisions(&mut second, 200));
    }

    #[test]
    fn test_end_to_end_window_report() {
        let mut al = learner(0.5, 42);
        let forwarded = decisions(&mut al, 1_000).iter().filter(|d| **d).count() as u64;

        let report = al.last_label_report();
        assert_eq!(report, forwarded);
        assert!((440..=560).contains(&report), "acquired {}", report);
        assert_eq!(al.last_label_report(), 0);

        // The wrapped model saw exactly the acquired examples
        assert_eq!(al.classifier().class_count(&"label".to_string()), forwarded);
    }

    #[test]
    fn test_zero_budget_never_learns() {
        let mut al = learner(0.0, 42);
        assert!(decisions(&mut al, 300).iter().all(|d| !d));
        assert!(al.predict_proba_one(&bag_of_words("a")).unwrap().is_empty());
    }

    #[test]
    fn test_unlabeled_acquisition_is_unsupported() {
        let mut al = learner(1.0, 42);
        let err = al.observe(&bag_of_words("a"), None).unwrap_err();
        assert!(err.is_unsupported());
        assert_eq!(al.metrics().snapshot().unlabeled_rejected, 1);
    }

    #[test]
    fn test_unlabeled_skip_is_not_an_error() {
        let mut al = learner(0.0, 42);
        let outcome = al.observe(&bag_of_words("a"), None).unwrap();
        assert_eq!(outcome, Acquisition::Skipped);
    }

    #[test]
    fn test_defaults() {
        let al = RandomSampling::with_defaults(ComplementNB::<String>::new());
        assert_eq!(al.seed(), DEFAULT_SEED);
        assert_eq!(al.budget_manager().budget(), 0.1);
        assert_eq!(al.name(), "random_sampling");
    }
}
