//! Uncertainty-based active learning
//!
//! The learner runs in two phases:
//! - Warm-up: the first `mercy_period` examples are always learned, so the
//!   wrapped classifier has something to base its confidence on.
//! - Steady: while the observed labeling cost after warm-up stays within the
//!   budget, the classifier's confidence on each example is handed to the
//!   configured [`UncertaintyStrategy`], and acquired examples are learned.

use crate::{Acquisition, ActiveLearner, StrategyKind, UncertaintyConfig, UncertaintyStrategy};
use labelgate_classifiers::Classifier;
use labelgate_core::{Error, Features, Posterior, PosteriorSelection, Result};
use labelgate_telemetry::LearnerMetrics;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

/// Active learner acquiring labels where the wrapped classifier is least confident
pub struct UncertaintySampling<C> {
    classifier: C,
    strategy: UncertaintyStrategy,
    selection: PosteriorSelection,
    budget: f64,
    mercy_period: u64,
    iteration: u64,
    cost_labeling: u64,
    acquired_labels: u64,
    num_classes: Option<usize>,
    rng: StdRng,
    metrics: LearnerMetrics,
}

impl<C: Classifier> UncertaintySampling<C> {
    /// Wrap `classifier` with the default configuration
    pub fn with_defaults(classifier: C) -> Self {
        let config = UncertaintyConfig::default();
        Self::build(classifier, &config)
    }

    /// Wrap `classifier` using `config`
    ///
    /// Fails with a configuration error if the budget, step value or fixed
    /// threshold are out of range.
    pub fn new(classifier: C, config: &UncertaintyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(classifier, config))
    }

    fn build(classifier: C, config: &UncertaintyConfig) -> Self {
        info!(
            classifier = classifier.name(),
            strategy = %config.uncertainty_strategy,
            budget = config.budget,
            mercy_period = config.mercy_period,
            seed = config.seed,
            "uncertainty sampling learner created"
        );

        Self {
            classifier,
            strategy: UncertaintyStrategy::new(
                config.uncertainty_strategy,
                config.fixed_threshold,
                config.step_value,
                config.budget,
            ),
            selection: config.posterior_selection,
            budget: config.budget,
            mercy_period: config.mercy_period,
            iteration: 0,
            cost_labeling: 0,
            acquired_labels: 0,
            num_classes: None,
            rng: StdRng::seed_from_u64(config.seed),
            metrics: LearnerMetrics::new("uncertainty"),
        }
    }

    /// Examples observed so far
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Examples forwarded to the wrapped classifier so far, warm-up included
    pub fn cost_labeling(&self) -> u64 {
        self.cost_labeling
    }

    /// Number of classes in the last posterior, `None` before the first query
    pub fn num_classes(&self) -> Option<usize> {
        self.num_classes
    }

    /// Whether the learner is still in its mercy period
    pub fn in_warm_up(&self) -> bool {
        self.iteration < self.mercy_period
    }

    /// Labeling cost observed after warm-up, `None` until the steady phase
    pub fn actual_cost(&self) -> Option<f64> {
        if self.iteration <= self.mercy_period {
            return None;
        }
        let spent = self.cost_labeling.saturating_sub(self.mercy_period);
        Some(spent as f64 / (self.iteration - self.mercy_period) as f64)
    }

    /// The strategy and its current state
    pub fn strategy(&self) -> &UncertaintyStrategy {
        &self.strategy
    }

    /// Name of the configured strategy
    pub fn strategy_kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    /// Target labeling rate
    pub fn budget(&self) -> f64 {
        self.budget
    }

    /// The wrapped classifier
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Unwrap the classifier
    pub fn into_inner(self) -> C {
        self.classifier
    }

    /// Hand an example to the wrapped classifier and count the label
    ///
    /// A failed `learn_one` leaves the counters untouched. A selected
    /// unlabeled example still spends budget.
    fn forward(&mut self, x: &Features, y: Option<&C::Label>) -> Result<()> {
        match y {
            Some(y) => {
                self.classifier.learn_one(x, y)?;
                self.cost_labeling += 1;
                self.acquired_labels += 1;
                Ok(())
            }
            None => {
                self.cost_labeling += 1;
                self.acquired_labels += 1;
                warn!(
                    iteration = self.iteration,
                    "unlabeled example selected for acquisition"
                );
                self.metrics.record_unlabeled();
                Err(Error::unsupported(
                    "acquiring labels for unlabeled examples requires an oracle query",
                ))
            }
        }
    }
}

impl<C: Classifier> ActiveLearner for UncertaintySampling<C> {
    fn observe(&mut self, x: &Features, y: Option<&C::Label>) -> Result<Acquisition> {
        self.iteration += 1;
        self.metrics.record_example();

        if self.iteration <= self.mercy_period {
            self.forward(x, y)?;
            self.metrics.record_warm_up();
            if self.iteration == self.mercy_period {
                info!(mercy_period = self.mercy_period, "warm-up complete");
            }
            return Ok(Acquisition::WarmUp);
        }

        // Steady phase always has iteration > mercy_period
        let actual_cost = self.actual_cost().unwrap_or(0.0);
        if actual_cost > self.budget {
            debug!(actual_cost, budget = self.budget, "budget exhausted");
            self.metrics.record_budget_exhausted();
            return Ok(Acquisition::BudgetExhausted);
        }

        let votes: Posterior<C::Label> = self.classifier.predict_proba_one(x)?;
        self.metrics.record_query();
        if self.num_classes != Some(votes.len()) {
            debug!(
                previous = ?self.num_classes,
                current = votes.len(),
                "number of classes changed"
            );
            self.num_classes = Some(votes.len());
        }

        let posterior = self.selection.select(&votes);
        if self
            .strategy
            .should_acquire(posterior, votes.len(), &mut self.rng)
        {
            debug!(posterior, threshold = ?self.strategy.threshold(), "label acquired");
            self.forward(x, y)?;
            self.metrics.record_acquired();
            Ok(Acquisition::Acquired)
        } else {
            debug!(posterior, threshold = ?self.strategy.threshold(), "label declined");
            self.metrics.record_skipped();
            Ok(Acquisition::Skipped)
        }
    }

    fn last_label_report(&mut self) -> u64 {
        std::mem::take(&mut self.acquired_labels)
    }

    fn metrics(&self) -> &LearnerMetrics {
        &self.metrics
    }
}

impl<C: Classifier> Classifier for UncertaintySampling<C> {
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
        "uncertainty_sampling"
    }
}
