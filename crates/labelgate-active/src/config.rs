//! Configuration for active learners

use crate::budget::validate_budget;
use crate::random::DEFAULT_SEED;
use crate::{ActiveLearner, FixedBudget, RandomSampling, StrategyKind, UncertaintySampling};
use labelgate_classifiers::Classifier;
use labelgate_core::{Error, PosteriorSelection, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Active learner configuration, tagged by selection strategy
///
/// ```yaml
/// strategy: uncertainty
/// budget: 0.2
/// uncertainty_strategy: VarUncertainty
/// mercy_period: 50
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum ActiveLearnerConfig {
    /// Budget-managed random acquisition
    Random(RandomConfig),

    /// Acquisition driven by the wrapped classifier's confidence
    Uncertainty(UncertaintyConfig),
}

impl Default for ActiveLearnerConfig {
    fn default() -> Self {
        Self::Uncertainty(UncertaintyConfig::default())
    }
}

impl ActiveLearnerConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from file; `.json` files are read as JSON, anything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }

    /// Check every parameter range
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Random(config) => config.validate(),
            Self::Uncertainty(config) => config.validate(),
        }
    }

    /// Wrap `classifier` in the configured learner
    pub fn build<C>(&self, classifier: C) -> Result<Box<dyn ActiveLearner<Label = C::Label>>>
    where
        C: Classifier + 'static,
    {
        match self {
            Self::Random(config) => Ok(Box::new(config.build(classifier)?)),
            Self::Uncertainty(config) => Ok(Box::new(UncertaintySampling::new(classifier, config)?)),
        }
    }
}

/// Random acquisition configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RandomConfig {
    /// Fraction of examples to acquire
    #[serde(default = "default_budget")]
    pub budget: f64,

    /// Seed of the decision generator
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            budget: default_budget(),
            seed: default_seed(),
        }
    }
}

impl RandomConfig {
    /// Check every parameter range
    pub fn validate(&self) -> Result<()> {
        validate_budget(self.budget)
    }

    /// Wrap `classifier` with a fixed budget manager
    pub fn build<C: Classifier>(&self, classifier: C) -> Result<RandomSampling<C, FixedBudget>> {
        Ok(RandomSampling::new(
            classifier,
            FixedBudget::new(self.budget)?,
            self.seed,
        ))
    }
}

/// Uncertainty sampling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UncertaintyConfig {
    /// Target labeling rate after warm-up
    #[serde(default = "default_budget")]
    pub budget: f64,

    /// Strategy deciding on each example
    #[serde(default)]
    pub uncertainty_strategy: StrategyKind,

    /// Threshold of [`StrategyKind::FixedUncertainty`]
    #[serde(default = "default_fixed_threshold")]
    pub fixed_threshold: f64,

    /// Adaptation rate of the variable strategies
    #[serde(default = "default_step_value")]
    pub step_value: f64,

    /// Examples always learned before selection starts
    #[serde(default = "default_mercy_period")]
    pub mercy_period: u64,

    /// Seed of the decision generator
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// How confidence is read from a posterior
    #[serde(default)]
    pub posterior_selection: PosteriorSelection,
}

impl Default for UncertaintyConfig {
    fn default() -> Self {
        Self {
            budget: default_budget(),
            uncertainty_strategy: StrategyKind::default(),
            fixed_threshold: default_fixed_threshold(),
            step_value: default_step_value(),
            mercy_period: default_mercy_period(),
            seed: default_seed(),
            posterior_selection: PosteriorSelection::default(),
        }
    }
}

impl UncertaintyConfig {
    /// Set the target labeling rate
    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = budget;
        self
    }

    /// Set the strategy
    pub fn with_strategy(mut self, kind: StrategyKind) -> Self {
        self.uncertainty_strategy = kind;
        self
    }

    /// Set the strategy by configuration name
    pub fn with_strategy_name(self, name: &str) -> Result<Self> {
        Ok(self.with_strategy(name.parse()?))
    }

    /// Set the fixed threshold
    pub fn with_fixed_threshold(mut self, threshold: f64) -> Self {
        self.fixed_threshold = threshold;
        self
    }

    /// Set the adaptation rate
    pub fn with_step_value(mut self, step: f64) -> Self {
        self.step_value = step;
        self
    }

    /// Set the number of warm-up examples
    pub fn with_mercy_period(mut self, mercy_period: u64) -> Self {
        self.mercy_period = mercy_period;
        self
    }

    /// Set the seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set how confidence is read from a posterior
    pub fn with_posterior_selection(mut self, selection: PosteriorSelection) -> Self {
        self.posterior_selection = selection;
        self
    }

    /// Check every parameter range
    pub fn validate(&self) -> Result<()> {
        validate_budget(self.budget)?;

        if !(self.step_value > 0.0 && self.step_value < 1.0) {
            return Err(Error::config(format!(
                "step_value must be within (0, 1), got {}",
                self.step_value
            )));
        }

        if !self.fixed_threshold.is_finite() {
            return Err(Error::config(format!(
                "fixed_threshold must be finite, got {}",
                self.fixed_threshold
            )));
        }

        Ok(())
    }
}

fn default_budget() -> f64 {
    FixedBudget::DEFAULT_BUDGET
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_fixed_threshold() -> f64 {
    0.9
}

fn default_step_value() -> f64 {
    0.01
}

fn default_mercy_period() -> u64 {
    100
}
