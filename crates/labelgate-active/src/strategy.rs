//! Uncertainty strategies
//!
//! Each strategy turns the wrapped classifier's confidence on an example into
//! an acquire / skip decision. Strategies that adapt carry their own state;
//! the variant is chosen once when the learner is built.

use labelgate_core::{Error, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Name of an uncertainty strategy, as used in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Acquire when confidence is at or below a fixed threshold
    #[default]
    #[serde(rename = "FixedUncertainty", alias = "fixed_uncertainty")]
    FixedUncertainty,

    /// Acquire against a threshold that tightens on every acquisition
    #[serde(rename = "VarUncertainty", alias = "var_uncertainty")]
    VarUncertainty,

    /// Variable threshold applied to a randomly perturbed confidence
    #[serde(rename = "RandVarUncertainty", alias = "rand_var_uncertainty")]
    RandVarUncertainty,

    /// Acquire with a probability that grows as confidence drops
    #[serde(rename = "SelSampling", alias = "sel_sampling")]
    SelSampling,
}

impl StrategyKind {
    /// All available strategies
    pub const ALL: [StrategyKind; 4] = [
        Self::FixedUncertainty,
        Self::VarUncertainty,
        Self::RandVarUncertainty,
        Self::SelSampling,
    ];

    /// Canonical configuration name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FixedUncertainty => "FixedUncertainty",
            Self::VarUncertainty => "VarUncertainty",
            Self::RandVarUncertainty => "RandVarUncertainty",
            Self::SelSampling => "SelSampling",
        }
    }

    fn snake_name(&self) -> &'static str {
        match self {
            Self::FixedUncertainty => "fixed_uncertainty",
            Self::VarUncertainty => "var_uncertainty",
            Self::RandVarUncertainty => "rand_var_uncertainty",
            Self::SelSampling => "sel_sampling",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s || kind.snake_name() == s)
            .ok_or_else(|| {
                let available: Vec<_> = Self::ALL.iter().map(|k| k.as_str()).collect();
                Error::config(format!(
                    "strategy '{}' not available (expected one of: {})",
                    s,
                    available.join(", ")
                ))
            })
    }
}

/// Configured uncertainty strategy with its mutable state
#[derive(Debug, Clone, PartialEq)]
pub enum UncertaintyStrategy {
    /// Acquire iff `posterior <= threshold`
    Fixed { threshold: f64 },

    /// Acquire iff `posterior <= threshold`; the threshold shrinks by `step`
    /// on acquisition and grows by `step` on rejection
    Variable { threshold: f64, step: f64 },

    /// [`UncertaintyStrategy::Variable`] applied to `posterior / (N(0, 1) + 1)`
    RandomizedVariable { threshold: f64, step: f64 },

    /// Acquire with probability `budget / (budget + |posterior - 1| / classes)`
    Selective { budget: f64 },
}

impl UncertaintyStrategy {
    /// Starting value of the adaptive threshold
    pub const INITIAL_VARIABLE_THRESHOLD: f64 = 1.0;

    /// Build the strategy named by `kind`
    ///
    /// `fixed_threshold` only applies to [`StrategyKind::FixedUncertainty`],
    /// `step` to the variable strategies and `budget` to
    /// [`StrategyKind::SelSampling`].
    pub fn new(kind: StrategyKind, fixed_threshold: f64, step: f64, budget: f64) -> Self {
        match kind {
            StrategyKind::FixedUncertainty => Self::Fixed {
                threshold: fixed_threshold,
            },
            StrategyKind::VarUncertainty => Self::Variable {
                threshold: Self::INITIAL_VARIABLE_THRESHOLD,
                step,
            },
            StrategyKind::RandVarUncertainty => Self::RandomizedVariable {
                threshold: Self::INITIAL_VARIABLE_THRESHOLD,
                step,
            },
            StrategyKind::SelSampling => Self::Selective { budget },
        }
    }

    /// Which strategy this is
    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::Fixed { .. } => StrategyKind::FixedUncertainty,
            Self::Variable { .. } => StrategyKind::VarUncertainty,
            Self::RandomizedVariable { .. } => StrategyKind::RandVarUncertainty,
            Self::Selective { .. } => StrategyKind::SelSampling,
        }
    }

    /// Current acquisition threshold, if the strategy uses one
    pub fn threshold(&self) -> Option<f64> {
        match self {
            Self::Fixed { threshold }
            | Self::Variable { threshold, .. }
            | Self::RandomizedVariable { threshold, .. } => Some(*threshold),
            Self::Selective { .. } => None,
        }
    }

    /// Decide whether to acquire the label of an example with confidence `posterior`
    ///
    /// `num_classes` is the cardinality of the posterior the confidence was
    /// taken from. Randomized strategies draw from `rng`.
    pub fn should_acquire<R: Rng>(
        &mut self,
        posterior: f64,
        num_classes: usize,
        rng: &mut R,
    ) -> bool {
        match self {
            Self::Fixed { threshold } => posterior <= *threshold,
            Self::Variable { threshold, step } => adapt(threshold, *step, posterior),
            Self::RandomizedVariable { threshold, step } => {
                let perturbed = posterior / (standard_normal(rng) + 1.0);
                adapt(threshold, *step, perturbed)
            }
            Self::Selective { budget } => {
                // An empty posterior behaves like a single class
                let p = (posterior - 1.0).abs() / num_classes.max(1) as f64;
                let local_budget = *budget / (*budget + p);
                rng.gen::<f64>() < local_budget
            }
        }
    }
}

fn adapt(threshold: &mut f64, step: f64, posterior: f64) -> bool {
    if posterior <= *threshold {
        *threshold *= 1.0 - step;
        true
    } else {
        *threshold *= 1.0 + step;
        false
    }
}

/// Standard normal draw via the Box-Muller transform
pub(crate) fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    // 1 - U keeps u1 in (0, 1] so the logarithm stays finite
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}
