//! Budget managers for random label acquisition

use labelgate_core::{Error, Result};

/// Decides whether a label is acquired for a uniformly drawn value
///
/// Implementations keep a windowed acquisition counter that the caller reads
/// once per reporting window; reading resets it.
pub trait BudgetManager {
    /// Acquire a label for `value` drawn from `[0, 1]`
    fn is_above(&mut self, value: f64) -> bool;

    /// Labels acquired since the last report; resets the counter to 0
    fn label_acquisition_report(&mut self) -> u64;

    /// Target fraction of examples to acquire
    fn budget(&self) -> f64;
}

impl<B: BudgetManager + ?Sized> BudgetManager for Box<B> {
    fn is_above(&mut self, value: f64) -> bool {
        (**self).is_above(value)
    }

    fn label_acquisition_report(&mut self) -> u64 {
        (**self).label_acquisition_report()
    }

    fn budget(&self) -> f64 {
        (**self).budget()
    }
}

/// Budget manager with a fixed acquisition rate
///
/// A uniformly drawn value acquires with probability exactly `budget`.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedBudget {
    budget: f64,
    acquired_labels: u64,
}

impl FixedBudget {
    /// Default acquisition rate
    pub const DEFAULT_BUDGET: f64 = 0.1;

    /// Create a budget manager acquiring a `budget` fraction of labels
    pub fn new(budget: f64) -> Result<Self> {
        validate_budget(budget)?;
        Ok(Self {
            budget,
            acquired_labels: 0,
        })
    }

    /// Labels acquired in the current window, without resetting
    pub fn acquired_labels(&self) -> u64 {
        self.acquired_labels
    }
}

impl Default for FixedBudget {
    fn default() -> Self {
        Self {
            budget: Self::DEFAULT_BUDGET,
            acquired_labels: 0,
        }
    }
}

impl BudgetManager for FixedBudget {
    fn is_above(&mut self, value: f64) -> bool {
        let acquire = value >= 1.0 - self.budget;
        if acquire {
            self.acquired_labels += 1;
        }
        acquire
    }

    fn label_acquisition_report(&mut self) -> u64 {
        std::mem::take(&mut self.acquired_labels)
    }

    fn budget(&self) -> f64 {
        self.budget
    }
}

/// Check that a budget is a fraction within `[0, 1]`
pub(crate) fn validate_budget(budget: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&budget) {
        return Err(Error::config(format!(
            "budget must be within [0, 1], got {}",
            budget
        )));
    }
    Ok(())
}
