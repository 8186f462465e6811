//! Labelgate Active Learning
//!
//! Active-learning wrappers that decide, for every example in a stream,
//! whether to spend labeling budget on it before it reaches the wrapped
//! incremental classifier.
//!
//! Two selection families are provided:
//! - [`RandomSampling`]: a [`BudgetManager`] accepts uniformly drawn values
//!   at a fixed rate
//! - [`UncertaintySampling`]: after a warm-up period, the wrapped
//!   classifier's confidence drives one of four [`UncertaintyStrategy`]
//!   variants, while the observed labeling cost is kept within budget
//!
//! Learners are configured in code or from YAML/JSON via
//! [`ActiveLearnerConfig`].

pub mod budget;
pub mod config;
pub mod learner;
pub mod random;
pub mod strategy;
pub mod uncertainty;

pub use budget::{BudgetManager, FixedBudget};
pub use config::{ActiveLearnerConfig, RandomConfig, UncertaintyConfig};
pub use learner::{Acquisition, ActiveLearner};
pub use random::RandomSampling;
pub use strategy::{StrategyKind, UncertaintyStrategy};
pub use uncertainty::UncertaintySampling;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::budget::{BudgetManager, FixedBudget};
    pub use crate::config::{ActiveLearnerConfig, RandomConfig, UncertaintyConfig};
    pub use crate::learner::{Acquisition, ActiveLearner};
    pub use crate::random::RandomSampling;
    pub use crate::strategy::{StrategyKind, UncertaintyStrategy};
    pub use crate::uncertainty::UncertaintySampling;
    pub use labelgate_classifiers::Classifier;
}
