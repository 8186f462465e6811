//! Labelgate Classifiers
//!
//! Incremental classifiers that learn from a stream one example at a time.
//!
//! Every model implements [`Classifier`], the capability set that the
//! active learners in `labelgate-active` wrap:
//! - `learn_one` to update the model with a labeled example
//! - `predict_proba_one` to report a posterior over known classes
//! - `predict_one` for the most probable class

pub mod classifier;
pub mod config;
pub mod naive_bayes;

pub use classifier::Classifier;
pub use config::ComplementNbConfig;
pub use naive_bayes::ComplementNB;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::Classifier;
    pub use crate::naive_bayes::ComplementNB;
}
