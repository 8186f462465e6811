//! Classifier trait and common types

use labelgate_core::{argmax, Features, Posterior, Result};
use std::fmt::Debug;

/// Trait for all incremental classifiers
///
/// This is the whole capability set an active learner needs from the model it
/// wraps. Implementations learn one example at a time and report a posterior
/// over the labels seen so far.
pub trait Classifier {
    /// Class label type
    type Label: Clone + Ord + Debug;

    /// Update the model with a single labeled example
    fn learn_one(&mut self, x: &Features, y: &Self::Label) -> Result<()>;

    /// Posterior weight per known class for `x`
    ///
    /// An untrained model may return an empty or single-entry mapping.
    fn predict_proba_one(&self, x: &Features) -> Result<Posterior<Self::Label>>;

    /// Most probable class for `x`, `None` while no class is known
    fn predict_one(&self, x: &Features) -> Result<Option<Self::Label>> {
        Ok(argmax(&self.predict_proba_one(x)?))
    }

    /// Get the classifier name
    fn name(&self) -> &str;
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    type Label = C::Label;

    fn learn_one(&mut self, x: &Features, y: &Self::Label) -> Result<()> {
        (**self).learn_one(x, y)
    }

    fn predict_proba_one(&self, x: &Features) -> Result<Posterior<Self::Label>> {
        (**self).predict_proba_one(x)
    }

    fn predict_one(&self, x: &Features) -> Result<Option<Self::Label>> {
        (**self).predict_one(x)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
