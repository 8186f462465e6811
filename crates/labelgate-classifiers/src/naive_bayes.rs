//! Complement Naive Bayes
//!
//! Learns from occurrences between features (word counts, TF-IDF weights)
//! and discrete classes. Each class is scored against the statistics of all
//! *other* classes, which makes the model robust on imbalanced streams.
//!
//! Reference: Rennie, Shih, Teevan and Karger, "Tackling the poor assumptions
//! of naive Bayes text classifiers", ICML 2003.

use crate::{Classifier, ComplementNbConfig};
use labelgate_core::{Error, Features, Posterior, Result};
use std::collections::BTreeMap;
use std::fmt::Debug;
use tracing::trace;

/// Complement Naive Bayes classifier updated one example at a time
#[derive(Debug, Clone)]
pub struct ComplementNB<L: Ord> {
    /// Additive (Laplace/Lidstone) smoothing
    alpha: f64,

    /// Number of examples seen per class
    class_counts: BTreeMap<L, u64>,

    /// Total frequency per feature and class
    feature_counts: BTreeMap<String, BTreeMap<L, f64>>,

    /// Total frequency per feature over all classes
    feature_totals: BTreeMap<String, f64>,

    /// Total frequency per class over all features
    class_totals: BTreeMap<L, f64>,
}

impl<L: Clone + Ord + Debug> ComplementNB<L> {
    /// Create a classifier with the default smoothing (`alpha = 1.0`)
    pub fn new() -> Self {
        Self {
            alpha: ComplementNbConfig::default().alpha,
            class_counts: BTreeMap::new(),
            feature_counts: BTreeMap::new(),
            feature_totals: BTreeMap::new(),
            class_totals: BTreeMap::new(),
        }
    }

    /// Create a classifier with custom smoothing
    ///
    /// `alpha` must be finite and non-negative; 0 disables smoothing.
    pub fn with_alpha(alpha: f64) -> Result<Self> {
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(Error::config(format!(
                "alpha must be finite and non-negative, got {}",
                alpha
            )));
        }

        Ok(Self {
            alpha,
            ..Self::new()
        })
    }

    /// Create a classifier from configuration
    pub fn from_config(config: &ComplementNbConfig) -> Result<Self> {
        Self::with_alpha(config.alpha)
    }

    /// Smoothing parameter
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Classes seen so far, in label order
    pub fn classes(&self) -> impl Iterator<Item = &L> {
        self.class_counts.keys()
    }

    /// Number of examples seen for `class`
    pub fn class_count(&self, class: &L) -> u64 {
        self.class_counts.get(class).copied().unwrap_or(0)
    }

    /// Accumulated frequency of `feature` within `class`
    pub fn feature_count(&self, feature: &str, class: &L) -> f64 {
        self.feature_counts
            .get(feature)
            .and_then(|per_class| per_class.get(class))
            .copied()
            .unwrap_or(0.0)
    }

    /// Number of distinct features in the vocabulary
    pub fn n_features(&self) -> usize {
        self.feature_counts.len()
    }

    /// Prior probability of `class`
    pub fn p_class(&self, class: &L) -> f64 {
        let total: u64 = self.class_counts.values().sum();
        if total == 0 {
            return 0.0;
        }
        self.class_count(class) as f64 / total as f64
    }

    /// Joint log likelihood of `x` for every known class
    ///
    /// For class `c` the complement count of feature `f` is
    /// `feature_totals[f] + alpha - feature_counts[f][c]`; unknown features
    /// fall back to `alpha`.
    pub fn joint_log_likelihood(&self, x: &Features) -> BTreeMap<L, f64> {
        let grand_total: f64 = self.feature_totals.values().sum();
        let vocabulary = self.feature_counts.len() as f64;

        self.class_counts
            .keys()
            .map(|class| {
                let class_total = self.class_totals.get(class).copied().unwrap_or(0.0);
                let complement_total = grand_total + self.alpha * vocabulary - class_total;

                let jll: f64 = x
                    .iter()
                    .map(|(feature, &frequency)| {
                        let complement = match self.feature_totals.get(feature) {
                            Some(&total) => {
                                total + self.alpha - self.feature_count(feature, class)
                            }
                            None => self.alpha,
                        };
                        frequency * -(complement / complement_total).ln()
                    })
                    .sum();

                (class.clone(), jll)
            })
            .collect()
    }

    fn validate(x: &Features) -> Result<()> {
        for (feature, &value) in x {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::classifier(format!(
                    "feature '{}' has invalid value {}: complement naive bayes requires non-negative frequencies",
                    feature, value
                )));
            }
        }
        Ok(())
    }
}

impl<L: Clone + Ord + Debug> Default for ComplementNB<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Clone + Ord + Debug> Classifier for ComplementNB<L> {
    type Label = L;

    fn learn_one(&mut self, x: &Features, y: &L) -> Result<()> {
        Self::validate(x)?;

        *self.class_counts.entry(y.clone()).or_insert(0) += 1;

        for (feature, &frequency) in x {
            *self
                .feature_counts
                .entry(feature.clone())
                .or_default()
                .entry(y.clone())
                .or_insert(0.0) += frequency;
            *self.feature_totals.entry(feature.clone()).or_insert(0.0) += frequency;
            *self.class_totals.entry(y.clone()).or_insert(0.0) += frequency;
        }

        trace!(label = ?y, features = x.len(), "complement nb updated");
        Ok(())
    }

    fn predict_proba_one(&self, x: &Features) -> Result<Posterior<L>> {
        Self::validate(x)?;

        let jll = self.joint_log_likelihood(x);
        if jll.is_empty() {
            return Ok(Posterior::new());
        }

        let max = jll.values().copied().fold(f64::NEG_INFINITY, f64::max);
        let lse = max + jll.values().map(|ll| (ll - max).exp()).sum::<f64>().ln();

        Ok(jll
            .into_iter()
            .map(|(class, ll)| (class, (ll - lse).exp()))
            .collect())
    }

    fn name(&self) -> &str {
        "complement_nb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labelgate_core::bag_of_words;

    fn trained() -> ComplementNB<String> {
        let docs = [
            ("food food meat brain".to_string(), "health"),
            (
                format!("food meat {}{}", "kitchen ".repeat(9), "job".repeat(5)),
                "butcher",
            ),
            ("food food meat job".to_string(), "health"),
        ];

        let mut model = ComplementNB::new();
        for (text, label) in &docs {
            model
                .learn_one(&bag_of_words(text), &label.to_string())
                .unwrap();
        }
        model
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_class_priors() {
        let model = trained();
        assert_close(model.p_class(&"health".to_string()), 2.0 / 3.0);
        assert_close(model.p_class(&"butcher".to_string()), 1.0 / 3.0);
        assert_eq!(model.p_class(&"unknown".to_string()), 0.0);
    }

    #[test]
    fn test_counts() {
        let model = trained();
        assert_eq!(model.class_count(&"health".to_string()), 2);
        assert_eq!(model.feature_count("food", &"health".to_string()), 4.0);
        assert_eq!(model.feature_count("kitchen", &"butcher".to_string()), 9.0);
        assert_eq!(model.feature_count("kitchen", &"health".to_string()), 0.0);
        // food, meat, brain, kitchen, jobjobjobjobjob, job
        assert_eq!(model.n_features(), 6);
    }

    #[test]
    fn test_joint_log_likelihood() {
        let model = trained();
        let jll = model.joint_log_likelihood(&bag_of_words("food job meat"));
        assert_close(jll["health"], 7.284820912568604);
        assert_close(jll["butcher"], 4.515974607183621);
    }

    #[test]
    fn test_predict_proba_known_words() {
        let model = trained();
        let proba = model
            .predict_proba_one(&bag_of_words("food job meat"))
            .unwrap();
        assert_close(proba["health"], 0.9409689355477155);
        assert_close(proba["butcher"], 0.05903106445228467);
    }

    #[test]
    fn test_predict_proba_unknown_words() {
        let model = trained();
        let proba = model
            .predict_proba_one(&bag_of_words("Taiwanese Taipei"))
            .unwrap();
        assert_close(proba["health"], 0.6230769230769229);
        assert_close(proba["butcher"], 0.3769230769230768);
    }

    #[test]
    fn test_predict_one() {
        let model = trained();
        let label = model.predict_one(&bag_of_words("food job meat")).unwrap();
        assert_eq!(label.as_deref(), Some("health"));
    }

    #[test]
    fn test_untrained_model_is_empty() {
        let model: ComplementNB<String> = ComplementNB::new();
        let proba = model.predict_proba_one(&bag_of_words("anything")).unwrap();
        assert!(proba.is_empty());
        assert_eq!(model.predict_one(&bag_of_words("anything")).unwrap(), None);
    }

    #[test]
    fn test_rejects_negative_frequencies() {
        let mut model: ComplementNB<String> = ComplementNB::new();
        let x = labelgate_core::features([("a", 1.0), ("b", -2.0)]);
        let err = model.learn_one(&x, &"c".to_string()).unwrap_err();
        assert!(err.to_string().contains("'b'"));
        // Nothing is recorded on failure
        assert_eq!(model.class_count(&"c".to_string()), 0);
        assert_eq!(model.n_features(), 0);
    }

    #[test]
    fn test_invalid_alpha() {
        assert!(ComplementNB::<String>::with_alpha(-1.0).is_err());
        assert!(ComplementNB::<String>::with_alpha(f64::NAN).is_err());
        assert_eq!(ComplementNB::<String>::with_alpha(0.5).unwrap().alpha(), 0.5);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn posterior_sums_to_one(
                docs in proptest::collection::vec(
                    (proptest::collection::btree_map("[a-e]", 1.0f64..5.0, 1..4), 0u8..3),
                    1..12,
                ),
                query in proptest::collection::btree_map("[a-g]", 1.0f64..5.0, 1..4),
            ) {
                let mut model = ComplementNB::new();
                for (x, y) in &docs {
                    model.learn_one(x, y).unwrap();
                }
                let proba = model.predict_proba_one(&query).unwrap();
                let total: f64 = proba.values().sum();
                prop_assert!((total - 1.0).abs() < 1e-9);
                prop_assert!(proba.values().all(|p| (0.0..=1.0).contains(p)));
            }
        }
    }
}
