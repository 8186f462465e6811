//! Core types for labelgate

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Feature vector of a single example: feature name to value
///
/// Ordered so that sums over features are reproducible between runs.
pub type Features = BTreeMap<String, f64>;

/// Posterior distribution returned by a classifier: class label to weight
///
/// The ordering by label matters for [`PosteriorSelection::LabelOrder`].
pub type Posterior<L> = BTreeMap<L, f64>;

/// Build a feature vector from `(name, value)` pairs
pub fn features<K, I>(pairs: I) -> Features
where
    K: Into<String>,
    I: IntoIterator<Item = (K, f64)>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

/// Build a term-frequency feature vector from whitespace separated text
pub fn bag_of_words(text: &str) -> Features {
    let mut out = Features::new();
    for token in text.split_whitespace() {
        *out.entry(token.to_string()).or_insert(0.0) += 1.0;
    }
    out
}

/// How the confidence value is extracted from a posterior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosteriorSelection {
    /// Probability paired with the greatest `(label, probability)` tuple,
    /// i.e. the probability of the greatest label
    #[default]
    LabelOrder,

    /// The largest probability in the posterior
    MaxProbability,
}

impl PosteriorSelection {
    /// Extract the confidence value used by uncertainty strategies
    ///
    /// Posteriors with fewer than two classes carry no confidence and yield 0.0.
    pub fn select<L: Ord>(&self, posterior: &Posterior<L>) -> f64 {
        if posterior.len() < 2 {
            return 0.0;
        }

        match self {
            Self::LabelOrder => posterior.values().next_back().copied().unwrap_or(0.0),
            Self::MaxProbability => posterior
                .values()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

/// Label with the highest posterior weight
///
/// Ties go to the smallest label. Returns `None` for an empty posterior.
pub fn argmax<L: Ord + Clone>(posterior: &Posterior<L>) -> Option<L> {
    let mut best: Option<(&L, f64)> = None;
    for (label, &p) in posterior {
        match best {
            Some((_, bp)) if p <= bp => {}
            _ => best = Some((label, p)),
        }
    }
    best.map(|(label, _)| label.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posterior(pairs: &[(&str, f64)]) -> Posterior<String> {
        pairs.iter().map(|(l, p)| (l.to_string(), *p)).collect()
    }

    #[test]
    fn test_label_order_uses_greatest_label() {
        let p = posterior(&[("a", 0.9), ("b", 0.1)]);
        assert_eq!(PosteriorSelection::LabelOrder.select(&p), 0.1);
        assert_eq!(PosteriorSelection::MaxProbability.select(&p), 0.9);
    }

    #[test]
    fn test_degenerate_posteriors_select_zero() {
        let empty: Posterior<String> = Posterior::new();
        assert_eq!(PosteriorSelection::LabelOrder.select(&empty), 0.0);

        let single = posterior(&[("only", 1.0)]);
        assert_eq!(PosteriorSelection::LabelOrder.select(&single), 0.0);
        assert_eq!(PosteriorSelection::MaxProbability.select(&single), 0.0);
    }

    #[test]
    fn test_argmax() {
        let p = posterior(&[("a", 0.2), ("b", 0.5), ("c", 0.3)]);
        assert_eq!(argmax(&p), Some("b".to_string()));

        let tie = posterior(&[("x", 0.5), ("y", 0.5)]);
        assert_eq!(argmax(&tie), Some("x".to_string()));

        assert_eq!(argmax(&Posterior::<String>::new()), None);
    }

    #[test]
    fn test_bag_of_words() {
        let x = bag_of_words("food food meat");
        assert_eq!(x.get("food"), Some(&2.0));
        assert_eq!(x.get("meat"), Some(&1.0));
        assert_eq!(x.len(), 2);
    }

    #[test]
    fn test_selection_deserialize() {
        let s: PosteriorSelection = serde_yaml::from_str("max_probability").unwrap();
        assert_eq!(s, PosteriorSelection::MaxProbability);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn max_probability_bounds_label_order(
                probs in proptest::collection::vec(0.0f64..1.0, 2..8)
            ) {
                let p: Posterior<usize> = probs.iter().copied().enumerate().collect();
                let by_label = PosteriorSelection::LabelOrder.select(&p);
                let by_max = PosteriorSelection::MaxProbability.select(&p);
                prop_assert!(by_label <= by_max);
                prop_assert_eq!(by_label, *probs.last().unwrap());
            }
        }
    }
}
