//! Bayesian belief updates over candidate personas.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::clip_unit;

/// Likelihood assumed for candidates without feedback.
pub const DEFAULT_LIKELIHOOD: f64 = 0.5;

/// Posterior `likelihood · prior / evidence`, clipped to `[0, 1]`.
///
/// When `evidence` is `None` the numerator is used as its own normaliser.
/// This is a shortcut, not an exact posterior: any candidate with a positive
/// numerator collapses to 1 and only the subsequent renormalisation in
/// [`update_beliefs`] spreads mass between candidates.
///
/// # Edge Cases
/// - Evidence ≤ 0 (including a zero numerator with no evidence): the prior
pub fn posterior_probability(prior: f64, likelihood: f64, evidence: Option<f64>) -> f64 {
    let numerator = likelihood * prior;
    let evidence = evidence.unwrap_or(numerator);

    let posterior = if evidence > 0.0 {
        numerator / evidence
    } else {
        prior
    };

    clip_unit(posterior)
}

/// Updates a belief distribution from per-candidate feedback scores.
///
/// Candidates missing from `feedback` get a likelihood of 0.5. The result is
/// renormalised to sum to 1 unless every posterior is zero.
pub fn update_beliefs<K: Ord + Clone>(
    beliefs: &BTreeMap<K, f64>,
    feedback: &BTreeMap<K, f64>,
) -> BTreeMap<K, f64> {
    let mut updated: BTreeMap<K, f64> = beliefs
        .iter()
        .map(|(candidate, prior)| {
            let likelihood = feedback.get(candidate).copied().unwrap_or(DEFAULT_LIKELIHOOD);
            (candidate.clone(), posterior_probability(*prior, likelihood, None))
        })
        .collect();

    let total: f64 = updated.values().sum();
    if total > 0.0 {
        for value in updated.values_mut() {
            *value /= total;
        }
    }

    updated
}

/// Confidence level of a credible interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    #[default]
    #[serde(rename = "95")]
    NinetyFive,
    #[serde(rename = "99")]
    NinetyNine,
}

impl ConfidenceLevel {
    /// Two-sided normal critical value.
    pub fn z_score(&self) -> f64 {
        match self {
            ConfidenceLevel::NinetyFive => 1.96,
            ConfidenceLevel::NinetyNine => 2.576,
        }
    }
}

/// Credible interval `mean ± z·std`, clipped to `[0, 1]`.
pub fn credible_interval(mean: f64, std_dev: f64, level: ConfidenceLevel) -> (f64, f64) {
    let half_width = level.z_score() * std_dev;
    (clip_unit(mean - half_width), clip_unit(mean + half_width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posterior_with_explicit_evidence() {
        assert!((posterior_probability(0.5, 0.8, Some(0.5)) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn posterior_with_default_evidence_collapses_to_one() {
        assert_eq!(posterior_probability(0.2, 0.6, None), 1.0);
    }

    #[test]
    fn posterior_with_non_positive_evidence_returns_prior() {
        assert_eq!(posterior_probability(0.3, 0.0, None), 0.3);
        assert_eq!(posterior_probability(0.3, 0.9, Some(0.0)), 0.3);
    }

    #[test]
    fn posterior_is_clipped() {
        assert_eq!(posterior_probability(0.9, 0.9, Some(0.1)), 1.0);
    }

    #[test]
    fn update_beliefs_sums_to_one() {
        let beliefs: BTreeMap<&str, f64> =
            [("edu_novice", 0.5), ("edu_expert", 0.3), ("tech_expert", 0.2)].into();
        let feedback: BTreeMap<&str, f64> = [("edu_novice", 0.9), ("tech_expert", 0.0)].into();

        let updated = update_beliefs(&beliefs, &feedback);
        let total: f64 = updated.values().sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert_eq!(updated.len(), 3);
    }

    #[test]
    fn update_beliefs_of_empty_distribution_is_empty() {
        let beliefs: BTreeMap<String, f64> = BTreeMap::new();
        assert!(update_beliefs(&beliefs, &BTreeMap::new()).is_empty());
    }

    #[test]
    fn credible_interval_uses_level_z_score() {
        let (lo, hi) = credible_interval(0.5, 0.1, ConfidenceLevel::NinetyFive);
        assert!((lo - 0.304).abs() < 1e-12);
        assert!((hi - 0.696).abs() < 1e-12);

        let (lo, hi) = credible_interval(0.5, 0.1, ConfidenceLevel::NinetyNine);
        assert!((lo - 0.2424).abs() < 1e-12);
        assert!((hi - 0.7576).abs() < 1e-12);
    }

    #[test]
    fn credible_interval_is_clipped() {
        let (lo, hi) = credible_interval(0.95, 0.2, ConfidenceLevel::NinetyFive);
        assert!((lo - 0.558).abs() < 1e-12);
        assert_eq!(hi, 1.0);
        let (lo, _) = credible_interval(0.05, 0.2, ConfidenceLevel::NinetyFive);
        assert_eq!(lo, 0.0);
    }
}
