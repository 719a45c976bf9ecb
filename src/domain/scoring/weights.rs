//! Aggregation weights and their feedback-driven adjustment.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

const SUM_TOLERANCE: f64 = 1e-6;

/// Ratings strictly above this count as a success.
pub const POSITIVE_RATING_THRESHOLD: f64 = 3.0;

/// Learning goals strictly above this tune towards similarity and learning.
pub const LEARNING_ORIENTED_THRESHOLD: f64 = 0.7;

/// Weights of the four terms of the recommendation score.
///
/// - `alpha` - similarity (or dissimilarity in complementary mode)
/// - `beta` - competency match (or complementarity in complementary mode)
/// - `gamma` - performance prediction
/// - `delta` - learning trajectory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationWeights {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub delta: f64,
}

impl Default for AggregationWeights {
    fn default() -> Self {
        Self {
            alpha: 0.30,
            beta: 0.35,
            gamma: 0.25,
            delta: 0.10,
        }
    }
}

/// One piece of user feedback on a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    /// Rating on a 1-5 scale.
    pub rating: f64,
}

impl Feedback {
    pub fn new(rating: f64) -> Self {
        Self { rating }
    }

    pub fn is_positive(&self) -> bool {
        self.rating > POSITIVE_RATING_THRESHOLD
    }

    /// Share of positive ratings; 0 for no feedback.
    pub fn success_rate(feedback: &[Feedback]) -> f64 {
        if feedback.is_empty() {
            return 0.0;
        }
        let positive = feedback.iter().filter(|f| f.is_positive()).count();
        positive as f64 / feedback.len() as f64
    }
}

impl AggregationWeights {
    /// Creates weights, normalising them to sum to 1.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` if a weight is negative or not finite, or all
    /// weights are zero.
    pub fn try_new(alpha: f64, beta: f64, gamma: f64, delta: f64) -> Result<Self, ValidationError> {
        let raw = [alpha, beta, gamma, delta];
        if raw.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ValidationError::invalid_format(
                "weights",
                "weights must be finite and non-negative",
            ));
        }
        let total: f64 = raw.iter().sum();
        if total <= 0.0 {
            return Err(ValidationError::invalid_format("weights", "weights must not all be zero"));
        }
        Ok(Self {
            alpha: alpha / total,
            beta: beta / total,
            gamma: gamma / total,
            delta: delta / total,
        })
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.alpha, self.beta, self.gamma, self.delta]
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// Checks the weights are non-negative and sum to 1.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.as_array().iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ValidationError::invalid_format(
                "weights",
                "weights must be finite and non-negative",
            ));
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(ValidationError::invalid_format(
                "weights",
                format!("weights must sum to 1, got {}", sum),
            ));
        }
        Ok(())
    }

    /// Nudges the weights from a batch of feedback.
    ///
    /// # Algorithm
    /// success = share of ratings above 3.
    /// Learning-oriented users (goal > 0.7): α, δ += 0.1·success; β, γ -= 0.05·success.
    /// Others: β, γ += 0.1·success; α, δ -= 0.05·success.
    /// Negative results clamp to 0, then all four are renormalised.
    ///
    /// # Edge Cases
    /// - Empty feedback: weights unchanged
    /// - No positive ratings: weights unchanged (up to renormalisation)
    pub fn tuned(&self, learning_goal: f64, feedback: &[Feedback]) -> Self {
        if feedback.is_empty() {
            return *self;
        }

        let success = Feedback::success_rate(feedback);
        let raise = 0.1 * success;
        let lower = 0.05 * success;

        let (alpha, beta, gamma, delta) = if learning_goal > LEARNING_ORIENTED_THRESHOLD {
            (
                self.alpha + raise,
                self.beta - lower,
                self.gamma - lower,
                self.delta + raise,
            )
        } else {
            (
                self.alpha - lower,
                self.beta + raise,
                self.gamma + raise,
                self.delta - lower,
            )
        };

        Self::try_new(alpha.max(0.0), beta.max(0.0), gamma.max(0.0), delta.max(0.0))
            .unwrap_or(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn default_weights_sum_to_one() {
        let w = AggregationWeights::default();
        assert!(approx(w.sum(), 1.0));
        assert!(w.validate().is_ok());
    }

    #[test]
    fn try_new_normalises() {
        let w = AggregationWeights::try_new(1.0, 1.0, 1.0, 1.0).unwrap();
        assert!(approx(w.alpha, 0.25));
        assert!(approx(w.sum(), 1.0));
    }

    #[test]
    fn try_new_rejects_negative_and_zero() {
        assert!(AggregationWeights::try_new(-0.1, 0.5, 0.3, 0.3).is_err());
        assert!(AggregationWeights::try_new(0.0, 0.0, 0.0, 0.0).is_err());
        assert!(AggregationWeights::try_new(f64::NAN, 0.5, 0.3, 0.3).is_err());
    }

    #[test]
    fn validate_rejects_unnormalised() {
        let w = AggregationWeights {
            alpha: 0.5,
            beta: 0.5,
            gamma: 0.5,
            delta: 0.5,
        };
        assert!(w.validate().is_err());
    }

    #[test]
    fn empty_feedback_leaves_weights_unchanged() {
        let w = AggregationWeights::default();
        assert_eq!(w.tuned(0.9, &[]), w);
    }

    #[test]
    fn learning_oriented_feedback_raises_alpha_and_delta() {
        let w = AggregationWeights::default();
        let feedback = [Feedback::new(5.0), Feedback::new(4.0)];
        let tuned = w.tuned(0.9, &feedback);

        // Raw: α .40, β .30, γ .20, δ .20 over a total of 1.1.
        assert!(approx(tuned.alpha, 0.40 / 1.1));
        assert!(approx(tuned.beta, 0.30 / 1.1));
        assert!(approx(tuned.gamma, 0.20 / 1.1));
        assert!(approx(tuned.delta, 0.20 / 1.1));
        assert!(approx(tuned.sum(), 1.0));
    }

    #[test]
    fn production_oriented_feedback_raises_beta_and_gamma() {
        let w = AggregationWeights::default();
        let feedback = [Feedback::new(5.0), Feedback::new(1.0)];
        let tuned = w.tuned(0.3, &feedback);

        assert!(tuned.beta > w.beta);
        assert!(tuned.gamma > w.gamma);
        assert!(tuned.alpha < w.alpha);
        assert!(tuned.delta < w.delta);
        assert!(approx(tuned.sum(), 1.0));
    }

    #[test]
    fn success_rate_counts_ratings_above_three() {
        assert_eq!(Feedback::success_rate(&[]), 0.0);
        let feedback = [Feedback::new(5.0), Feedback::new(3.0), Feedback::new(4.0), Feedback::new(1.0)];
        assert_eq!(Feedback::success_rate(&feedback), 0.5);
    }

    #[test]
    fn all_negative_feedback_keeps_weights() {
        let w = AggregationWeights::default();
        let tuned = w.tuned(0.9, &[Feedback::new(2.0), Feedback::new(3.0)]);
        assert!(approx(tuned.alpha, w.alpha));
        assert!(approx(tuned.delta, w.delta));
    }

    #[test]
    fn repeated_tuning_never_goes_negative() {
        let mut w = AggregationWeights::default();
        for _ in 0..50 {
            w = w.tuned(0.95, &[Feedback::new(5.0)]);
        }
        assert!(w.as_array().iter().all(|x| *x >= 0.0));
        assert!(approx(w.sum(), 1.0));
    }
}
