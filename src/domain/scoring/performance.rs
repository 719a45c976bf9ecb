//! Performance Predictor - logistic estimate of task success.

use super::LogisticCoefficients;
use crate::domain::vectors::{PersonaVector, UserVector};

/// Standard logistic function.
pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Predicts the probability that a learner succeeds with a persona.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerformancePredictor {
    coefficients: LogisticCoefficients,
}

impl PerformancePredictor {
    pub fn new(coefficients: LogisticCoefficients) -> Self {
        Self { coefficients }
    }

    /// `σ(β₀ + β₁·skill + β₂·quality + β₃·similarity + β₄·task_complexity)`.
    ///
    /// `similarity` is the already-computed similarity score so the
    /// predictor does not recompute it.
    pub fn predict(
        &self,
        user: &UserVector,
        persona: &PersonaVector,
        similarity: f64,
        task_complexity: f64,
    ) -> f64 {
        let c = &self.coefficients;
        let z = c.intercept
            + c.user_skill * user.overall_skill()
            + c.persona_quality * persona.quality()
            + c.similarity * similarity
            + c.task_complexity * task_complexity;
        sigmoid(z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vectors::PersonaId;

    #[test]
    fn sigmoid_is_centred() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(10.0) > 0.99);
        assert!(sigmoid(-10.0) < 0.01);
    }

    #[test]
    fn prediction_matches_hand_computed_value() {
        let user = UserVector::new([0.5; 10]);
        let persona = PersonaVector::new(PersonaId::TechCompetent, [0.5; 10]);
        let p = PerformancePredictor::default().predict(&user, &persona, 0.5, 0.5);
        let z: f64 = 0.3 + 0.4 * 0.5 + 0.3 * 0.5 + 0.25 * 0.5 - 0.2 * 0.5;
        assert!((p - 1.0 / (1.0 + (-z).exp())).abs() < 1e-12);
    }

    #[test]
    fn harder_tasks_lower_the_prediction() {
        let user = UserVector::new([0.5; 10]);
        let persona = PersonaVector::new(PersonaId::TechCompetent, [0.5; 10]);
        let predictor = PerformancePredictor::default();
        assert!(predictor.predict(&user, &persona, 0.5, 0.9) < predictor.predict(&user, &persona, 0.5, 0.1));
    }

    #[test]
    fn prediction_stays_in_unit_range() {
        let predictor = PerformancePredictor::default();
        let low = predictor.predict(&UserVector::new([0.0; 10]), &PersonaVector::new(PersonaId::TechNovice, [0.0; 10]), 0.0, 1.0);
        let high = predictor.predict(&UserVector::new([1.0; 10]), &PersonaVector::new(PersonaId::TechExpert, [1.0; 10]), 1.0, 0.0);
        assert!(low > 0.0 && high < 1.0);
    }
}
