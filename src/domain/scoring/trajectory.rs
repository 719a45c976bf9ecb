//! Learning Trajectory Estimator - expected learning gain over time.

use super::TrajectoryParameters;
use crate::domain::foundation::clip_unit;
use crate::domain::vectors::{PersonaVector, UserVector};

/// Estimates `L_max·(1 - e^(-k·t))·potential`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LearningTrajectoryEstimator {
    params: TrajectoryParameters,
}

impl LearningTrajectoryEstimator {
    pub fn new(params: TrajectoryParameters) -> Self {
        Self { params }
    }

    /// Learning support scaled by how ready the learner is to absorb it:
    /// capacity, pattern recognition and preference for concrete material.
    pub fn potential(&self, user: &UserVector, persona: &PersonaVector) -> f64 {
        let readiness = self.params.capacity_weight * user.cognitive_capacity()
            + self.params.pattern_weight * user.pattern_recognition()
            + self.params.concreteness_weight * (1.0 - user.abstraction_level());
        persona.learning_support() * readiness
    }

    /// Gain after `time_factor` of the available time has elapsed.
    pub fn estimate(&self, user: &UserVector, persona: &PersonaVector, time_factor: f64) -> f64 {
        let saturation = 1.0 - (-self.params.rate * time_factor).exp();
        clip_unit(self.params.max_gain * saturation * self.potential(user, persona))
    }
}
