//! Markov projection of learner progress across Dreyfus levels.

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::warn;

use crate::domain::foundation::{DomainError, ErrorCode, SkillLevel};

const STATES: usize = SkillLevel::COUNT;
const ROW_SUM_TOLERANCE: f64 = 1e-9;

/// Reference transitions. Rows are the current level, columns the next one.
///
/// Learners mostly stay put or move up one level; expert is near-absorbing.
const REFERENCE_TRANSITIONS: [[f64; STATES]; STATES] = [
    [0.70, 0.25, 0.05, 0.00, 0.00],
    [0.05, 0.65, 0.25, 0.05, 0.00],
    [0.00, 0.05, 0.60, 0.30, 0.05],
    [0.00, 0.00, 0.05, 0.65, 0.30],
    [0.00, 0.00, 0.00, 0.02, 0.98],
];

/// A row-stochastic 5×5 transition matrix over skill levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionMatrix {
    rows: [[f64; STATES]; STATES],
}

impl TransitionMatrix {
    /// The reference learning-progress matrix.
    pub fn reference() -> Self {
        Self {
            rows: REFERENCE_TRANSITIONS,
        }
    }

    /// Builds a custom matrix.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransitionMatrix` if an entry is negative or not
    /// finite, or a row does not sum to 1.
    pub fn try_new(rows: [[f64; STATES]; STATES]) -> Result<Self, DomainError> {
        for (index, row) in rows.iter().enumerate() {
            if row.iter().any(|p| !p.is_finite() || *p < 0.0) {
                return Err(DomainError::new(
                    ErrorCode::InvalidTransitionMatrix,
                    "Transition probabilities must be finite and non-negative",
                )
                .with_detail("row", index.to_string()));
            }
            let sum: f64 = row.iter().sum();
            if (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
                return Err(DomainError::new(
                    ErrorCode::InvalidTransitionMatrix,
                    "Transition matrix rows must sum to 1",
                )
                .with_detail("row", index.to_string())
                .with_detail("sum", sum.to_string()));
            }
        }
        Ok(Self { rows })
    }

    /// Probability of moving from `from` to `to` in one step.
    pub fn probability(&self, from: SkillLevel, to: SkillLevel) -> f64 {
        self.rows[from.order_index()][to.order_index()]
    }

    pub fn rows(&self) -> &[[f64; STATES]; STATES] {
        &self.rows
    }

    /// Distribution over levels after `steps` transitions from `start`.
    pub fn project(&self, start: SkillLevel, steps: usize) -> LevelDistribution {
        self.project_distribution(LevelDistribution::certain(start), steps)
    }

    /// Advances an arbitrary distribution by `steps` transitions.
    pub fn project_distribution(&self, initial: LevelDistribution, steps: usize) -> LevelDistribution {
        let mut state = initial.probabilities;
        for _ in 0..steps {
            let mut next = [0.0; STATES];
            for (from, mass) in state.iter().enumerate() {
                for (to, p) in self.rows[from].iter().enumerate() {
                    next[to] += mass * p;
                }
            }
            state = next;
        }
        LevelDistribution {
            probabilities: state,
        }
    }
}

impl Default for TransitionMatrix {
    fn default() -> Self {
        Self::reference()
    }
}

/// Probability mass over the five skill levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelDistribution {
    probabilities: [f64; STATES],
}

impl LevelDistribution {
    /// All mass on one level.
    pub fn certain(level: SkillLevel) -> Self {
        let mut probabilities = [0.0; STATES];
        probabilities[level.order_index()] = 1.0;
        Self { probabilities }
    }

    pub fn probability(&self, level: SkillLevel) -> f64 {
        self.probabilities[level.order_index()]
    }

    pub fn as_array(&self) -> [f64; STATES] {
        self.probabilities
    }

    pub fn total(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    /// Level carrying the most mass; ties go to the lower level.
    pub fn most_likely(&self) -> SkillLevel {
        let mut best = SkillLevel::Novice;
        for level in SkillLevel::all() {
            if self.probability(*level) > self.probability(best) {
                best = *level;
            }
        }
        best
    }
}

impl Serialize for LevelDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(STATES))?;
        for level in SkillLevel::all() {
            map.serialize_entry(level.as_str(), &self.probability(*level))?;
        }
        map.end()
    }
}

/// Expected value `Σ rewardᵢ · pᵢ`.
///
/// # Edge Cases
/// - Length mismatch: 0 (logged)
pub fn expected_value(rewards: &[f64], probabilities: &[f64]) -> f64 {
    if rewards.len() != probabilities.len() {
        warn!(
            rewards = rewards.len(),
            probabilities = probabilities.len(),
            "expected value over mismatched series"
        );
        return 0.0;
    }
    rewards.iter().zip(probabilities).map(|(r, p)| r * p).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_rows_sum_to_one() {
        let matrix = TransitionMatrix::reference();
        for row in matrix.rows() {
            assert!((row.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        }
        assert!(TransitionMatrix::try_new(REFERENCE_TRANSITIONS).is_ok());
    }

    #[test]
    fn zero_steps_is_identity() {
        let dist = TransitionMatrix::reference().project(SkillLevel::Competent, 0);
        assert_eq!(dist, LevelDistribution::certain(SkillLevel::Competent));
    }

    #[test]
    fn one_step_matches_matrix_row() {
        let matrix = TransitionMatrix::reference();
        let dist = matrix.project(SkillLevel::Novice, 1);
        assert_eq!(dist.probability(SkillLevel::Novice), 0.70);
        assert_eq!(dist.probability(SkillLevel::AdvancedBeginner), 0.25);
        assert_eq!(
            matrix.probability(SkillLevel::Novice, SkillLevel::Competent),
            0.05
        );
    }

    #[test]
    fn projections_conserve_mass() {
        let matrix = TransitionMatrix::reference();
        for level in SkillLevel::all() {
            for steps in [1, 2, 5, 20] {
                assert!((matrix.project(*level, steps).total() - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn expert_stays_expert() {
        let dist = TransitionMatrix::reference().project(SkillLevel::Expert, 5);
        assert!(dist.probability(SkillLevel::Expert) >= 0.9);
        assert_eq!(dist.most_likely(), SkillLevel::Expert);
    }

    #[test]
    fn novices_drift_upwards() {
        let dist = TransitionMatrix::reference().project(SkillLevel::Novice, 10);
        assert!(dist.probability(SkillLevel::Novice) < 0.1);
    }

    #[test]
    fn try_new_rejects_bad_rows() {
        let mut rows = REFERENCE_TRANSITIONS;
        rows[2][2] = 0.9;
        let err = TransitionMatrix::try_new(rows).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTransitionMatrix);
        assert_eq!(err.details.get("row"), Some(&"2".to_string()));

        let mut rows = REFERENCE_TRANSITIONS;
        rows[0] = [1.2, -0.2, 0.0, 0.0, 0.0];
        assert!(TransitionMatrix::try_new(rows).is_err());
    }

    #[test]
    fn distribution_serializes_by_level_name() {
        let json = serde_json::to_value(LevelDistribution::certain(SkillLevel::Proficient)).unwrap();
        assert_eq!(json["proficient"], 1.0);
        assert_eq!(json["novice"], 0.0);
    }

    #[test]
    fn expected_value_weights_rewards() {
        assert!((expected_value(&[1.0, 2.0, 3.0], &[0.2, 0.3, 0.5]) - 2.3).abs() < 1e-12);
        assert_eq!(expected_value(&[1.0], &[0.5, 0.5]), 0.0);
    }
}
