//! Tunable constants of the scoring engine.
//!
//! Defaults reproduce the reference model. Every struct deserializes with
//! missing fields filled from its default, so a configuration file only
//! needs to mention what it overrides.

use serde::{Deserialize, Serialize};

use super::AggregationWeights;
use crate::domain::foundation::ValidationError;

const SUM_TOLERANCE: f64 = 1e-6;

fn check_unit(field: &str, value: f64) -> Result<(), ValidationError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::out_of_range(field, 0.0, 1.0, value));
    }
    Ok(())
}

fn check_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ValidationError::out_of_range(field, f64::MIN_POSITIVE, f64::MAX, value));
    }
    Ok(())
}

fn check_sums_to_one(field: &str, parts: &[f64]) -> Result<(), ValidationError> {
    if parts.iter().any(|p| *p < 0.0) {
        return Err(ValidationError::invalid_format(field, "weights must be non-negative"));
    }
    let sum: f64 = parts.iter().sum();
    if (sum - 1.0).abs() > SUM_TOLERANCE {
        return Err(ValidationError::invalid_format(
            field,
            format!("weights must sum to 1, got {}", sum),
        ));
    }
    Ok(())
}

/// Blend of cosine similarity and normalised Euclidean closeness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityParameters {
    pub cosine_weight: f64,
    pub distance_weight: f64,
}

impl Default for SimilarityParameters {
    fn default() -> Self {
        Self {
            cosine_weight: 0.6,
            distance_weight: 0.4,
        }
    }
}

impl SimilarityParameters {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_sums_to_one("similarity", &[self.cosine_weight, self.distance_weight])
    }
}

/// Zone-of-proximal-development kernel and its companions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetencyParameters {
    /// λ in `exp(-λ·(gap - offset)²)`.
    pub sharpness: f64,
    /// Gap at which the kernel peaks; positive means "slightly above the learner".
    pub zpd_offset: f64,
    /// Learning goals above this favour pedagogical focus over production readiness.
    pub learning_goal_threshold: f64,
    pub gaussian_weight: f64,
    pub alignment_weight: f64,
    pub knowledge_weight: f64,
    pub procedural_weight: f64,
    pub declarative_weight: f64,
    pub conditional_weight: f64,
}

impl Default for CompetencyParameters {
    fn default() -> Self {
        Self {
            sharpness: 2.0,
            zpd_offset: 0.1,
            learning_goal_threshold: 0.7,
            gaussian_weight: 0.5,
            alignment_weight: 0.3,
            knowledge_weight: 0.2,
            procedural_weight: 0.4,
            declarative_weight: 0.3,
            conditional_weight: 0.3,
        }
    }
}

impl CompetencyParameters {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_positive("competency.sharpness", self.sharpness)?;
        if !(-1.0..=1.0).contains(&self.zpd_offset) {
            return Err(ValidationError::out_of_range(
                "competency.zpd_offset",
                -1.0,
                1.0,
                self.zpd_offset,
            ));
        }
        check_unit("competency.learning_goal_threshold", self.learning_goal_threshold)?;
        check_sums_to_one(
            "competency",
            &[self.gaussian_weight, self.alignment_weight, self.knowledge_weight],
        )?;
        check_sums_to_one(
            "competency.knowledge",
            &[self.procedural_weight, self.declarative_weight, self.conditional_weight],
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplementarityParameters {
    /// Learning goals above this look for pedagogical strength in the domain axis.
    pub learning_goal_threshold: f64,
}

impl Default for ComplementarityParameters {
    fn default() -> Self {
        Self {
            learning_goal_threshold: 0.5,
        }
    }
}

/// Coefficients of the logistic performance model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogisticCoefficients {
    pub intercept: f64,
    pub user_skill: f64,
    pub persona_quality: f64,
    pub similarity: f64,
    pub task_complexity: f64,
}

impl Default for LogisticCoefficients {
    fn default() -> Self {
        Self {
            intercept: 0.3,
            user_skill: 0.4,
            persona_quality: 0.3,
            similarity: 0.25,
            task_complexity: -0.2,
        }
    }
}

/// Saturating-exponential learning gain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrajectoryParameters {
    pub max_gain: f64,
    pub rate: f64,
    pub capacity_weight: f64,
    pub pattern_weight: f64,
    pub concreteness_weight: f64,
}

impl Default for TrajectoryParameters {
    fn default() -> Self {
        Self {
            max_gain: 1.0,
            rate: 2.0,
            capacity_weight: 0.4,
            pattern_weight: 0.3,
            concreteness_weight: 0.3,
        }
    }
}

impl TrajectoryParameters {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_unit("trajectory.max_gain", self.max_gain)?;
        check_positive("trajectory.rate", self.rate)?;
        check_sums_to_one(
            "trajectory",
            &[self.capacity_weight, self.pattern_weight, self.concreteness_weight],
        )
    }
}

/// Width of the displayed confidence band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceParameters {
    pub std_dev: f64,
    pub z_score: f64,
}

impl Default for ConfidenceParameters {
    fn default() -> Self {
        Self {
            std_dev: 0.05,
            z_score: 1.96,
        }
    }
}

/// Learning-goal cut-offs of the adaptive strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveThresholds {
    /// Learning goals strictly above this are scored complementarily.
    pub complementary_above: f64,
    /// Learning goals strictly below this are scored by similarity.
    pub similarity_below: f64,
}

impl Default for AdaptiveThresholds {
    fn default() -> Self {
        Self {
            complementary_above: 0.7,
            similarity_below: 0.3,
        }
    }
}

impl AdaptiveThresholds {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_unit("adaptive.complementary_above", self.complementary_above)?;
        check_unit("adaptive.similarity_below", self.similarity_below)?;
        if self.similarity_below > self.complementary_above {
            return Err(ValidationError::invalid_format(
                "adaptive",
                "similarity_below must not exceed complementary_above",
            ));
        }
        Ok(())
    }
}

/// Everything the recommendation score depends on besides its inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParameters {
    pub weights: AggregationWeights,
    pub similarity: SimilarityParameters,
    pub competency: CompetencyParameters,
    pub complementarity: ComplementarityParameters,
    pub performance: LogisticCoefficients,
    pub trajectory: TrajectoryParameters,
    pub confidence: ConfidenceParameters,
    pub adaptive: AdaptiveThresholds,
}

impl ScoringParameters {
    /// Checks every section.
    ///
    /// # Errors
    ///
    /// Returns the first section's `ValidationError`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.weights.validate()?;
        self.similarity.validate()?;
        self.competency.validate()?;
        check_unit(
            "complementarity.learning_goal_threshold",
            self.complementarity.learning_goal_threshold,
        )?;
        self.trajectory.validate()?;
        if !(self.confidence.std_dev >= 0.0 && self.confidence.z_score >= 0.0) {
            return Err(ValidationError::invalid_format(
                "confidence",
                "std_dev and z_score must be non-negative",
            ));
        }
        self.adaptive.validate()
    }
}

/// Constants of the cognitive-load decomposition and its ranking score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CognitiveLoadParameters {
    /// Expertise blend: technical skill, domain knowledge, procedural knowledge.
    pub expertise_weights: [f64; 3],
    /// Extraneous blend: poor modularity, verbosity penalty, complexity.
    pub extraneous_weights: [f64; 3],
    /// Share of code complexity that counts as extraneous.
    pub complexity_share: f64,
    /// Verbosity inside this band is free of penalty.
    pub verbosity_band: (f64, f64),
    /// Germane blend: learning support, pedagogical focus, learning capacity, examples.
    pub germane_weights: [f64; 4],
    /// Learning-capacity blend: capacity, pattern recognition, learning goal.
    pub capacity_weights: [f64; 3],
    /// Extraneous load must stay below this for the optimal zone.
    pub optimal_extraneous_ceiling: f64,
    /// Total load below this share of capacity is underload.
    pub underload_ratio: f64,
    pub high_extraneous_threshold: f64,
    pub low_germane_threshold: f64,
    pub efficiency_epsilon: f64,
    pub max_total_load: f64,
    /// Ranking blend: germane, absence of extraneous, efficiency, optimal bonus.
    pub ranking_weights: [f64; 4],
    /// Ranking score multiplier is `1 - penalty · overload_amount`.
    pub overload_penalty: f64,
}

impl Default for CognitiveLoadParameters {
    fn default() -> Self {
        Self {
            expertise_weights: [0.4, 0.3, 0.3],
            extraneous_weights: [0.4, 0.3, 0.3],
            complexity_share: 0.5,
            verbosity_band: (0.3, 0.8),
            germane_weights: [0.35, 0.30, 0.20, 0.15],
            capacity_weights: [0.4, 0.3, 0.3],
            optimal_extraneous_ceiling: 0.3,
            underload_ratio: 0.4,
            high_extraneous_threshold: 0.5,
            low_germane_threshold: 0.3,
            efficiency_epsilon: 0.001,
            max_total_load: 2.0,
            ranking_weights: [0.35, 0.30, 0.20, 0.15],
            overload_penalty: 0.5,
        }
    }
}

impl CognitiveLoadParameters {
    /// # Errors
    ///
    /// Returns a `ValidationError` naming the offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_sums_to_one("cognitive_load.expertise_weights", &self.expertise_weights)?;
        check_sums_to_one("cognitive_load.extraneous_weights", &self.extraneous_weights)?;
        check_sums_to_one("cognitive_load.germane_weights", &self.germane_weights)?;
        check_sums_to_one("cognitive_load.capacity_weights", &self.capacity_weights)?;
        check_sums_to_one("cognitive_load.ranking_weights", &self.ranking_weights)?;
        check_unit("cognitive_load.complexity_share", self.complexity_share)?;

        let (low, high) = self.verbosity_band;
        check_unit("cognitive_load.verbosity_band.0", low)?;
        check_unit("cognitive_load.verbosity_band.1", high)?;
        if low > high {
            return Err(ValidationError::invalid_format(
                "cognitive_load.verbosity_band",
                "lower bound exceeds upper bound",
            ));
        }

        check_unit("cognitive_load.optimal_extraneous_ceiling", self.optimal_extraneous_ceiling)?;
        check_unit("cognitive_load.underload_ratio", self.underload_ratio)?;
        check_unit("cognitive_load.high_extraneous_threshold", self.high_extraneous_threshold)?;
        check_unit("cognitive_load.low_germane_threshold", self.low_germane_threshold)?;
        check_positive("cognitive_load.efficiency_epsilon", self.efficiency_epsilon)?;
        check_positive("cognitive_load.max_total_load", self.max_total_load)?;
        check_unit("cognitive_load.overload_penalty", self.overload_penalty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ScoringParameters::default().validate().is_ok());
        assert!(CognitiveLoadParameters::default().validate().is_ok());
    }

    #[test]
    fn partial_overrides_keep_defaults() {
        let params: ScoringParameters =
            serde_json::from_str(r#"{"competency": {"zpd_offset": 0.0}}"#).unwrap();
        assert_eq!(params.competency.zpd_offset, 0.0);
        assert_eq!(params.competency.sharpness, 2.0);
        assert_eq!(params.similarity, SimilarityParameters::default());
    }

    #[test]
    fn unbalanced_blend_is_rejected() {
        let params = SimilarityParameters {
            cosine_weight: 0.7,
            distance_weight: 0.4,
        };
        assert!(matches!(
            params.validate(),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn non_positive_sharpness_is_rejected() {
        let params = CompetencyParameters {
            sharpness: 0.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn inverted_adaptive_thresholds_are_rejected() {
        let params = AdaptiveThresholds {
            complementary_above: 0.2,
            similarity_below: 0.6,
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn inverted_verbosity_band_is_rejected() {
        let params = CognitiveLoadParameters {
            verbosity_band: (0.9, 0.2),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }
}
