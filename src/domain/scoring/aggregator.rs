//! Recommendation Aggregator - combines the component scores.
//!
//! Two scoring modes exist:
//!
//! - **similarity**: `α·S + β·C + γ·P + δ·L` for learners who want a persona
//!   that works like they do
//! - **complementary**: `α·(1 - S) + β·D + γ·P + δ·L` for learners who want
//!   a persona that covers their gaps
//!
//! The adaptive strategy picks a mode from the learning goal and blends both
//! in the middle band.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    AdaptiveThresholds, AggregationWeights, CompetencyMatcher, ComplementarityScorer,
    ConfidenceParameters, LearningTrajectoryEstimator, PerformancePredictor, ScoringParameters,
    SimilarityScorer,
};
use crate::domain::foundation::{clip_unit, UnitInterval, ValidationError};
use crate::domain::vectors::{PersonaVector, UserVector};

/// Requested scoring strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    Adaptive,
    Similarity,
    Complementary,
}

impl Strategy {
    pub fn all() -> &'static [Strategy] {
        &[Strategy::Adaptive, Strategy::Similarity, Strategy::Complementary]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Adaptive => "adaptive",
            Strategy::Similarity => "similarity",
            Strategy::Complementary => "complementary",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::all()
            .iter()
            .copied()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "strategy",
                    format!("unknown strategy '{}', expected adaptive, similarity or complementary", s),
                )
            })
    }
}

/// Mode a score was actually computed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMode {
    Similarity,
    Complementary,
    Hybrid,
}

impl AggregationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationMode::Similarity => "similarity",
            AggregationMode::Complementary => "complementary",
            AggregationMode::Hybrid => "hybrid",
        }
    }

    /// Human-readable strategy label.
    pub fn label(&self) -> &'static str {
        match self {
            AggregationMode::Similarity => "Similarity-Based",
            AggregationMode::Complementary => "Complementary",
            AggregationMode::Hybrid => "Hybrid (Adaptive)",
        }
    }
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Deserialize)]
struct RawTaskContext {
    #[serde(default = "default_half")]
    task_complexity: f64,
    #[serde(default = "default_half")]
    time_factor: f64,
}

fn default_half() -> f64 {
    0.5
}

/// Task difficulty and elapsed-time share for a scoring request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTaskContext")]
pub struct TaskContext {
    task_complexity: f64,
    time_factor: f64,
}

impl TaskContext {
    /// # Errors
    ///
    /// Returns `OutOfRange` if either value lies outside `[0, 1]`.
    pub fn try_new(task_complexity: f64, time_factor: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            task_complexity: UnitInterval::try_new("task_complexity", task_complexity)?.value(),
            time_factor: UnitInterval::try_new("time_factor", time_factor)?.value(),
        })
    }

    pub fn task_complexity(&self) -> f64 {
        self.task_complexity
    }

    pub fn time_factor(&self) -> f64 {
        self.time_factor
    }
}

impl Default for TaskContext {
    fn default() -> Self {
        Self {
            task_complexity: default_half(),
            time_factor: default_half(),
        }
    }
}

impl TryFrom<RawTaskContext> for TaskContext {
    type Error = ValidationError;

    fn try_from(raw: RawTaskContext) -> Result<Self, Self::Error> {
        Self::try_new(raw.task_complexity, raw.time_factor)
    }
}

/// Names of the entries of [`ScoreComponents`], in explanation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Similarity,
    Dissimilarity,
    CompetencyMatch,
    Complementarity,
    PerformancePrediction,
    LearningTrajectory,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Similarity => "similarity",
            ComponentKind::Dissimilarity => "dissimilarity",
            ComponentKind::CompetencyMatch => "competency_match",
            ComponentKind::Complementarity => "complementarity",
            ComponentKind::PerformancePrediction => "performance_prediction",
            ComponentKind::LearningTrajectory => "learning_trajectory",
        }
    }

    /// One-sentence reason naming this component and its value.
    pub fn describe(&self, value: f64) -> String {
        match self {
            ComponentKind::Similarity => {
                format!("Closely mirrors your competency profile (similarity: {:.2})", value)
            }
            ComponentKind::Dissimilarity => {
                format!("Offers a perspective unlike your own (dissimilarity: {:.2})", value)
            }
            ComponentKind::CompetencyMatch => {
                format!("Pitched right at your level for an optimal challenge (match: {:.2})", value)
            }
            ComponentKind::Complementarity => {
                format!("Covers the gaps in your profile (complementarity: {:.2})", value)
            }
            ComponentKind::PerformancePrediction => {
                format!("High expected performance (prediction: {:.2})", value)
            }
            ComponentKind::LearningTrajectory => {
                format!("Strong learning potential (trajectory: {:.2})", value)
            }
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Every component score for one learner/persona pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub similarity: f64,
    pub dissimilarity: f64,
    pub competency_match: f64,
    pub complementarity: f64,
    pub performance_prediction: f64,
    pub learning_trajectory: f64,
}

impl ScoreComponents {
    pub fn entries(&self) -> [(ComponentKind, f64); 6] {
        [
            (ComponentKind::Similarity, self.similarity),
            (ComponentKind::Dissimilarity, self.dissimilarity),
            (ComponentKind::CompetencyMatch, self.competency_match),
            (ComponentKind::Complementarity, self.complementarity),
            (ComponentKind::PerformancePrediction, self.performance_prediction),
            (ComponentKind::LearningTrajectory, self.learning_trajectory),
        ]
    }

    /// Largest component. Ties go to the earliest entry.
    pub fn dominant(&self) -> (ComponentKind, f64) {
        let entries = self.entries();
        let mut best = entries[0];
        for entry in &entries[1..] {
            if entry.1 > best.1 {
                best = *entry;
            }
        }
        best
    }
}

/// Symmetric interval around the total score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
    pub std_dev: f64,
}

/// Full result of scoring one persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub total_score: f64,
    pub mode: AggregationMode,
    pub strategy: String,
    pub components: ScoreComponents,
    pub weights: AggregationWeights,
    pub confidence_interval: ConfidenceInterval,
}

impl ScoreBreakdown {
    /// Sentence naming the dominant component, followed by the total.
    pub fn explanation(&self) -> String {
        let (kind, value) = self.components.dominant();
        format!("{}. Total score: {:.2}", kind.describe(value), self.total_score)
    }
}

/// Runs the five scorers and combines them into a [`ScoreBreakdown`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationAggregator {
    similarity: SimilarityScorer,
    competency: CompetencyMatcher,
    complementarity: ComplementarityScorer,
    performance: PerformancePredictor,
    trajectory: LearningTrajectoryEstimator,
    confidence: ConfidenceParameters,
    adaptive: AdaptiveThresholds,
}

impl RecommendationAggregator {
    pub fn new(params: &ScoringParameters) -> Self {
        Self {
            similarity: SimilarityScorer::new(params.similarity),
            competency: CompetencyMatcher::new(params.competency),
            complementarity: ComplementarityScorer::new(params.complementarity),
            performance: PerformancePredictor::new(params.performance),
            trajectory: LearningTrajectoryEstimator::new(params.trajectory),
            confidence: params.confidence,
            adaptive: params.adaptive,
        }
    }

    /// Mode used for `strategy` given the learner's goal.
    pub fn resolve_mode(&self, strategy: Strategy, user: &UserVector) -> AggregationMode {
        match strategy {
            Strategy::Similarity => AggregationMode::Similarity,
            Strategy::Complementary => AggregationMode::Complementary,
            Strategy::Adaptive => {
                let goal = user.learning_goal();
                if goal > self.adaptive.complementary_above {
                    AggregationMode::Complementary
                } else if goal < self.adaptive.similarity_below {
                    AggregationMode::Similarity
                } else {
                    AggregationMode::Hybrid
                }
            }
        }
    }

    pub fn components(
        &self,
        user: &UserVector,
        persona: &PersonaVector,
        context: &TaskContext,
    ) -> ScoreComponents {
        let similarity = self.similarity.score(user, persona);
        ScoreComponents {
            similarity,
            dissimilarity: 1.0 - similarity,
            competency_match: self.competency.score(user, persona),
            complementarity: self.complementarity.score(user, persona),
            performance_prediction: self.performance.predict(
                user,
                persona,
                similarity,
                context.task_complexity(),
            ),
            learning_trajectory: self.trajectory.estimate(user, persona, context.time_factor()),
        }
    }

    /// `total ± z·σ`, clipped to `[0, 1]`.
    pub fn confidence_interval(&self, total: f64) -> ConfidenceInterval {
        let half_width = self.confidence.z_score * self.confidence.std_dev;
        ConfidenceInterval {
            lower: clip_unit(total - half_width),
            upper: clip_unit(total + half_width),
            std_dev: self.confidence.std_dev,
        }
    }

    /// Scores one persona.
    ///
    /// # Algorithm
    /// similarity mode: `α·S + β·C + γ·P + δ·L`
    /// complementary mode: `α·(1 - S) + β·D + γ·P + δ·L`
    /// hybrid mode: `goal·complementary + (1 - goal)·similarity`
    pub fn score(
        &self,
        user: &UserVector,
        persona: &PersonaVector,
        context: &TaskContext,
        strategy: Strategy,
        weights: &AggregationWeights,
    ) -> ScoreBreakdown {
        let components = self.components(user, persona, context);
        let mode = self.resolve_mode(strategy, user);

        let shared = weights.gamma * components.performance_prediction
            + weights.delta * components.learning_trajectory;
        let similarity_total = weights.alpha * components.similarity
            + weights.beta * components.competency_match
            + shared;
        let complementary_total = weights.alpha * components.dissimilarity
            + weights.beta * components.complementarity
            + shared;

        let total = clip_unit(match mode {
            AggregationMode::Similarity => similarity_total,
            AggregationMode::Complementary => complementary_total,
            AggregationMode::Hybrid => {
                let goal = user.learning_goal();
                goal * complementary_total + (1.0 - goal) * similarity_total
            }
        });

        debug!(
            persona = %persona.id(),
            mode = %mode,
            total,
            "Scored persona"
        );

        ScoreBreakdown {
            total_score: total,
            mode,
            strategy: mode.label().to_string(),
            components,
            weights: *weights,
            confidence_interval: self.confidence_interval(total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vectors::{PersonaCatalog, PersonaId};

    fn user_with_goal(goal: f64) -> UserVector {
        UserVector::new([0.5, 0.5, 0.5, goal, 0.5, 0.5, 0.5, 0.75, 0.4, 0.5])
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn adaptive_mode_follows_learning_goal() {
        let aggregator = RecommendationAggregator::default();
        assert_eq!(
            aggregator.resolve_mode(Strategy::Adaptive, &user_with_goal(0.9)),
            AggregationMode::Complementary
        );
        assert_eq!(
            aggregator.resolve_mode(Strategy::Adaptive, &user_with_goal(0.1)),
            AggregationMode::Similarity
        );
        assert_eq!(
            aggregator.resolve_mode(Strategy::Adaptive, &user_with_goal(0.5)),
            AggregationMode::Hybrid
        );
        assert_eq!(
            aggregator.resolve_mode(Strategy::Similarity, &user_with_goal(0.9)),
            AggregationMode::Similarity
        );
    }

    #[test]
    fn similarity_mode_uses_weighted_sum() {
        let aggregator = RecommendationAggregator::default();
        let weights = AggregationWeights::default();
        let user = user_with_goal(0.5);
        let persona = PersonaCatalog::reference().get(PersonaId::TechCompetent).unwrap();
        let breakdown =
            aggregator.score(&user, persona, &TaskContext::default(), Strategy::Similarity, &weights);
        let c = breakdown.components;
        let expected = 0.30 * c.similarity
            + 0.35 * c.competency_match
            + 0.25 * c.performance_prediction
            + 0.10 * c.learning_trajectory;
        assert!(approx(breakdown.total_score, expected));
        assert_eq!(breakdown.strategy, "Similarity-Based");
    }

    #[test]
    fn hybrid_blends_both_modes_by_goal() {
        let aggregator = RecommendationAggregator::default();
        let weights = AggregationWeights::default();
        let user = user_with_goal(0.6);
        let persona = PersonaCatalog::reference().get(PersonaId::EduProficient).unwrap();
        let ctx = TaskContext::default();

        let sim = aggregator.score(&user, persona, &ctx, Strategy::Similarity, &weights);
        let comp = aggregator.score(&user, persona, &ctx, Strategy::Complementary, &weights);
        let hybrid = aggregator.score(&user, persona, &ctx, Strategy::Adaptive, &weights);

        assert_eq!(hybrid.mode, AggregationMode::Hybrid);
        assert_eq!(hybrid.strategy, "Hybrid (Adaptive)");
        let expected = 0.6 * comp.total_score + 0.4 * sim.total_score;
        assert!((hybrid.total_score - expected).abs() < 1e-9);
    }

    #[test]
    fn confidence_interval_is_symmetric_and_clipped() {
        let aggregator = RecommendationAggregator::default();
        let mid = aggregator.confidence_interval(0.5);
        assert!(approx(mid.lower, 0.5 - 0.098));
        assert!(approx(mid.upper, 0.5 + 0.098));
        assert_eq!(mid.std_dev, 0.05);

        let edge = aggregator.confidence_interval(0.95);
        assert_eq!(edge.upper, 1.0);
    }

    #[test]
    fn dominant_component_prefers_first_on_ties() {
        let components = ScoreComponents {
            similarity: 0.7,
            dissimilarity: 0.3,
            competency_match: 0.7,
            complementarity: 0.2,
            performance_prediction: 0.6,
            learning_trajectory: 0.1,
        };
        assert_eq!(components.dominant(), (ComponentKind::Similarity, 0.7));
    }

    #[test]
    fn explanation_names_dominant_component_and_total() {
        let aggregator = RecommendationAggregator::default();
        let user = user_with_goal(0.2);
        let persona = PersonaCatalog::reference().get(PersonaId::TechProficient).unwrap();
        let breakdown = aggregator.score(
            &user,
            persona,
            &TaskContext::default(),
            Strategy::Adaptive,
            &AggregationWeights::default(),
        );
        let explanation = breakdown.explanation();
        let (kind, value) = breakdown.components.dominant();

        assert!(explanation.starts_with(&kind.describe(value)));
        assert!(explanation.ends_with(&format!("Total score: {:.2}", breakdown.total_score)));
    }

    #[test]
    fn task_context_rejects_out_of_range() {
        assert!(TaskContext::try_new(1.2, 0.5).is_err());
        assert!(TaskContext::try_new(0.5, -0.1).is_err());
        let ctx: TaskContext = serde_json::from_str(r#"{"task_complexity": 0.8}"#).unwrap();
        assert_eq!(ctx.task_complexity(), 0.8);
        assert_eq!(ctx.time_factor(), 0.5);
        assert!(serde_json::from_str::<TaskContext>(r#"{"time_factor": 3.0}"#).is_err());
    }

    #[test]
    fn strategy_parses_from_str() {
        assert_eq!("complementary".parse::<Strategy>().unwrap(), Strategy::Complementary);
        assert!("random".parse::<Strategy>().is_err());
    }

    #[test]
    fn breakdown_round_trips_through_json() {
        let aggregator = RecommendationAggregator::default();
        let user = UserVector::new([0.13, 0.71, 0.29, 0.47, 0.33, 0.59, 0.21, 0.83, 0.37, 0.61]);
        let persona = PersonaCatalog::reference().get(PersonaId::EduAdvancedBeginner).unwrap();
        let breakdown = aggregator.score(
            &user,
            persona,
            &TaskContext::try_new(0.37, 0.71).unwrap(),
            Strategy::Adaptive,
            &AggregationWeights::default(),
        );
        let json = serde_json::to_string(&breakdown).unwrap();
        let back: ScoreBreakdown = serde_json::from_str(&json).unwrap();
        assert_eq!(back, breakdown);
    }
}
