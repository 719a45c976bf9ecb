//! Request and response types of the recommendation service.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PersonaCategory, SkillLevel};
use crate::domain::scoring::{
    AggregationWeights, CltRankedPersona, Feedback, RankedPersona, ScoreBreakdown, Strategy,
    TaskContext,
};
use crate::domain::stats::LevelDistribution;
use crate::domain::vectors::{CompetencyProfile, PersonaId, UserVector};

/// A learner given either as a full vector or as a competency profile.
///
/// Objects carrying exactly the ten vector coordinates are read as a
/// vector; objects using only profile keys are read as a profile with
/// defaults for missing keys. Anything else is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LearnerInput {
    Vector(UserVector),
    Profile(CompetencyProfile),
}

impl LearnerInput {
    pub fn to_vector(&self) -> UserVector {
        match self {
            LearnerInput::Vector(vector) => *vector,
            LearnerInput::Profile(profile) => UserVector::from_profile(profile),
        }
    }
}

impl From<UserVector> for LearnerInput {
    fn from(vector: UserVector) -> Self {
        LearnerInput::Vector(vector)
    }
}

impl From<CompetencyProfile> for LearnerInput {
    fn from(profile: CompetencyProfile) -> Self {
        LearnerInput::Profile(profile)
    }
}

/// Command to rank the catalog for a learner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankPersonasCommand {
    pub learner: LearnerInput,
    /// Falls back to the configured default context.
    #[serde(default)]
    pub context: Option<TaskContext>,
    /// Falls back to the configured default.
    #[serde(default)]
    pub top_k: Option<usize>,
    #[serde(default)]
    pub strategy: Strategy,
    /// Restricts ranking to one persona category.
    #[serde(default)]
    pub category: Option<PersonaCategory>,
}

impl RankPersonasCommand {
    pub fn new(learner: impl Into<LearnerInput>) -> Self {
        Self {
            learner: learner.into(),
            context: None,
            top_k: None,
            strategy: Strategy::default(),
            category: None,
        }
    }

    pub fn with_context(mut self, context: TaskContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_category(mut self, category: PersonaCategory) -> Self {
        self.category = Some(category);
        self
    }
}

/// Result of a recommendation ranking.
#[derive(Debug, Clone, Serialize)]
pub struct RankPersonasResult {
    pub strategy: Strategy,
    pub context: TaskContext,
    /// Weight snapshot every entry was scored with.
    pub weights: AggregationWeights,
    pub rankings: Vec<RankedPersona>,
}

/// Command to rank the catalog by cognitive load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankByCognitiveLoadCommand {
    pub learner: LearnerInput,
    #[serde(default)]
    pub task_complexity: Option<f64>,
    #[serde(default)]
    pub top_k: Option<usize>,
    #[serde(default)]
    pub category: Option<PersonaCategory>,
}

/// Result of a cognitive-load ranking.
#[derive(Debug, Clone, Serialize)]
pub struct RankByCognitiveLoadResult {
    pub task_complexity: f64,
    pub rankings: Vec<CltRankedPersona>,
}

/// Command to explain one persona's score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainRecommendationCommand {
    pub learner: LearnerInput,
    pub persona_id: String,
    #[serde(default)]
    pub context: Option<TaskContext>,
    #[serde(default)]
    pub strategy: Strategy,
}

/// Explanation of one persona's score.
#[derive(Debug, Clone, Serialize)]
pub struct ExplainRecommendationResult {
    pub persona_id: PersonaId,
    pub explanation: String,
    pub breakdown: ScoreBreakdown,
}

/// Command to adjust the aggregation weights from feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuneWeightsCommand {
    pub learner: LearnerInput,
    #[serde(default)]
    pub feedback: Vec<Feedback>,
}

/// Weights before and after a tuning step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TuneWeightsResult {
    pub previous: AggregationWeights,
    pub updated: AggregationWeights,
    pub success_rate: f64,
}

/// Command to project a learner's skill level forward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ForecastLevelCommand {
    pub start: SkillLevel,
    pub steps: usize,
}

/// Projected level distribution.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ForecastLevelResult {
    pub start: SkillLevel,
    pub steps: usize,
    pub distribution: LevelDistribution,
    pub most_likely: SkillLevel,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::KnowledgeDomain;

    #[test]
    fn learner_input_reads_full_vector() {
        let json = r#"{
            "technical_skill": 0.9, "domain_knowledge": 0.8, "ai_experience": 0.7,
            "learning_goal": 0.2, "procedural_knowledge": 0.6, "declarative_knowledge": 0.5,
            "conditional_knowledge": 0.4, "cognitive_capacity": 0.9,
            "pattern_recognition": 0.8, "abstraction_level": 0.7
        }"#;
        let input: LearnerInput = serde_json::from_str(json).unwrap();
        assert!(matches!(input, LearnerInput::Vector(_)));
        assert_eq!(input.to_vector().technical_skill(), 0.9);
    }

    #[test]
    fn learner_input_reads_profile_with_defaults() {
        let input: LearnerInput =
            serde_json::from_str(r#"{"score": 90, "domain": "technical", "level": "expert"}"#).unwrap();
        match &input {
            LearnerInput::Profile(profile) => {
                assert_eq!(profile.domain, KnowledgeDomain::Technical);
                assert_eq!(profile.level, SkillLevel::Expert);
            }
            other => panic!("expected profile, got {:?}", other),
        }

        let empty: LearnerInput = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, LearnerInput::Profile(CompetencyProfile::default()));
    }

    #[test]
    fn learner_input_rejects_misspelled_keys() {
        let result = serde_json::from_str::<LearnerInput>(r#"{"technical_skil": 0.9}"#);
        assert!(result.is_err());
    }

    #[test]
    fn learner_input_rejects_incomplete_vector() {
        let json = r#"{
            "technical_skill": 0.9, "domain_knowledge": 0.8, "ai_experience": 0.7,
            "learning_goal": 0.2, "procedural_knowledge": 0.6, "declarative_knowledge": 0.5,
            "conditional_knowledge": 0.4, "cognitive_capacity": 0.9,
            "pattern_recognition": 0.8
        }"#;
        assert!(serde_json::from_str::<LearnerInput>(json).is_err());
    }

    #[test]
    fn rank_command_fills_defaults() {
        let cmd: RankPersonasCommand =
            serde_json::from_str(r#"{"learner": {"score": 40}, "strategy": "similarity"}"#).unwrap();
        assert_eq!(cmd.strategy, Strategy::Similarity);
        assert!(cmd.context.is_none());
        assert!(cmd.top_k.is_none());
        assert!(cmd.category.is_none());
    }
}
