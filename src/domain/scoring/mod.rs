//! Scoring Module - per-persona scoring, aggregation and ranking.
//!
//! # Components
//!
//! - `SimilarityScorer` - how closely a persona mirrors the learner
//! - `CompetencyMatcher` - zone-of-proximal-development fit
//! - `ComplementarityScorer` - how well a persona covers the learner's gaps
//! - `PerformancePredictor` - logistic estimate of task success
//! - `LearningTrajectoryEstimator` - expected learning gain over time
//! - `CognitiveLoadCalculator` - intrinsic, extraneous and germane load
//! - `RecommendationAggregator` - weighted, mode-dependent combination
//! - `Ranker` - catalog ordering by recommendation or load score
//!
//! All scorers are stateless apart from their parameters and return values
//! in `[0, 1]`.

mod aggregator;
mod cognitive_load;
mod competency;
mod complementarity;
mod parameters;
mod performance;
mod ranker;
mod similarity;
mod trajectory;
mod weights;

pub use aggregator::{
    AggregationMode, ComponentKind, ConfidenceInterval, RecommendationAggregator, ScoreBreakdown,
    ScoreComponents, Strategy, TaskContext,
};
pub use cognitive_load::{CognitiveLoadCalculator, CognitiveLoadResult, LoadAdvisory};
pub use competency::CompetencyMatcher;
pub use complementarity::ComplementarityScorer;
pub use parameters::{
    AdaptiveThresholds, CognitiveLoadParameters, CompetencyParameters, ComplementarityParameters,
    ConfidenceParameters, LogisticCoefficients, ScoringParameters, SimilarityParameters,
    TrajectoryParameters,
};
pub use performance::{sigmoid, PerformancePredictor};
pub use ranker::{CltRankedPersona, RankedPersona, Ranker, RankingExecution};
pub use similarity::{
    cosine_similarity, hybrid_similarity, persona_features, user_features, SimilarityScorer,
    SIMILARITY_FEATURES,
};
pub use trajectory::LearningTrajectoryEstimator;
pub use weights::{
    AggregationWeights, Feedback, LEARNING_ORIENTED_THRESHOLD, POSITIVE_RATING_THRESHOLD,
};
