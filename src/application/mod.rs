//! Application layer - Commands, results and the recommendation service.
//!
//! This layer turns requests into domain operations. It owns the only
//! mutable engine state (the aggregation weights) and resolves request
//! defaults from configuration.

mod commands;
mod recommendation_service;

pub use commands::{
    ExplainRecommendationCommand, ExplainRecommendationResult, ForecastLevelCommand,
    ForecastLevelResult, LearnerInput, RankByCognitiveLoadCommand, RankByCognitiveLoadResult,
    RankPersonasCommand, RankPersonasResult, TuneWeightsCommand, TuneWeightsResult,
};
pub use recommendation_service::RecommendationService;
