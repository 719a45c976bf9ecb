//! RecommendationService - entry point for ranking, explanation and tuning.
//!
//! Owns the catalog, the configured scorers and the only mutable state in
//! the engine: the aggregation weights. Weight updates go through a single
//! write lock; every read takes a full snapshot of the four weights, so a
//! ranking never mixes weights from before and after an update.

use std::borrow::Cow;
use std::sync::{PoisonError, RwLock};

use tracing::{debug, info};

use super::commands::{
    ExplainRecommendationCommand, ExplainRecommendationResult, ForecastLevelCommand,
    ForecastLevelResult, RankByCognitiveLoadCommand, RankByCognitiveLoadResult,
    RankPersonasCommand, RankPersonasResult, TuneWeightsCommand, TuneWeightsResult,
};
use crate::config::{ConfigError, EngineConfig, RankingConfig};
use crate::domain::foundation::{DomainError, PersonaCategory, UnitInterval};
use crate::domain::scoring::{
    AggregationWeights, CognitiveLoadCalculator, Feedback, RecommendationAggregator, Ranker,
    TaskContext,
};
use crate::domain::stats::TransitionMatrix;
use crate::domain::vectors::{CompetencyAssessor, DualDomainAssessment, PersonaCatalog, Responses};

/// Scores, ranks and explains personas for learners.
pub struct RecommendationService {
    catalog: PersonaCatalog,
    ranker: Ranker,
    ranking: RankingConfig,
    default_context: TaskContext,
    transitions: TransitionMatrix,
    weights: RwLock<AggregationWeights>,
}

impl RecommendationService {
    /// Creates a service over the reference catalog.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationFailed` if the configuration is invalid.
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        Self::with_catalog(config, PersonaCatalog::reference().clone())
    }

    /// Creates a service over a custom catalog.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationFailed` if the configuration is invalid.
    pub fn with_catalog(config: &EngineConfig, catalog: PersonaCatalog) -> Result<Self, ConfigError> {
        config.validate()?;

        let ranker = Ranker::new(
            RecommendationAggregator::new(&config.scoring),
            CognitiveLoadCalculator::new(config.cognitive_load),
            config.ranking.execution_for(catalog.len()),
        );

        Ok(Self {
            default_context: config.ranking.default_context()?,
            ranking: config.ranking.clone(),
            transitions: TransitionMatrix::reference(),
            weights: RwLock::new(config.scoring.weights),
            catalog,
            ranker,
        })
    }

    /// Replaces the level transition matrix used by forecasts.
    pub fn with_transitions(mut self, transitions: TransitionMatrix) -> Self {
        self.transitions = transitions;
        self
    }

    pub fn catalog(&self) -> &PersonaCatalog {
        &self.catalog
    }

    pub fn ranker(&self) -> &Ranker {
        &self.ranker
    }

    /// Snapshot of the current aggregation weights.
    pub fn current_weights(&self) -> AggregationWeights {
        *self.weights.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn scoped_catalog(&self, category: Option<PersonaCategory>) -> Result<Cow<'_, PersonaCatalog>, DomainError> {
        match category {
            Some(category) => Ok(Cow::Owned(self.catalog.filter_category(category)?)),
            None => Ok(Cow::Borrowed(&self.catalog)),
        }
    }

    /// Ranks the catalog, or one category of it, for a learner.
    ///
    /// # Errors
    ///
    /// Returns `EmptyField` if the requested category has no personas.
    pub fn rank(&self, cmd: RankPersonasCommand) -> Result<RankPersonasResult, DomainError> {
        let user = cmd.learner.to_vector();
        let context = cmd.context.unwrap_or(self.default_context);
        let top_k = cmd.top_k.unwrap_or(self.ranking.default_top_k);
        let weights = self.current_weights();
        let catalog = self.scoped_catalog(cmd.category)?;

        let rankings = self
            .ranker
            .rank(&catalog, &user, &context, &weights, cmd.strategy, top_k);

        Ok(RankPersonasResult {
            strategy: cmd.strategy,
            context,
            weights,
            rankings,
        })
    }

    /// Ranks the catalog by cognitive-load score.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if `task_complexity` lies outside `[0, 1]`
    /// - `EmptyField` if the requested category has no personas
    pub fn rank_by_cognitive_load(
        &self,
        cmd: RankByCognitiveLoadCommand,
    ) -> Result<RankByCognitiveLoadResult, DomainError> {
        let task_complexity = match cmd.task_complexity {
            Some(value) => UnitInterval::try_new("task_complexity", value)?.value(),
            None => self.default_context.task_complexity(),
        };
        let user = cmd.learner.to_vector();
        let top_k = cmd.top_k.unwrap_or(self.ranking.default_top_k);
        let catalog = self.scoped_catalog(cmd.category)?;

        let rankings = self
            .ranker
            .rank_by_cognitive_load(&catalog, &user, task_complexity, top_k);

        Ok(RankByCognitiveLoadResult {
            task_complexity,
            rankings,
        })
    }

    /// Explains one persona's score for a learner.
    ///
    /// # Errors
    ///
    /// Returns `PersonaNotFound` if the catalog has no persona with that id.
    pub fn explain(
        &self,
        cmd: ExplainRecommendationCommand,
    ) -> Result<ExplainRecommendationResult, DomainError> {
        let persona = self.catalog.lookup(&cmd.persona_id)?;
        let user = cmd.learner.to_vector();
        let context = cmd.context.unwrap_or(self.default_context);
        let weights = self.current_weights();

        let breakdown = self
            .ranker
            .aggregator()
            .score(&user, persona, &context, cmd.strategy, &weights);

        debug!(persona = %persona.id(), total = breakdown.total_score, "Explained recommendation");

        Ok(ExplainRecommendationResult {
            persona_id: persona.id(),
            explanation: breakdown.explanation(),
            breakdown,
        })
    }

    /// Applies one round of feedback to the stored weights.
    ///
    /// The read-modify-write happens under the write lock, so concurrent
    /// tuning calls are applied one after another.
    pub fn tune_weights(&self, cmd: TuneWeightsCommand) -> TuneWeightsResult {
        let user = cmd.learner.to_vector();
        let success_rate = Feedback::success_rate(&cmd.feedback);

        let mut weights = self.weights.write().unwrap_or_else(PoisonError::into_inner);
        let previous = *weights;
        let updated = previous.tuned(user.learning_goal(), &cmd.feedback);
        *weights = updated;
        drop(weights);

        info!(
            feedback = cmd.feedback.len(),
            success_rate,
            alpha = updated.alpha,
            beta = updated.beta,
            gamma = updated.gamma,
            delta = updated.delta,
            "Updated aggregation weights"
        );

        TuneWeightsResult {
            previous,
            updated,
            success_rate,
        }
    }

    /// Projects a skill level `steps` transitions forward.
    pub fn forecast_level(&self, cmd: ForecastLevelCommand) -> ForecastLevelResult {
        let distribution = self.transitions.project(cmd.start, cmd.steps);
        ForecastLevelResult {
            start: cmd.start,
            steps: cmd.steps,
            most_likely: distribution.most_likely(),
            distribution,
        }
    }

    /// Scores dual-domain survey responses.
    pub fn assess(&self, responses: &Responses) -> DualDomainAssessment {
        CompetencyAssessor::assess(responses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, KnowledgeDomain, SkillLevel};
    use crate::domain::scoring::{Feedback, Strategy};
    use crate::domain::vectors::{CompetencyProfile, PersonaId, UserVector};
    use std::sync::Arc;
    use std::thread;

    fn service() -> RecommendationService {
        RecommendationService::new(&EngineConfig::default()).unwrap()
    }

    fn learner(goal: f64) -> UserVector {
        UserVector::new([0.4, 0.5, 0.3, goal, 0.4, 0.4, 0.4, 0.7, 0.3, 0.4])
    }

    #[test]
    fn rank_uses_configured_defaults() {
        let result = service().rank(RankPersonasCommand::new(learner(0.5))).unwrap();
        assert_eq!(result.rankings.len(), 5);
        assert_eq!(result.context, TaskContext::default());
        assert_eq!(result.weights, AggregationWeights::default());
    }

    #[test]
    fn rank_can_be_scoped_to_a_category() {
        let result = service()
            .rank(
                RankPersonasCommand::new(learner(0.5))
                    .with_category(PersonaCategory::Technology)
                    .with_top_k(10),
            )
            .unwrap();
        assert_eq!(result.rankings.len(), 5);
        assert!(result
            .rankings
            .iter()
            .all(|r| r.persona_id.category() == PersonaCategory::Technology));
    }

    #[test]
    fn explain_unknown_persona_is_not_found() {
        let err = service()
            .explain(ExplainRecommendationCommand {
                learner: learner(0.5).into(),
                persona_id: "wizard".to_string(),
                context: None,
                strategy: Strategy::Adaptive,
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PersonaNotFound);
        assert_eq!(err.details.get("persona_id").map(String::as_str), Some("wizard"));
    }

    #[test]
    fn explain_known_persona_includes_total() {
        let result = service()
            .explain(ExplainRecommendationCommand {
                learner: CompetencyProfile::new(70.0, KnowledgeDomain::Technical, SkillLevel::Proficient).into(),
                persona_id: "tech_proficient".to_string(),
                context: None,
                strategy: Strategy::Similarity,
            })
            .unwrap();
        assert_eq!(result.persona_id, PersonaId::TechProficient);
        assert!(result
            .explanation
            .ends_with(&format!("Total score: {:.2}", result.breakdown.total_score)));
    }

    #[test]
    fn tuning_is_stored_and_keeps_weights_normalised() {
        let service = service();
        let result = service.tune_weights(TuneWeightsCommand {
            learner: learner(0.9).into(),
            feedback: vec![Feedback::new(5.0), Feedback::new(4.0), Feedback::new(2.0)],
        });

        assert_eq!(result.previous, AggregationWeights::default());
        assert!((result.success_rate - 2.0 / 3.0).abs() < 1e-12);
        assert!(result.updated.alpha > result.previous.alpha);
        assert!((result.updated.sum() - 1.0).abs() < 1e-9);
        assert_eq!(service.current_weights(), result.updated);

        let ranked = service.rank(RankPersonasCommand::new(learner(0.9))).unwrap();
        assert_eq!(ranked.weights, result.updated);
    }

    #[test]
    fn concurrent_tuning_applies_every_update() {
        let service = Arc::new(service());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = Arc::clone(&service);
                thread::spawn(move || {
                    service.tune_weights(TuneWeightsCommand {
                        learner: learner(0.2).into(),
                        feedback: vec![Feedback::new(5.0)],
                    })
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut expected = AggregationWeights::default();
        for _ in 0..8 {
            expected = expected.tuned(0.2, &[Feedback::new(5.0)]);
        }
        let actual = service.current_weights();
        assert!((actual.beta - expected.beta).abs() < 1e-9);
        assert!((actual.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn cognitive_load_rejects_out_of_range_complexity() {
        let err = service()
            .rank_by_cognitive_load(RankByCognitiveLoadCommand {
                learner: learner(0.5).into(),
                task_complexity: Some(1.5),
                top_k: None,
                category: None,
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfRange);
    }

    #[test]
    fn forecast_expert_stays_expert() {
        let result = service().forecast_level(ForecastLevelCommand {
            start: SkillLevel::Expert,
            steps: 5,
        });
        assert_eq!(result.most_likely, SkillLevel::Expert);
        assert!(result.distribution.probability(SkillLevel::Expert) >= 0.9);
        assert!((result.distribution.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let mut config = EngineConfig::default();
        config.ranking.default_top_k = 0;
        assert!(RecommendationService::new(&config).is_err());
    }
}
