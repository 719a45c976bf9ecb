//! Ranker - orders the catalog for a learner.
//!
//! Both rankings score every catalog entry independently and then apply a
//! stable descending sort, so ties keep catalog order and the sequential and
//! parallel execution modes return identical results.

use std::cmp::Ordering;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    AggregationWeights, CognitiveLoadCalculator, CognitiveLoadResult, RecommendationAggregator,
    ScoreBreakdown, Strategy, TaskContext,
};
use crate::domain::vectors::{PersonaCatalog, PersonaId, PersonaVector, UserVector};

/// How catalog entries are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingExecution {
    #[default]
    Sequential,
    /// Scores entries on the rayon thread pool.
    Parallel,
}

/// One entry of a recommendation ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPersona {
    pub persona_id: PersonaId,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// One entry of a cognitive-load ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CltRankedPersona {
    pub persona_id: PersonaId,
    pub clt_score: f64,
    pub clt_analysis: CognitiveLoadResult,
}

/// Ranks catalogs with a fixed aggregator, load calculator and execution mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ranker {
    aggregator: RecommendationAggregator,
    load: CognitiveLoadCalculator,
    execution: RankingExecution,
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

impl Ranker {
    pub fn new(
        aggregator: RecommendationAggregator,
        load: CognitiveLoadCalculator,
        execution: RankingExecution,
    ) -> Self {
        Self {
            aggregator,
            load,
            execution,
        }
    }

    pub fn execution(&self) -> RankingExecution {
        self.execution
    }

    pub fn aggregator(&self) -> &RecommendationAggregator {
        &self.aggregator
    }

    pub fn load_calculator(&self) -> &CognitiveLoadCalculator {
        &self.load
    }

    fn map_catalog<T, F>(&self, catalog: &PersonaCatalog, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&PersonaVector) -> T + Sync + Send,
    {
        match self.execution {
            RankingExecution::Sequential => catalog.iter().map(f).collect(),
            RankingExecution::Parallel => catalog.as_slice().par_iter().map(f).collect(),
        }
    }

    /// Scores every persona and returns the best `top_k`.
    ///
    /// # Edge Cases
    /// - `top_k` larger than the catalog returns the whole catalog
    /// - `top_k == 0` returns an empty list
    pub fn rank(
        &self,
        catalog: &PersonaCatalog,
        user: &UserVector,
        context: &TaskContext,
        weights: &AggregationWeights,
        strategy: Strategy,
        top_k: usize,
    ) -> Vec<RankedPersona> {
        let mut ranked = self.map_catalog(catalog, |persona| {
            let breakdown = self.aggregator.score(user, persona, context, strategy, weights);
            RankedPersona {
                persona_id: persona.id(),
                score: breakdown.total_score,
                breakdown,
            }
        });

        ranked.sort_by(|a, b| descending(a.score, b.score));
        ranked.truncate(top_k);

        debug!(
            candidates = catalog.len(),
            returned = ranked.len(),
            strategy = %strategy,
            top = ?ranked.first().map(|r| r.persona_id),
            "Ranked personas"
        );
        ranked
    }

    /// Orders the catalog by cognitive-load ranking score.
    pub fn rank_by_cognitive_load(
        &self,
        catalog: &PersonaCatalog,
        user: &UserVector,
        task_complexity: f64,
        top_k: usize,
    ) -> Vec<CltRankedPersona> {
        let mut ranked = self.map_catalog(catalog, |persona| {
            let analysis = self.load.analyze(user, persona, task_complexity);
            CltRankedPersona {
                persona_id: persona.id(),
                clt_score: self.load.ranking_score(&analysis),
                clt_analysis: analysis,
            }
        });

        ranked.sort_by(|a, b| descending(a.clt_score, b.clt_score));
        ranked.truncate(top_k);

        debug!(
            candidates = catalog.len(),
            returned = ranked.len(),
            top = ?ranked.first().map(|r| r.persona_id),
            "Ranked personas by cognitive load"
        );
        ranked
    }
}
