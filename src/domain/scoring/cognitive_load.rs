//! Cognitive Load Calculator - intrinsic, extraneous and germane load.
//!
//! Splits the mental effort a learner spends on a persona's output into:
//!
//! - **intrinsic** - inherent task difficulty relative to expertise
//! - **extraneous** - effort wasted on poor presentation
//! - **germane** - effort that builds understanding
//!
//! `total = intrinsic + extraneous - germane` (germane load helps, so it is
//! subtracted). The result carries typed advisories that render as the
//! warning and recommendation strings shown to users.

use serde::{Deserialize, Serialize};

use super::CognitiveLoadParameters;
use crate::domain::foundation::{clip_range, clip_unit};
use crate::domain::vectors::{PersonaVector, UserVector};

/// Observation attached to a load analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadAdvisory {
    /// Total load exceeds capacity by `amount`.
    Overload { amount: f64 },
    /// Capacity is largely unused.
    Underload,
    HighExtraneous { load: f64 },
    LowGermane { load: f64 },
    OptimalZone,
}

impl LoadAdvisory {
    /// Warning text, if this advisory is a warning.
    pub fn warning(&self) -> Option<String> {
        match self {
            LoadAdvisory::Overload { amount } => {
                Some(format!("Cognitive overload ({:.2} over capacity)", amount))
            }
            LoadAdvisory::Underload => {
                Some("Underutilized capacity - task may be too easy".to_string())
            }
            LoadAdvisory::HighExtraneous { load } => {
                Some(format!("High extraneous load ({:.2})", load))
            }
            LoadAdvisory::LowGermane { load } => Some(format!("Low germane load ({:.2})", load)),
            LoadAdvisory::OptimalZone => None,
        }
    }

    /// Recommendation text.
    pub fn recommendation(&self) -> &'static str {
        match self {
            LoadAdvisory::Overload { .. } => "Consider an easier persona or a simpler task",
            LoadAdvisory::Underload => "Consider a more challenging persona",
            LoadAdvisory::HighExtraneous { .. } => {
                "Persona may have poor organization or excessive verbosity"
            }
            LoadAdvisory::LowGermane { .. } => {
                "Limited learning support - consider a pedagogical persona"
            }
            LoadAdvisory::OptimalZone => "Optimal learning zone - ideal match",
        }
    }
}

/// Full load decomposition for one learner/persona pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CognitiveLoadResult {
    pub intrinsic_load: f64,
    pub extraneous_load: f64,
    pub germane_load: f64,
    /// `intrinsic + extraneous - germane`, clipped to `[0, max_total_load]`.
    pub total_load: f64,
    /// `intrinsic + germane`.
    pub productive_load: f64,
    pub cognitive_capacity: f64,
    pub load_efficiency: f64,
    pub in_optimal_zone: bool,
    pub overloaded: bool,
    pub underloaded: bool,
    pub overload_amount: f64,
    pub advisories: Vec<LoadAdvisory>,
}

impl CognitiveLoadResult {
    pub fn warnings(&self) -> Vec<String> {
        self.advisories.iter().filter_map(LoadAdvisory::warning).collect()
    }

    pub fn recommendations(&self) -> Vec<&'static str> {
        self.advisories.iter().map(LoadAdvisory::recommendation).collect()
    }
}

/// Computes load decompositions and the load-based ranking score.
#[derive(Debug, Clone, Copy, Default)]
pub struct CognitiveLoadCalculator {
    params: CognitiveLoadParameters,
}

impl CognitiveLoadCalculator {
    pub fn new(params: CognitiveLoadParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &CognitiveLoadParameters {
        &self.params
    }

    /// `task_complexity · (1 - expertise)`, where expertise blends technical
    /// skill, domain knowledge and procedural knowledge.
    pub fn intrinsic_load(&self, user: &UserVector, task_complexity: f64) -> f64 {
        let [w_tech, w_domain, w_proc] = self.params.expertise_weights;
        let expertise = w_tech * user.technical_skill()
            + w_domain * user.domain_knowledge()
            + w_proc * user.procedural_knowledge();
        clip_unit(task_complexity * (1.0 - expertise))
    }

    /// Distance of verbosity from the penalty-free band.
    pub fn verbosity_penalty(&self, verbosity: f64) -> f64 {
        let (low, high) = self.params.verbosity_band;
        if verbosity < low {
            low - verbosity
        } else if verbosity > high {
            verbosity - high
        } else {
            0.0
        }
    }

    /// Poor organisation, verbosity outside the band and part of the code
    /// complexity.
    pub fn extraneous_load(&self, persona: &PersonaVector) -> f64 {
        let [w_org, w_verbosity, w_complexity] = self.params.extraneous_weights;
        clip_unit(
            w_org * (1.0 - persona.modularity())
                + w_verbosity * self.verbosity_penalty(persona.verbosity())
                + w_complexity * (self.params.complexity_share * persona.code_complexity()),
        )
    }

    /// Capacity, pattern recognition and motivation to learn.
    pub fn learning_capacity(&self, user: &UserVector) -> f64 {
        let [w_capacity, w_pattern, w_goal] = self.params.capacity_weights;
        w_capacity * user.cognitive_capacity()
            + w_pattern * user.pattern_recognition()
            + w_goal * user.learning_goal()
    }

    pub fn germane_load(&self, user: &UserVector, persona: &PersonaVector) -> f64 {
        let [w_support, w_pedagogy, w_capacity, w_examples] = self.params.germane_weights;
        clip_unit(
            w_support * persona.learning_support()
                + w_pedagogy * persona.pedagogical_focus()
                + w_capacity * self.learning_capacity(user)
                + w_examples * persona.example_richness(),
        )
    }

    /// Decomposes the load and classifies it against the learner's capacity.
    ///
    /// # Edge Cases
    /// - Zero total load gives zero efficiency
    /// - Efficiency is clipped to `[0, 1]`
    pub fn analyze(
        &self,
        user: &UserVector,
        persona: &PersonaVector,
        task_complexity: f64,
    ) -> CognitiveLoadResult {
        let p = &self.params;
        let intrinsic = self.intrinsic_load(user, task_complexity);
        let extraneous = self.extraneous_load(persona);
        let germane = self.germane_load(user, persona);

        let total = clip_range(intrinsic + extraneous - germane, 0.0, p.max_total_load);
        let capacity = user.cognitive_capacity();
        let productive = intrinsic + germane;

        let in_optimal_zone = productive <= capacity && extraneous < p.optimal_extraneous_ceiling;
        let overloaded = total > capacity;
        let overload_amount = (total - capacity).max(0.0);
        let underloaded = total < capacity * p.underload_ratio;

        let load_efficiency = if total > 0.0 {
            clip_unit(germane / (intrinsic + extraneous + p.efficiency_epsilon))
        } else {
            0.0
        };

        let mut advisories = Vec::new();
        if overloaded {
            advisories.push(LoadAdvisory::Overload {
                amount: overload_amount,
            });
        }
        if underloaded {
            advisories.push(LoadAdvisory::Underload);
        }
        if extraneous > p.high_extraneous_threshold {
            advisories.push(LoadAdvisory::HighExtraneous { load: extraneous });
        }
        if germane < p.low_germane_threshold {
            advisories.push(LoadAdvisory::LowGermane { load: germane });
        }
        if in_optimal_zone {
            advisories.push(LoadAdvisory::OptimalZone);
        }

        CognitiveLoadResult {
            intrinsic_load: intrinsic,
            extraneous_load: extraneous,
            germane_load: germane,
            total_load: total,
            productive_load: productive,
            cognitive_capacity: capacity,
            load_efficiency,
            in_optimal_zone,
            overloaded,
            underloaded,
            overload_amount,
            advisories,
        }
    }

    /// Ranking score favouring germane load, low extraneous load, efficiency
    /// and the optimal zone; overloads are penalised proportionally.
    pub fn ranking_score(&self, analysis: &CognitiveLoadResult) -> f64 {
        let [w_germane, w_clean, w_efficiency, w_optimal] = self.params.ranking_weights;
        let optimal_bonus = if analysis.in_optimal_zone { 1.0 } else { 0.0 };
        let mut score = w_germane * analysis.germane_load
            + w_clean * (1.0 - analysis.extraneous_load)
            + w_efficiency * analysis.load_efficiency
            + w_optimal * optimal_bonus;
        if analysis.overloaded {
            score *= 1.0 - self.params.overload_penalty * analysis.overload_amount;
        }
        clip_unit(score)
    }
}
