//! Competency Matcher - zone-of-proximal-development fit.

use super::CompetencyParameters;
use crate::domain::foundation::clip_unit;
use crate::domain::vectors::{PersonaVector, UserVector};

/// Scores how well a persona's difficulty suits the learner's skill.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompetencyMatcher {
    params: CompetencyParameters,
}

impl CompetencyMatcher {
    pub fn new(params: CompetencyParameters) -> Self {
        Self { params }
    }

    /// Gaussian kernel `exp(-λ·(gap - offset)²)` over the difficulty gap.
    ///
    /// Peaks at 1 when `gap == offset` and decreases monotonically as the
    /// gap moves away from the offset in either direction.
    pub fn zpd_kernel(&self, gap: f64) -> f64 {
        let shifted = gap - self.params.zpd_offset;
        (-self.params.sharpness * shifted * shifted).exp()
    }

    /// Persona difficulty minus learner skill.
    pub fn difficulty_gap(user: &UserVector, persona: &PersonaVector) -> f64 {
        persona.difficulty() - user.overall_skill()
    }

    /// Pedagogical focus for learning-oriented users, production readiness otherwise.
    pub fn goal_alignment(&self, user: &UserVector, persona: &PersonaVector) -> f64 {
        if user.learning_goal() > self.params.learning_goal_threshold {
            persona.pedagogical_focus()
        } else {
            persona.production_readiness()
        }
    }

    /// Pairs each knowledge type with the persona trait that feeds it:
    /// procedural with modularity, declarative with verbosity, conditional
    /// with learning support.
    pub fn knowledge_match(&self, user: &UserVector, persona: &PersonaVector) -> f64 {
        self.params.procedural_weight * user.procedural_knowledge() * persona.modularity()
            + self.params.declarative_weight * user.declarative_knowledge() * persona.verbosity()
            + self.params.conditional_weight
                * user.conditional_knowledge()
                * persona.learning_support()
    }

    /// `0.5·kernel + 0.3·alignment + 0.2·knowledge`, clipped.
    pub fn score(&self, user: &UserVector, persona: &PersonaVector) -> f64 {
        let gaussian = self.zpd_kernel(Self::difficulty_gap(user, persona));
        let alignment = self.goal_alignment(user, persona);
        let knowledge = self.knowledge_match(user, persona);

        clip_unit(
            self.params.gaussian_weight * gaussian
                + self.params.alignment_weight * alignment
                + self.params.knowledge_weight * knowledge,
        )
    }
}
