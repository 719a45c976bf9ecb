//! Complementarity Scorer - how well a persona covers the learner's gaps.

use super::ComplementarityParameters;
use crate::domain::foundation::clip_unit;
use crate::domain::vectors::{PersonaVector, UserVector};

/// Scores gap coverage as the mean of `weakness × strength` over four axes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplementarityScorer {
    params: ComplementarityParameters,
}

impl ComplementarityScorer {
    pub fn new(params: ComplementarityParameters) -> Self {
        Self { params }
    }

    /// `(weakness, strength)` pairs for the technical, domain, AI-experience
    /// and abstraction axes.
    ///
    /// The domain axis looks for pedagogical focus when the learner wants to
    /// learn and production readiness otherwise.
    pub fn axes(&self, user: &UserVector, persona: &PersonaVector) -> [(f64, f64); 4] {
        let domain_strength = if user.learning_goal() > self.params.learning_goal_threshold {
            persona.pedagogical_focus()
        } else {
            persona.production_readiness()
        };

        [
            (1.0 - user.technical_skill(), persona.technical_depth()),
            (1.0 - user.domain_knowledge(), domain_strength),
            (1.0 - user.ai_experience(), persona.innovation_factor()),
            (1.0 - user.abstraction_level(), persona.code_complexity()),
        ]
    }

    pub fn score(&self, user: &UserVector, persona: &PersonaVector) -> f64 {
        let axes = self.axes(user, persona);
        let total: f64 = axes.iter().map(|(weakness, strength)| weakness * strength).sum();
        clip_unit(total / axes.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vectors::{PersonaCatalog, PersonaId};

    #[test]
    fn complete_learner_has_nothing_to_complement() {
        let user = UserVector::new([1.0; 10]);
        for persona in PersonaCatalog::reference().iter() {
            assert_eq!(ComplementarityScorer::default().score(&user, persona), 0.0);
        }
    }

    #[test]
    fn blank_learner_meets_a_maxed_persona() {
        let user = UserVector::new([0.0; 10]);
        let persona = PersonaVector::new(PersonaId::TechExpert, [1.0; 10]);
        assert_eq!(ComplementarityScorer::default().score(&user, &persona), 1.0);
    }

    #[test]
    fn domain_axis_follows_learning_goal() {
        let scorer = ComplementarityScorer::default();
        let persona = PersonaVector::new(
            PersonaId::EduExpert,
            [0.0, 0.0, 0.0, 0.8, 0.0, 0.0, 0.0, 0.0, 0.2, 0.0],
        );
        let learner = UserVector::new([1.0, 0.0, 1.0, 0.9, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
        let builder = UserVector::new([1.0, 0.0, 1.0, 0.1, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0]);

        assert!((scorer.score(&learner, &persona) - 0.2).abs() < 1e-12);
        assert!((scorer.score(&builder, &persona) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn novice_gains_more_from_expert_than_from_novice_persona() {
        let scorer = ComplementarityScorer::default();
        let user = UserVector::new([0.1, 0.7, 0.2, 0.9, 0.24, 0.2, 0.3, 0.6, 0.3, 0.2]);
        let catalog = PersonaCatalog::reference();
        let expert = scorer.score(&user, catalog.get(PersonaId::EduExpert).unwrap());
        let novice = scorer.score(&user, catalog.get(PersonaId::EduNovice).unwrap());
        assert!(expert > novice);
    }
}
