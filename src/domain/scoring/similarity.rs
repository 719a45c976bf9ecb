//! Similarity Scorer - how closely a persona mirrors the learner.

use super::SimilarityParameters;
use crate::domain::foundation::clip_unit;
use crate::domain::vectors::{PersonaVector, UserVector};

/// Number of features compared between learner and persona.
pub const SIMILARITY_FEATURES: usize = 6;

fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Cosine similarity; 0 when either vector has zero norm.
pub fn cosine_similarity<const N: usize>(a: &[f64; N], b: &[f64; N]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = norm(a);
    let norm_b = norm(b);

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// `w_cos·cosine + w_dist·(1 - euclidean/√N)`, clipped to `[0, 1]`.
///
/// For coordinates in `[0, 1]` the Euclidean distance is at most `√N`, so
/// the second term is a closeness in `[0, 1]`.
///
/// # Edge Cases
/// - Either vector has zero norm: 0, closeness is not applied
pub fn hybrid_similarity<const N: usize>(
    a: &[f64; N],
    b: &[f64; N],
    params: &SimilarityParameters,
) -> f64 {
    if N == 0 || norm(a) == 0.0 || norm(b) == 0.0 {
        return 0.0;
    }
    let cosine = cosine_similarity(a, b);
    let distance = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt();
    let closeness = 1.0 - distance / (N as f64).sqrt();

    clip_unit(params.cosine_weight * cosine + params.distance_weight * closeness)
}

/// Learner features: technical skill, domain knowledge, AI experience,
/// learning goal, cognitive capacity, abstraction level.
pub fn user_features(user: &UserVector) -> [f64; SIMILARITY_FEATURES] {
    [
        user.technical_skill(),
        user.domain_knowledge(),
        user.ai_experience(),
        user.learning_goal(),
        user.cognitive_capacity(),
        user.abstraction_level(),
    ]
}

/// Persona features aligned with [`user_features`].
///
/// Technical depth stands in for both skill and domain knowledge, innovation
/// for AI experience, non-production focus for learning goal, simplicity for
/// capacity and complexity for abstraction.
pub fn persona_features(persona: &PersonaVector) -> [f64; SIMILARITY_FEATURES] {
    [
        persona.technical_depth(),
        persona.technical_depth(),
        persona.innovation_factor(),
        1.0 - persona.production_readiness(),
        1.0 - persona.code_complexity(),
        persona.code_complexity(),
    ]
}

/// Scores learner/persona likeness.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityScorer {
    params: SimilarityParameters,
}

impl SimilarityScorer {
    pub fn new(params: SimilarityParameters) -> Self {
        Self { params }
    }

    /// Hybrid similarity of the aligned feature projections.
    pub fn score(&self, user: &UserVector, persona: &PersonaVector) -> f64 {
        hybrid_similarity(&user_features(user), &persona_features(persona), &self.params)
    }
}
