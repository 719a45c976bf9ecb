//! UserVector - ten-coordinate description of a learner.

use serde::{Deserialize, Serialize};

use super::{CompetencyProfile, VECTOR_DIMENSIONS};
use crate::domain::foundation::{clip_unit, ValidationError};

/// Coordinate names in canonical order.
pub const USER_DIMENSION_NAMES: [&str; VECTOR_DIMENSIONS] = [
    "technical_skill",
    "domain_knowledge",
    "ai_experience",
    "learning_goal",
    "procedural_knowledge",
    "declarative_knowledge",
    "conditional_knowledge",
    "cognitive_capacity",
    "pattern_recognition",
    "abstraction_level",
];

/// A learner described by ten coordinates in `[0, 1]`.
///
/// `learning_goal` runs from 0 (production-oriented) to 1 (learning-oriented).
/// Coordinates are clipped on construction and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawUserVector")]
pub struct UserVector {
    technical_skill: f64,
    domain_knowledge: f64,
    ai_experience: f64,
    learning_goal: f64,
    procedural_knowledge: f64,
    declarative_knowledge: f64,
    conditional_knowledge: f64,
    cognitive_capacity: f64,
    pattern_recognition: f64,
    abstraction_level: f64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawUserVector {
    technical_skill: f64,
    domain_knowledge: f64,
    ai_experience: f64,
    learning_goal: f64,
    procedural_knowledge: f64,
    declarative_knowledge: f64,
    conditional_knowledge: f64,
    cognitive_capacity: f64,
    pattern_recognition: f64,
    abstraction_level: f64,
}

impl From<RawUserVector> for UserVector {
    fn from(raw: RawUserVector) -> Self {
        UserVector::new([
            raw.technical_skill,
            raw.domain_knowledge,
            raw.ai_experience,
            raw.learning_goal,
            raw.procedural_knowledge,
            raw.declarative_knowledge,
            raw.conditional_knowledge,
            raw.cognitive_capacity,
            raw.pattern_recognition,
            raw.abstraction_level,
        ])
    }
}

impl UserVector {
    /// Builds a vector from coordinates in canonical order, clipping each.
    pub fn new(coordinates: [f64; VECTOR_DIMENSIONS]) -> Self {
        let [
            technical_skill,
            domain_knowledge,
            ai_experience,
            learning_goal,
            procedural_knowledge,
            declarative_knowledge,
            conditional_knowledge,
            cognitive_capacity,
            pattern_recognition,
            abstraction_level,
        ] = coordinates.map(clip_unit);
        Self {
            technical_skill,
            domain_knowledge,
            ai_experience,
            learning_goal,
            procedural_knowledge,
            declarative_knowledge,
            conditional_knowledge,
            cognitive_capacity,
            pattern_recognition,
            abstraction_level,
        }
    }

    /// Builds a vector from an arbitrary slice.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` unless the slice holds exactly ten values.
    pub fn try_from_slice(values: &[f64]) -> Result<Self, ValidationError> {
        let coordinates: [f64; VECTOR_DIMENSIONS] = values.try_into().map_err(|_| {
            ValidationError::dimension_mismatch("user_vector", VECTOR_DIMENSIONS, values.len())
        })?;
        Ok(Self::new(coordinates))
    }

    /// Derives a vector from a survey-based competency profile.
    ///
    /// With `s = score / 100`:
    /// - technical skill and learning goal follow the Dreyfus level
    /// - domain knowledge follows the assessed domain
    /// - AI experience is 0.7 when the `ai_experience` flag is set, else 0.2
    /// - procedural `min(1, 1.2s)`, declarative `s`, conditional `max(0.3, s - 0.2)`
    /// - capacity `0.5 + 0.5s`, pattern recognition `max(0.3, s - 0.1)`, abstraction `s`
    pub fn from_profile(profile: &CompetencyProfile) -> Self {
        let s = profile.normalized_score();
        let ai_experience = if profile.has_flag("ai_experience") { 0.7 } else { 0.2 };

        Self::new([
            profile.level.technical_skill(),
            profile.domain.domain_knowledge(),
            ai_experience,
            profile.level.learning_goal(),
            (s * 1.2).min(1.0),
            s,
            (s - 0.2).max(0.3),
            0.5 + 0.5 * s,
            (s - 0.1).max(0.3),
            s,
        ])
    }

    /// Returns the coordinates in canonical order.
    pub fn to_array(&self) -> [f64; VECTOR_DIMENSIONS] {
        [
            self.technical_skill,
            self.domain_knowledge,
            self.ai_experience,
            self.learning_goal,
            self.procedural_knowledge,
            self.declarative_knowledge,
            self.conditional_knowledge,
            self.cognitive_capacity,
            self.pattern_recognition,
            self.abstraction_level,
        ]
    }

    pub fn technical_skill(&self) -> f64 {
        self.technical_skill
    }

    pub fn domain_knowledge(&self) -> f64 {
        self.domain_knowledge
    }

    pub fn ai_experience(&self) -> f64 {
        self.ai_experience
    }

    pub fn learning_goal(&self) -> f64 {
        self.learning_goal
    }

    pub fn procedural_knowledge(&self) -> f64 {
        self.procedural_knowledge
    }

    pub fn declarative_knowledge(&self) -> f64 {
        self.declarative_knowledge
    }

    pub fn conditional_knowledge(&self) -> f64 {
        self.conditional_knowledge
    }

    pub fn cognitive_capacity(&self) -> f64 {
        self.cognitive_capacity
    }

    pub fn pattern_recognition(&self) -> f64 {
        self.pattern_recognition
    }

    pub fn abstraction_level(&self) -> f64 {
        self.abstraction_level
    }

    /// Mean of technical skill and domain knowledge.
    pub fn overall_skill(&self) -> f64 {
        (self.technical_skill + self.domain_knowledge) / 2.0
    }
}
