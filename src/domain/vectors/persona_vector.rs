//! PersonaVector and the closed set of persona identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::VECTOR_DIMENSIONS;
use crate::domain::foundation::{clip_unit, DomainError, PersonaCategory, SkillLevel};

/// Coordinate names in canonical order.
pub const PERSONA_DIMENSION_NAMES: [&str; VECTOR_DIMENSIONS] = [
    "code_complexity",
    "verbosity",
    "technical_depth",
    "pedagogical_focus",
    "comment_density",
    "modularity",
    "example_richness",
    "learning_support",
    "production_readiness",
    "innovation_factor",
];

/// Identifier of one of the ten reference personas.
///
/// Each persona pairs a category (education or technology) with a Dreyfus
/// level, so the id alone tells you who it speaks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaId {
    EduNovice,
    EduAdvancedBeginner,
    EduCompetent,
    EduProficient,
    EduExpert,
    TechNovice,
    TechAdvancedBeginner,
    TechCompetent,
    TechProficient,
    TechExpert,
}

impl PersonaId {
    /// Returns all identifiers in catalog order.
    pub fn all() -> &'static [PersonaId] {
        &[
            PersonaId::EduNovice,
            PersonaId::EduAdvancedBeginner,
            PersonaId::EduCompetent,
            PersonaId::EduProficient,
            PersonaId::EduExpert,
            PersonaId::TechNovice,
            PersonaId::TechAdvancedBeginner,
            PersonaId::TechCompetent,
            PersonaId::TechProficient,
            PersonaId::TechExpert,
        ]
    }

    /// Returns the persona's category.
    pub fn category(&self) -> PersonaCategory {
        match self {
            PersonaId::EduNovice
            | PersonaId::EduAdvancedBeginner
            | PersonaId::EduCompetent
            | PersonaId::EduProficient
            | PersonaId::EduExpert => PersonaCategory::Education,
            PersonaId::TechNovice
            | PersonaId::TechAdvancedBeginner
            | PersonaId::TechCompetent
            | PersonaId::TechProficient
            | PersonaId::TechExpert => PersonaCategory::Technology,
        }
    }

    /// Returns the Dreyfus level the persona writes for.
    pub fn level(&self) -> SkillLevel {
        match self {
            PersonaId::EduNovice | PersonaId::TechNovice => SkillLevel::Novice,
            PersonaId::EduAdvancedBeginner | PersonaId::TechAdvancedBeginner => {
                SkillLevel::AdvancedBeginner
            }
            PersonaId::EduCompetent | PersonaId::TechCompetent => SkillLevel::Competent,
            PersonaId::EduProficient | PersonaId::TechProficient => SkillLevel::Proficient,
            PersonaId::EduExpert | PersonaId::TechExpert => SkillLevel::Expert,
        }
    }

    /// Returns the wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaId::EduNovice => "edu_novice",
            PersonaId::EduAdvancedBeginner => "edu_advanced_beginner",
            PersonaId::EduCompetent => "edu_competent",
            PersonaId::EduProficient => "edu_proficient",
            PersonaId::EduExpert => "edu_expert",
            PersonaId::TechNovice => "tech_novice",
            PersonaId::TechAdvancedBeginner => "tech_advanced_beginner",
            PersonaId::TechCompetent => "tech_competent",
            PersonaId::TechProficient => "tech_proficient",
            PersonaId::TechExpert => "tech_expert",
        }
    }

    /// Returns the display name, e.g. "Education / Advanced Beginner".
    pub fn display_name(&self) -> String {
        let category = match self.category() {
            PersonaCategory::Education => "Education",
            PersonaCategory::Technology => "Technology",
        };
        format!("{} / {}", category, self.level().display_name())
    }
}

impl fmt::Display for PersonaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PersonaId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| DomainError::persona_not_found(s))
    }
}

/// A persona's coding and teaching style as ten coordinates in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPersonaVector")]
pub struct PersonaVector {
    id: PersonaId,
    code_complexity: f64,
    verbosity: f64,
    technical_depth: f64,
    pedagogical_focus: f64,
    comment_density: f64,
    modularity: f64,
    example_richness: f64,
    learning_support: f64,
    production_readiness: f64,
    innovation_factor: f64,
}

#[derive(Deserialize)]
struct RawPersonaVector {
    id: PersonaId,
    code_complexity: f64,
    verbosity: f64,
    technical_depth: f64,
    pedagogical_focus: f64,
    comment_density: f64,
    modularity: f64,
    example_richness: f64,
    learning_support: f64,
    production_readiness: f64,
    innovation_factor: f64,
}

impl From<RawPersonaVector> for PersonaVector {
    fn from(raw: RawPersonaVector) -> Self {
        PersonaVector::new(
            raw.id,
            [
                raw.code_complexity,
                raw.verbosity,
                raw.technical_depth,
                raw.pedagogical_focus,
                raw.comment_density,
                raw.modularity,
                raw.example_richness,
                raw.learning_support,
                raw.production_readiness,
                raw.innovation_factor,
            ],
        )
    }
}

impl PersonaVector {
    /// Builds a persona from coordinates in canonical order, clipping each.
    pub fn new(id: PersonaId, coordinates: [f64; VECTOR_DIMENSIONS]) -> Self {
        let [
            code_complexity,
            verbosity,
            technical_depth,
            pedagogical_focus,
            comment_density,
            modularity,
            example_richness,
            learning_support,
            production_readiness,
            innovation_factor,
        ] = coordinates.map(clip_unit);
        Self {
            id,
            code_complexity,
            verbosity,
            technical_depth,
            pedagogical_focus,
            comment_density,
            modularity,
            example_richness,
            learning_support,
            production_readiness,
            innovation_factor,
        }
    }

    /// Returns the coordinates in canonical order.
    pub fn to_array(&self) -> [f64; VECTOR_DIMENSIONS] {
        [
            self.code_complexity,
            self.verbosity,
            self.technical_depth,
            self.pedagogical_focus,
            self.comment_density,
            self.modularity,
            self.example_richness,
            self.learning_support,
            self.production_readiness,
            self.innovation_factor,
        ]
    }

    pub fn id(&self) -> PersonaId {
        self.id
    }

    pub fn category(&self) -> PersonaCategory {
        self.id.category()
    }

    pub fn code_complexity(&self) -> f64 {
        self.code_complexity
    }

    pub fn verbosity(&self) -> f64 {
        self.verbosity
    }

    pub fn technical_depth(&self) -> f64 {
        self.technical_depth
    }

    pub fn pedagogical_focus(&self) -> f64 {
        self.pedagogical_focus
    }

    pub fn comment_density(&self) -> f64 {
        self.comment_density
    }

    pub fn modularity(&self) -> f64 {
        self.modularity
    }

    pub fn example_richness(&self) -> f64 {
        self.example_richness
    }

    pub fn learning_support(&self) -> f64 {
        self.learning_support
    }

    pub fn production_readiness(&self) -> f64 {
        self.production_readiness
    }

    pub fn innovation_factor(&self) -> f64 {
        self.innovation_factor
    }

    /// Mean of code complexity and technical depth.
    pub fn difficulty(&self) -> f64 {
        (self.code_complexity + self.technical_depth) / 2.0
    }

    /// Mean of production readiness and learning support.
    pub fn quality(&self) -> f64 {
        (self.production_readiness + self.learning_support) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn ids_round_trip_through_wire_names() {
        for id in PersonaId::all() {
            assert_eq!(id.as_str().parse::<PersonaId>().unwrap(), *id);
            let json = serde_json::to_string(id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }

    #[test]
    fn unknown_id_is_not_found() {
        let err = "tech_wizard".parse::<PersonaId>().unwrap_err();
        assert_eq!(err.code, ErrorCode::PersonaNotFound);
    }

    #[test]
    fn ids_carry_category_and_level() {
        assert_eq!(PersonaId::EduProficient.category(), PersonaCategory::Education);
        assert_eq!(PersonaId::EduProficient.level(), SkillLevel::Proficient);
        assert_eq!(PersonaId::TechNovice.category(), PersonaCategory::Technology);
        assert_eq!(PersonaId::TechNovice.level(), SkillLevel::Novice);
        assert_eq!(
            PersonaId::TechAdvancedBeginner.display_name(),
            "Technology / Advanced Beginner"
        );
    }

    #[test]
    fn new_clips_coordinates() {
        let p = PersonaVector::new(PersonaId::EduNovice, [1.2, -0.1, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5]);
        assert_eq!(p.code_complexity(), 1.0);
        assert_eq!(p.verbosity(), 0.0);
    }

    #[test]
    fn derived_difficulty_and_quality() {
        let p = PersonaVector::new(PersonaId::TechCompetent, [0.4, 0.5, 0.6, 0.5, 0.5, 0.5, 0.5, 0.2, 0.8, 0.5]);
        assert!((p.difficulty() - 0.5).abs() < 1e-12);
        assert!((p.quality() - 0.5).abs() < 1e-12);
    }
}
