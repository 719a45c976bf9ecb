//! Persona catalog - the fixed reference set plus validated custom subsets.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use super::{PersonaId, PersonaVector};
use crate::domain::foundation::{DomainError, PersonaCategory, ValidationError};

/// Hand-authored coordinates of the ten reference personas.
///
/// Column order: code_complexity, verbosity, technical_depth,
/// pedagogical_focus, comment_density, modularity, example_richness,
/// learning_support, production_readiness, innovation_factor.
const REFERENCE_COORDINATES: [(PersonaId, [f64; 10]); 10] = [
    (PersonaId::EduNovice, [0.15, 0.98, 0.10, 0.95, 0.98, 0.15, 0.85, 0.92, 0.10, 0.08]),
    (PersonaId::EduAdvancedBeginner, [0.25, 0.85, 0.25, 0.90, 0.80, 0.35, 0.80, 0.88, 0.25, 0.20]),
    (PersonaId::EduCompetent, [0.45, 0.65, 0.50, 0.85, 0.60, 0.60, 0.70, 0.80, 0.50, 0.40]),
    (PersonaId::EduProficient, [0.65, 0.50, 0.75, 0.88, 0.40, 0.80, 0.75, 0.85, 0.70, 0.65]),
    (PersonaId::EduExpert, [0.80, 0.35, 0.88, 0.95, 0.30, 0.85, 0.70, 0.80, 0.75, 0.95]),
    (PersonaId::TechNovice, [0.12, 0.95, 0.08, 0.15, 0.95, 0.10, 0.30, 0.35, 0.05, 0.05]),
    (PersonaId::TechAdvancedBeginner, [0.30, 0.75, 0.35, 0.20, 0.70, 0.40, 0.45, 0.48, 0.35, 0.25]),
    (PersonaId::TechCompetent, [0.55, 0.50, 0.65, 0.25, 0.50, 0.70, 0.50, 0.55, 0.75, 0.45]),
    (PersonaId::TechProficient, [0.75, 0.35, 0.85, 0.30, 0.35, 0.90, 0.60, 0.60, 0.90, 0.75]),
    (PersonaId::TechExpert, [0.88, 0.25, 0.98, 0.18, 0.25, 0.85, 0.55, 0.50, 0.85, 0.98]),
];

static REFERENCE_CATALOG: Lazy<PersonaCatalog> = Lazy::new(|| PersonaCatalog {
    personas: REFERENCE_COORDINATES
        .iter()
        .map(|(id, coordinates)| PersonaVector::new(*id, *coordinates))
        .collect(),
});

/// An ordered, duplicate-free set of personas.
///
/// Catalog order is significant: rankings break ties by it.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonaCatalog {
    personas: Vec<PersonaVector>,
}

impl PersonaCatalog {
    /// The process-wide reference catalog of ten personas.
    pub fn reference() -> &'static PersonaCatalog {
        &REFERENCE_CATALOG
    }

    /// Builds a custom catalog.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if no personas are given
    /// - `InvalidFormat` if a persona id appears twice
    pub fn try_new(personas: Vec<PersonaVector>) -> Result<Self, ValidationError> {
        if personas.is_empty() {
            return Err(ValidationError::empty_field("personas"));
        }

        let mut seen = HashSet::new();
        for persona in &personas {
            if !seen.insert(persona.id()) {
                return Err(ValidationError::invalid_format(
                    "personas",
                    format!("duplicate persona id '{}'", persona.id()),
                ));
            }
        }

        Ok(Self { personas })
    }

    /// Returns a catalog restricted to one category, preserving order.
    ///
    /// # Errors
    ///
    /// Returns `EmptyField` if no persona belongs to the category.
    pub fn filter_category(&self, category: PersonaCategory) -> Result<Self, ValidationError> {
        Self::try_new(
            self.personas
                .iter()
                .filter(|p| p.category() == category)
                .copied()
                .collect(),
        )
    }

    /// Looks up a persona by id.
    pub fn get(&self, id: PersonaId) -> Option<&PersonaVector> {
        self.personas.iter().find(|p| p.id() == id)
    }

    /// Looks up a persona by its wire identifier.
    ///
    /// # Errors
    ///
    /// Returns `PersonaNotFound` for unknown identifiers and for known
    /// identifiers this catalog does not contain.
    pub fn lookup(&self, persona_id: &str) -> Result<&PersonaVector, DomainError> {
        let id: PersonaId = persona_id.parse()?;
        self.get(id)
            .ok_or_else(|| DomainError::persona_not_found(persona_id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersonaVector> {
        self.personas.iter()
    }

    pub fn as_slice(&self) -> &[PersonaVector] {
        &self.personas
    }

    pub fn ids(&self) -> Vec<PersonaId> {
        self.personas.iter().map(PersonaVector::id).collect()
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}
