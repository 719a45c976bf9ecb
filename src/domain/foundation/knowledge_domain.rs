//! Knowledge domains of learners and categories of personas.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// The domain a learner's competency profile was assessed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnowledgeDomain {
    #[default]
    Technical,
    #[serde(alias = "education")]
    Educational,
}

impl KnowledgeDomain {
    /// Returns both domains.
    pub fn all() -> &'static [KnowledgeDomain] {
        &[KnowledgeDomain::Technical, KnowledgeDomain::Educational]
    }

    /// Domain-knowledge coordinate assumed for a learner of this domain.
    pub fn domain_knowledge(&self) -> f64 {
        match self {
            KnowledgeDomain::Technical => 0.8,
            KnowledgeDomain::Educational => 0.7,
        }
    }

    /// Prefix of survey response keys belonging to this domain.
    pub fn response_prefix(&self) -> &'static str {
        match self {
            KnowledgeDomain::Technical => "tec",
            KnowledgeDomain::Educational => "edu",
        }
    }

    /// Persona category that speaks to this domain.
    pub fn persona_category(&self) -> PersonaCategory {
        match self {
            KnowledgeDomain::Technical => PersonaCategory::Technology,
            KnowledgeDomain::Educational => PersonaCategory::Education,
        }
    }

    /// Returns the other domain.
    pub fn other(&self) -> KnowledgeDomain {
        match self {
            KnowledgeDomain::Technical => KnowledgeDomain::Educational,
            KnowledgeDomain::Educational => KnowledgeDomain::Technical,
        }
    }

    /// Returns the wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            KnowledgeDomain::Technical => "technical",
            KnowledgeDomain::Educational => "educational",
        }
    }
}

impl fmt::Display for KnowledgeDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for KnowledgeDomain {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "technical" => Ok(KnowledgeDomain::Technical),
            "educational" | "education" => Ok(KnowledgeDomain::Educational),
            other => Err(ValidationError::invalid_format(
                "domain",
                format!("unknown domain '{}'", other),
            )),
        }
    }
}

/// Category a persona belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaCategory {
    Education,
    Technology,
}

impl PersonaCategory {
    /// Returns both categories.
    pub fn all() -> &'static [PersonaCategory] {
        &[PersonaCategory::Education, PersonaCategory::Technology]
    }

    /// Returns the wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaCategory::Education => "education",
            PersonaCategory::Technology => "technology",
        }
    }
}

impl fmt::Display for PersonaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PersonaCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "education" | "edu" => Ok(PersonaCategory::Education),
            "technology" | "tech" => Ok(PersonaCategory::Technology),
            other => Err(ValidationError::invalid_format(
                "category",
                format!("unknown persona category '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn technical_learners_assume_more_domain_knowledge() {
        assert_eq!(KnowledgeDomain::Technical.domain_knowledge(), 0.8);
        assert_eq!(KnowledgeDomain::Educational.domain_knowledge(), 0.7);
    }

    #[test]
    fn domain_defaults_to_technical() {
        assert_eq!(KnowledgeDomain::default(), KnowledgeDomain::Technical);
    }

    #[test]
    fn domain_accepts_education_alias() {
        let parsed: KnowledgeDomain = serde_json::from_str("\"education\"").unwrap();
        assert_eq!(parsed, KnowledgeDomain::Educational);
        assert_eq!("education".parse::<KnowledgeDomain>().unwrap(), KnowledgeDomain::Educational);
        assert!("history".parse::<KnowledgeDomain>().is_err());
    }

    #[test]
    fn domain_maps_to_persona_category() {
        assert_eq!(
            KnowledgeDomain::Educational.persona_category(),
            PersonaCategory::Education
        );
        assert_eq!(
            KnowledgeDomain::Technical.persona_category(),
            PersonaCategory::Technology
        );
    }

    #[test]
    fn other_swaps_domains() {
        for domain in KnowledgeDomain::all() {
            assert_ne!(domain.other(), *domain);
            assert_eq!(domain.other().other(), *domain);
        }
    }

    #[test]
    fn category_parses_short_and_long_forms() {
        assert_eq!("tech".parse::<PersonaCategory>().unwrap(), PersonaCategory::Technology);
        assert_eq!("education".parse::<PersonaCategory>().unwrap(), PersonaCategory::Education);
        assert!("art".parse::<PersonaCategory>().is_err());
    }
}
