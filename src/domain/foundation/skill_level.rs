//! SkillLevel enum representing the five Dreyfus skill-acquisition stages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// The five Dreyfus stages, ordered from least to most skilled.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    #[default]
    Novice,
    AdvancedBeginner,
    Competent,
    Proficient,
    Expert,
}

impl SkillLevel {
    /// Number of stages.
    pub const COUNT: usize = 5;

    /// Returns all levels in canonical order.
    pub fn all() -> &'static [SkillLevel] {
        &[
            SkillLevel::Novice,
            SkillLevel::AdvancedBeginner,
            SkillLevel::Competent,
            SkillLevel::Proficient,
            SkillLevel::Expert,
        ]
    }

    /// Returns the 0-based index of this level in the canonical order.
    pub fn order_index(&self) -> usize {
        match self {
            SkillLevel::Novice => 0,
            SkillLevel::AdvancedBeginner => 1,
            SkillLevel::Competent => 2,
            SkillLevel::Proficient => 3,
            SkillLevel::Expert => 4,
        }
    }

    /// Returns the level at a canonical index, if any.
    pub fn from_index(index: usize) -> Option<SkillLevel> {
        Self::all().get(index).copied()
    }

    /// Maps a 0-100 assessment score onto its band.
    ///
    /// Bands: 0-20 novice, 21-40 advanced beginner, 41-60 competent,
    /// 61-80 proficient, 81-100 expert. Fractional scores between bands
    /// belong to the upper band; anything outside 0-100 is clamped first.
    pub fn from_score(score: f64) -> SkillLevel {
        let score = if score.is_nan() { 0.0 } else { score.clamp(0.0, 100.0) };
        if score <= 20.0 {
            SkillLevel::Novice
        } else if score <= 40.0 {
            SkillLevel::AdvancedBeginner
        } else if score <= 60.0 {
            SkillLevel::Competent
        } else if score <= 80.0 {
            SkillLevel::Proficient
        } else {
            SkillLevel::Expert
        }
    }

    /// Technical skill coordinate implied by this level.
    pub fn technical_skill(&self) -> f64 {
        match self {
            SkillLevel::Novice => 0.1,
            SkillLevel::AdvancedBeginner => 0.3,
            SkillLevel::Competent => 0.5,
            SkillLevel::Proficient => 0.7,
            SkillLevel::Expert => 0.9,
        }
    }

    /// Learning-goal coordinate implied by this level.
    ///
    /// Early stages lean towards learning, later ones towards production.
    pub fn learning_goal(&self) -> f64 {
        match self {
            SkillLevel::Novice | SkillLevel::AdvancedBeginner => 0.9,
            SkillLevel::Competent => 0.6,
            SkillLevel::Proficient | SkillLevel::Expert => 0.3,
        }
    }

    /// Returns the wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Novice => "novice",
            SkillLevel::AdvancedBeginner => "advanced_beginner",
            SkillLevel::Competent => "competent",
            SkillLevel::Proficient => "proficient",
            SkillLevel::Expert => "expert",
        }
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            SkillLevel::Novice => "Novice",
            SkillLevel::AdvancedBeginner => "Advanced Beginner",
            SkillLevel::Competent => "Competent",
            SkillLevel::Proficient => "Proficient",
            SkillLevel::Expert => "Expert",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for SkillLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("level", format!("unknown skill level '{}'", s))
            })
    }
}
