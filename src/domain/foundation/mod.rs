//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, enums, and error types that form the vocabulary
//! of the persona matching domain.

mod errors;
mod knowledge_domain;
mod skill_level;
mod unit_interval;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use knowledge_domain::{KnowledgeDomain, PersonaCategory};
pub use skill_level::SkillLevel;
pub use unit_interval::{clip_range, clip_unit, UnitInterval};
