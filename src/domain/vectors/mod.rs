//! Vectors Module - the learner/persona vector model.
//!
//! # Components
//!
//! - `UserVector` - ten coordinates describing a learner
//! - `PersonaVector` / `PersonaId` - ten coordinates describing a persona
//! - `PersonaCatalog` - the fixed reference catalog and validated subsets
//! - `CompetencyProfile` - raw survey-derived engine input
//! - `CompetencyAssessor` - dual-domain survey scoring
//!
//! Both vector types clip their coordinates to `[0, 1]` on construction and
//! are immutable afterwards.

mod assessment;
mod catalog;
mod competency_profile;
mod persona_vector;
mod user_vector;

/// Number of coordinates in every user and persona vector.
pub const VECTOR_DIMENSIONS: usize = 10;

pub use assessment::{
    CompetencyAssessor, DomainScore, DualDomainAssessment, StrengthPattern, EXPERIENCE_BONUS,
    STRENGTH_THRESHOLD,
};
pub use catalog::PersonaCatalog;
pub use competency_profile::{CompetencyProfile, ResponseValue, Responses};
pub use persona_vector::{PersonaId, PersonaVector, PERSONA_DIMENSION_NAMES};
pub use user_vector::{UserVector, USER_DIMENSION_NAMES};
