//! Persona Match - Learner-to-persona recommendation engine
//!
//! This crate matches a learner's competency profile against a fixed catalog
//! of expert personas. It scores every persona on similarity, competency fit,
//! complementarity, predicted performance and learning trajectory, combines
//! the scores in similarity, complementary or adaptive mode, and can re-rank
//! the catalog by cognitive load.

pub mod application;
pub mod config;
pub mod domain;
pub mod telemetry;
