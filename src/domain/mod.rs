//! Domain layer containing the matching model and its scoring logic.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, enums, errors)
//! - `vectors` - Learner and persona vectors, the reference catalog, assessment
//! - `stats` - Statistical primitives (entropy, Bayesian update, Markov, Pareto, ...)
//! - `scoring` - Component scorers, aggregation and ranking

pub mod foundation;
pub mod scoring;
pub mod stats;
pub mod vectors;
