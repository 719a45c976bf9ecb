//! Configuration error types

use thiserror::Error;

use crate::domain::foundation;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid scoring parameters: {0}")]
    InvalidScoring(#[source] foundation::ValidationError),

    #[error("Invalid cognitive load parameters: {0}")]
    InvalidCognitiveLoad(#[source] foundation::ValidationError),

    #[error("Invalid ranking defaults: {0}")]
    InvalidRankingDefault(#[source] foundation::ValidationError),

    #[error("Ranking top_k must be greater than zero")]
    InvalidTopK,

    #[error("Ranking parallel_threshold must be greater than zero")]
    InvalidParallelThreshold,

    #[error("Invalid log filter directive: {0}")]
    InvalidLogFilter(String),
}
