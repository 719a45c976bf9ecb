//! Engine configuration module
//!
//! This module provides type-safe configuration loading using the `config`
//! and `dotenvy` crates. Values come from an optional configuration file
//! named by `PERSONA_MATCH_CONFIG` and from environment variables with the
//! `PERSONA_MATCH` prefix, nested with double underscores. Every value has a
//! default equal to the reference model, so an empty environment is valid.
//!
//! # Example
//!
//! ```no_run
//! use persona_match::config::EngineConfig;
//!
//! let config = EngineConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Returning {} personas by default", config.ranking.default_top_k);
//! ```

mod error;
mod logging;
mod ranking;

pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use ranking::RankingConfig;

use std::path::Path;

use serde::Deserialize;

use crate::domain::scoring::{CognitiveLoadParameters, ScoringParameters};

/// Environment variable naming an optional configuration file
pub const CONFIG_FILE_ENV: &str = "PERSONA_MATCH_CONFIG";

const ENV_PREFIX: &str = "PERSONA_MATCH";

/// Root engine configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// Aggregation weights and component scorer constants
    #[serde(default)]
    pub scoring: ScoringParameters,

    /// Cognitive load decomposition constants
    #[serde(default)]
    pub cognitive_load: CognitiveLoadParameters,

    /// Ranking defaults and execution mode
    #[serde(default)]
    pub ranking: RankingConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load configuration from the environment
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads the file named by `PERSONA_MATCH_CONFIG`, if set
    /// 3. Reads environment variables with `PERSONA_MATCH` prefix
    /// 4. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `PERSONA_MATCH__RANKING__DEFAULT_TOP_K=3` -> `ranking.default_top_k = 3`
    /// - `PERSONA_MATCH__SCORING__WEIGHTS__ALPHA=0.4` -> `scoring.weights.alpha = 0.4`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or values cannot be
    /// parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let file = std::env::var(CONFIG_FILE_ENV).ok();
        Self::build(file.as_deref().map(Path::new))
    }

    /// Load configuration from an explicit file, then the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing or malformed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::build(Some(path.as_ref()))
    }

    fn build(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path));
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Performs semantic validation of configuration:
    /// - Aggregation weights are non-negative and sum to 1
    /// - Blend weights sum to 1, sharpness and rates are positive
    /// - Ranking defaults are in range
    /// - The log filter parses
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` naming the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.scoring
            .validate()
            .map_err(ValidationError::InvalidScoring)?;
        self.cognitive_load
            .validate()
            .map_err(ValidationError::InvalidCognitiveLoad)?;
        self.ranking.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Load and validate in one step
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }
}
