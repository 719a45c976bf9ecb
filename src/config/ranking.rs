//! Ranking configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::scoring::{RankingExecution, TaskContext};

/// Defaults applied to ranking requests that leave values unset
#[derive(Debug, Clone, Deserialize)]
pub struct RankingConfig {
    /// Number of personas returned when a request does not say
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,

    /// Score catalogs on the rayon thread pool
    #[serde(default)]
    pub parallel: bool,

    /// Catalogs smaller than this are scored sequentially even in parallel mode
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,

    #[serde(default = "default_half")]
    pub default_task_complexity: f64,

    #[serde(default = "default_half")]
    pub default_time_factor: f64,
}

impl RankingConfig {
    /// Execution mode for a catalog of `catalog_size` entries
    pub fn execution_for(&self, catalog_size: usize) -> RankingExecution {
        if self.parallel && catalog_size >= self.parallel_threshold {
            RankingExecution::Parallel
        } else {
            RankingExecution::Sequential
        }
    }

    /// Task context built from the configured defaults
    pub fn default_context(&self) -> Result<TaskContext, ValidationError> {
        TaskContext::try_new(self.default_task_complexity, self.default_time_factor)
            .map_err(ValidationError::InvalidRankingDefault)
    }

    /// Validate ranking configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.default_top_k == 0 {
            return Err(ValidationError::InvalidTopK);
        }
        if self.parallel_threshold == 0 {
            return Err(ValidationError::InvalidParallelThreshold);
        }
        self.default_context()?;
        Ok(())
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            default_top_k: default_top_k(),
            parallel: false,
            parallel_threshold: default_parallel_threshold(),
            default_task_complexity: default_half(),
            default_time_factor: default_half(),
        }
    }
}

fn default_top_k() -> usize {
    5
}

fn default_parallel_threshold() -> usize {
    8
}

fn default_half() -> f64 {
    0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking_config_defaults() {
        let config = RankingConfig::default();
        assert_eq!(config.default_top_k, 5);
        assert!(!config.parallel);
        assert_eq!(config.default_task_complexity, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_top_k_is_rejected() {
        let config = RankingConfig {
            default_top_k: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidTopK)));
    }

    #[test]
    fn test_out_of_range_default_context_is_rejected() {
        let config = RankingConfig {
            default_time_factor: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidRankingDefault(_))
        ));
    }

    #[test]
    fn test_execution_respects_threshold() {
        let config = RankingConfig {
            parallel: true,
            parallel_threshold: 8,
            ..Default::default()
        };
        assert_eq!(config.execution_for(10), RankingExecution::Parallel);
        assert_eq!(config.execution_for(5), RankingExecution::Sequential);
        assert_eq!(RankingConfig::default().execution_for(10), RankingExecution::Sequential);
    }

    #[test]
    fn test_ranking_config_deserialization() {
        let json = r#"{ "default_top_k": 3, "parallel": true }"#;
        let config: RankingConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.default_top_k, 3);
        assert!(config.parallel);
        assert_eq!(config.parallel_threshold, 8);
        assert_eq!(config.default_time_factor, 0.5);
    }
}
