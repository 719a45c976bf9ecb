//! Raw competency profile as produced by the assessment survey.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{KnowledgeDomain, SkillLevel};

/// A single survey answer: either a yes/no flag or a numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    Flag(bool),
    Number(f64),
}

impl ResponseValue {
    /// Returns true for `true` flags and non-zero numbers.
    pub fn is_truthy(&self) -> bool {
        match self {
            ResponseValue::Flag(flag) => *flag,
            ResponseValue::Number(n) => *n != 0.0 && !n.is_nan(),
        }
    }

    /// Returns the numeric score, if this is a numeric answer.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ResponseValue::Number(n) => Some(*n),
            ResponseValue::Flag(_) => None,
        }
    }
}

impl From<bool> for ResponseValue {
    fn from(flag: bool) -> Self {
        ResponseValue::Flag(flag)
    }
}

impl From<f64> for ResponseValue {
    fn from(n: f64) -> Self {
        ResponseValue::Number(n)
    }
}

/// Survey answers keyed by question id.
pub type Responses = BTreeMap<String, ResponseValue>;

/// Learner profile handed to the engine.
///
/// Every key is optional on the wire: a missing score reads as 0, a missing
/// domain as technical, a missing level as novice and missing responses as
/// an empty set. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompetencyProfile {
    /// Domain sub-score on a 0-100 scale.
    #[serde(default)]
    pub score: f64,

    #[serde(default)]
    pub domain: KnowledgeDomain,

    #[serde(default)]
    pub level: SkillLevel,

    #[serde(default)]
    pub responses: Responses,
}

impl CompetencyProfile {
    /// Creates a profile without survey responses.
    pub fn new(score: f64, domain: KnowledgeDomain, level: SkillLevel) -> Self {
        Self {
            score,
            domain,
            level,
            responses: Responses::new(),
        }
    }

    /// Adds a survey response.
    pub fn with_response(mut self, key: impl Into<String>, value: impl Into<ResponseValue>) -> Self {
        self.responses.insert(key.into(), value.into());
        self
    }

    /// Returns true if the response under `key` is present and truthy.
    pub fn has_flag(&self, key: &str) -> bool {
        self.responses.get(key).is_some_and(ResponseValue::is_truthy)
    }

    /// Score normalised to `[0, 1]`.
    pub fn normalized_score(&self) -> f64 {
        if self.score.is_nan() {
            return 0.0;
        }
        self.score.clamp(0.0, 100.0) / 100.0
    }
}
