//! Correlation and effect-size tests.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pearson correlation and an approximate two-tailed p-value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    pub r: f64,
    pub p_value: f64,
}

impl Correlation {
    /// The "no evidence of correlation" result.
    pub const NEUTRAL: Self = Self { r: 0.0, p_value: 1.0 };
}

/// Pearson's r with a closed-form approximation of the t-test p-value.
///
/// `t = r·√((n-2)/(1-r²))`, `p ≈ 1 - √(1 - exp(-2t²/(n-2)))`, clipped to
/// `[0, 1]`.
///
/// # Edge Cases
/// - Length mismatch, fewer than two points or zero variance: (0, 1)
/// - Two points: r as computed, p = 1 (no degrees of freedom)
/// - |r| = 1 with n > 2: p = 0
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Correlation {
    if x.len() != y.len() || x.len() < 2 {
        return Correlation::NEUTRAL;
    }

    let n = x.len() as f64;
    let x_mean = x.iter().sum::<f64>() / n;
    let y_mean = y.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut x_var = 0.0;
    let mut y_var = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        covariance += dx * dy;
        x_var += dx * dx;
        y_var += dy * dy;
    }

    if x_var == 0.0 || y_var == 0.0 {
        return Correlation::NEUTRAL;
    }

    let r = (covariance / (x_var * y_var).sqrt()).clamp(-1.0, 1.0);
    let dof = n - 2.0;

    let p_value = if dof <= 0.0 {
        1.0
    } else if r.abs() >= 1.0 {
        0.0
    } else {
        let t = r * (dof / (1.0 - r * r)).sqrt();
        1.0 - (1.0 - (-2.0 * t * t / dof).exp()).sqrt()
    };

    Correlation {
        r,
        p_value: p_value.clamp(0.0, 1.0),
    }
}

/// Conventional magnitude buckets for Cohen's d.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectMagnitude {
    Negligible,
    Small,
    Medium,
    Large,
}

impl EffectMagnitude {
    /// Buckets |d|: < 0.2 negligible, < 0.5 small, < 0.8 medium, else large.
    pub fn from_d(d: f64) -> Self {
        let magnitude = d.abs();
        if magnitude < 0.2 {
            EffectMagnitude::Negligible
        } else if magnitude < 0.5 {
            EffectMagnitude::Small
        } else if magnitude < 0.8 {
            EffectMagnitude::Medium
        } else {
            EffectMagnitude::Large
        }
    }
}

impl fmt::Display for EffectMagnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EffectMagnitude::Negligible => "Negligible",
            EffectMagnitude::Small => "Small",
            EffectMagnitude::Medium => "Medium",
            EffectMagnitude::Large => "Large",
        };
        write!(f, "{}", s)
    }
}

/// Cohen's d between two groups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectSize {
    pub cohens_d: f64,
    pub magnitude: EffectMagnitude,
    pub mean_difference: f64,
    pub pooled_std: f64,
}

/// Cohen's d with `σ_pooled = √((s₁² + s₂²) / 2)` over sample standard
/// deviations.
///
/// # Edge Cases
/// - Either group with fewer than two values: d = 0, negligible
/// - Zero pooled deviation: d = 0
pub fn effect_size(group1: &[f64], group2: &[f64]) -> EffectSize {
    if group1.len() < 2 || group2.len() < 2 {
        return EffectSize {
            cohens_d: 0.0,
            magnitude: EffectMagnitude::Negligible,
            mean_difference: 0.0,
            pooled_std: 0.0,
        };
    }

    let (mean1, var1) = mean_and_sample_variance(group1);
    let (mean2, var2) = mean_and_sample_variance(group2);

    let pooled_std = ((var1 + var2) / 2.0).sqrt();
    let mean_difference = mean1 - mean2;
    let cohens_d = if pooled_std > 0.0 {
        mean_difference / pooled_std
    } else {
        0.0
    };

    EffectSize {
        cohens_d,
        magnitude: EffectMagnitude::from_d(cohens_d),
        mean_difference,
        pooled_std,
    }
}

fn mean_and_sample_variance(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, variance)
}
