//! Time-series forecasting of learner performance.

use serde::{Deserialize, Serialize};

/// Smoothing factor used when callers have no preference.
pub const DEFAULT_SMOOTHING_ALPHA: f64 = 0.3;

/// Exponential smoothing `Sₜ = α·yₜ + (1 - α)·Sₜ₋₁`, seeded with `y₀`.
///
/// # Edge Cases
/// - Empty input: empty output
pub fn exponential_smoothing(data: &[f64], alpha: f64) -> Vec<f64> {
    let mut smoothed = Vec::with_capacity(data.len());
    let mut iter = data.iter();

    if let Some(&first) = iter.next() {
        smoothed.push(first);
        let mut previous = first;
        for &y in iter {
            previous = alpha * y + (1.0 - alpha) * previous;
            smoothed.push(previous);
        }
    }

    smoothed
}

/// Ordinary-least-squares line through `(t, yₜ)`, extrapolated `steps` ahead.
///
/// # Edge Cases
/// - Empty input: `steps` zeros
/// - A single point: that point repeated
pub fn linear_trend_forecast(data: &[f64], steps: usize) -> Vec<f64> {
    match data {
        [] => return vec![0.0; steps],
        [only] => return vec![*only; steps],
        _ => {}
    }

    let n = data.len() as f64;
    let t_mean = (n - 1.0) / 2.0;
    let y_mean = data.iter().sum::<f64>() / n;

    let (numerator, denominator) = data.iter().enumerate().fold((0.0, 0.0), |(num, den), (t, y)| {
        let dt = t as f64 - t_mean;
        (num + dt * (y - y_mean), den + dt * dt)
    });

    let slope = if denominator != 0.0 { numerator / denominator } else { 0.0 };
    let intercept = y_mean - slope * t_mean;

    (data.len()..data.len() + steps)
        .map(|t| intercept + slope * t as f64)
        .collect()
}

/// Power-law-of-practice fit `P(n) = A·n^(-b) + c`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LearningCurve {
    /// Initial performance.
    pub initial: f64,
    /// Learning rate.
    pub rate: f64,
    /// Asymptotic performance.
    pub asymptote: f64,
    /// Predicted performance on the next attempt.
    pub prediction: f64,
}

impl LearningCurve {
    /// Evaluates the curve at attempt `n` (1-based).
    pub fn at(&self, n: usize) -> f64 {
        self.initial * (n.max(1) as f64).powf(-self.rate) + self.asymptote
    }

    /// Human-readable formula.
    pub fn formula(&self) -> String {
        format!(
            "P(n) = {:.2} · n^(-{:.2}) + {:.2}",
            self.initial, self.rate, self.asymptote
        )
    }
}

/// Fits a learning curve from a performance history and predicts attempt
/// `attempts + 1`.
///
/// A is the first observation, c the mean of the last three, and b the mean
/// improvement relative to the mean of all but the last observation.
///
/// # Edge Cases
/// - Fewer than three observations: all zeros
/// - Non-positive baseline mean: b falls back to 0.1
pub fn learning_curve_model(attempts: usize, performance: &[f64]) -> LearningCurve {
    if performance.len() < 3 {
        return LearningCurve::default();
    }

    let initial = performance[0];
    let tail = &performance[performance.len() - 3..];
    let asymptote = tail.iter().sum::<f64>() / 3.0;

    let improvements: Vec<f64> = performance.windows(2).map(|w| w[1] - w[0]).collect();
    let mean_improvement = improvements.iter().sum::<f64>() / improvements.len() as f64;

    let baseline = &performance[..performance.len() - 1];
    let baseline_mean = baseline.iter().sum::<f64>() / baseline.len() as f64;

    let rate = if baseline_mean > 0.0 {
        (mean_improvement / baseline_mean).abs()
    } else {
        0.1
    };

    let mut curve = LearningCurve {
        initial,
        rate,
        asymptote,
        prediction: 0.0,
    };
    curve.prediction = curve.at(attempts + 1);
    curve
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn smoothing_seeds_with_first_value() {
        let smoothed = exponential_smoothing(&[10.0, 20.0, 20.0], 0.3);
        assert_eq!(smoothed.len(), 3);
        assert_eq!(smoothed[0], 10.0);
        assert!(approx(smoothed[1], 13.0));
        assert!(approx(smoothed[2], 15.1));
    }

    #[test]
    fn smoothing_empty_is_empty() {
        assert!(exponential_smoothing(&[], DEFAULT_SMOOTHING_ALPHA).is_empty());
    }

    #[test]
    fn trend_extends_a_line() {
        let forecast = linear_trend_forecast(&[1.0, 2.0, 3.0, 4.0], 3);
        assert_eq!(forecast.len(), 3);
        assert!(approx(forecast[0], 5.0));
        assert!(approx(forecast[1], 6.0));
        assert!(approx(forecast[2], 7.0));
    }

    #[test]
    fn trend_of_flat_series_is_flat() {
        let forecast = linear_trend_forecast(&[0.4, 0.4, 0.4], 2);
        assert!(forecast.iter().all(|y| approx(*y, 0.4)));
    }

    #[test]
    fn trend_with_short_input() {
        assert_eq!(linear_trend_forecast(&[], 3), vec![0.0, 0.0, 0.0]);
        assert_eq!(linear_trend_forecast(&[0.7], 2), vec![0.7, 0.7]);
    }

    #[test]
    fn learning_curve_needs_three_points() {
        assert_eq!(learning_curve_model(2, &[0.5, 0.6]), LearningCurve::default());
    }

    #[test]
    fn learning_curve_fits_improving_history() {
        let curve = learning_curve_model(4, &[0.2, 0.4, 0.6, 0.8]);
        assert!(approx(curve.initial, 0.2));
        assert!(approx(curve.asymptote, 0.6));
        assert!(approx(curve.rate, 0.2 / 0.4));
        assert!(approx(curve.prediction, 0.2 * 5f64.powf(-0.5) + 0.6));
        assert_eq!(curve.formula(), "P(n) = 0.20 · n^(-0.50) + 0.60");
    }

    #[test]
    fn learning_curve_with_zero_baseline_uses_default_rate() {
        let curve = learning_curve_model(3, &[0.0, 0.0, 0.0]);
        assert!(approx(curve.rate, 0.1));
    }
}
