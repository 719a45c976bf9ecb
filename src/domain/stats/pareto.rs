//! Pareto dominance and frontier extraction.

use serde::{Deserialize, Serialize};

/// Returns true if `a` dominates `b`: at least as good on every objective
/// and strictly better on at least one. All objectives are maximised.
///
/// # Edge Cases
/// - Equal points: neither dominates
/// - Different lengths: never dominates
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut strictly_better_on_one = false;
    for (x, y) in a.iter().zip(b) {
        if x < y {
            return false;
        }
        if x > y {
            strictly_better_on_one = true;
        }
    }
    strictly_better_on_one
}

/// Returns true if no point in `points` dominates `point`.
pub fn is_pareto_optimal(point: &[f64], points: &[Vec<f64>]) -> bool {
    !points.iter().any(|other| dominates(other, point))
}

/// Indices of the non-dominated points, in input order.
pub fn pareto_frontier_indices(points: &[Vec<f64>]) -> Vec<usize> {
    points
        .iter()
        .enumerate()
        .filter(|(_, point)| is_pareto_optimal(point, points))
        .map(|(index, _)| index)
        .collect()
}

/// Output metrics of one persona, as measured on generated code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaMetrics {
    pub persona_id: String,
    /// Higher is better.
    pub instructiveness_index: f64,
    /// Higher is better.
    pub quality_score: f64,
    /// Lower is better.
    pub lines_of_code: f64,
}

impl PersonaMetrics {
    /// Objective vector with every objective oriented for maximisation.
    pub fn objectives(&self) -> Vec<f64> {
        vec![
            self.instructiveness_index,
            self.quality_score,
            -self.lines_of_code,
        ]
    }
}

/// Personas no other persona dominates, in input order.
pub fn find_pareto_frontier(metrics: &[PersonaMetrics]) -> Vec<&PersonaMetrics> {
    let points: Vec<Vec<f64>> = metrics.iter().map(PersonaMetrics::objectives).collect();
    pareto_frontier_indices(&points)
        .into_iter()
        .map(|index| &metrics[index])
        .collect()
}

/// How many entries of `all` dominate `candidate`.
///
/// Entries equal to the candidate are skipped.
pub fn dominated_count(candidate: &PersonaMetrics, all: &[PersonaMetrics]) -> usize {
    let point = candidate.objectives();
    all.iter()
        .filter(|other| *other != candidate)
        .filter(|other| dominates(&other.objectives(), &point))
        .count()
}
