//! K-means grouping of personas by their measured output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::euclidean_distance;
use crate::domain::foundation::ValidationError;

/// Iterations run by [`cluster_personas`].
pub const DEFAULT_KMEANS_ITERATIONS: usize = 10;

/// Cluster assignment for every input point plus the final centroids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Clustering {
    /// `assignments[i]` is the cluster of input point `i`.
    pub assignments: Vec<usize>,
    pub centroids: Vec<Vec<f64>>,
}

impl Clustering {
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Input indices grouped by cluster, clusters in ascending order.
    /// Clusters that ended up with no points are omitted.
    pub fn members(&self) -> BTreeMap<usize, Vec<usize>> {
        let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (index, cluster) in self.assignments.iter().enumerate() {
            groups.entry(*cluster).or_default().push(index);
        }
        groups
    }
}

/// Deterministic k-means.
///
/// # Algorithm
/// Centroids start at the first `k` points. Each iteration assigns every
/// point to its nearest centroid (ties go to the lower cluster index), then
/// moves each centroid to the mean of its points. A centroid with no points
/// stays where it is.
///
/// # Edge Cases
/// - `k == 0` or fewer than `k` points: empty clustering
/// - `iterations == 0`: points are assigned to the initial centroids once
///
/// # Errors
///
/// Returns `DimensionMismatch` if the points differ in length.
pub fn k_means(points: &[Vec<f64>], k: usize, iterations: usize) -> Result<Clustering, ValidationError> {
    if k == 0 || points.len() < k {
        return Ok(Clustering::default());
    }
    let dimensions = points[0].len();
    if let Some(point) = points.iter().find(|p| p.len() != dimensions) {
        return Err(ValidationError::dimension_mismatch("points", dimensions, point.len()));
    }

    let mut centroids: Vec<Vec<f64>> = points[..k].to_vec();
    let mut assignments = assign(points, &centroids)?;

    for _ in 0..iterations {
        for (cluster, centroid) in centroids.iter_mut().enumerate() {
            let mut sum = vec![0.0; dimensions];
            let mut count = 0usize;
            for (point, _) in points.iter().zip(&assignments).filter(|(_, a)| **a == cluster) {
                for (s, x) in sum.iter_mut().zip(point) {
                    *s += x;
                }
                count += 1;
            }
            if count > 0 {
                *centroid = sum.into_iter().map(|s| s / count as f64).collect();
            }
        }
        assignments = assign(points, &centroids)?;
    }

    Ok(Clustering {
        assignments,
        centroids,
    })
}

fn assign(points: &[Vec<f64>], centroids: &[Vec<f64>]) -> Result<Vec<usize>, ValidationError> {
    points
        .iter()
        .map(|point| {
            let mut best = 0;
            let mut best_distance = f64::INFINITY;
            for (cluster, centroid) in centroids.iter().enumerate() {
                let distance = euclidean_distance(point, centroid)?;
                if distance < best_distance {
                    best = cluster;
                    best_distance = distance;
                }
            }
            Ok(best)
        })
        .collect()
}

/// Code-style features of one persona's generated output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaStyle {
    pub persona_id: String,
    pub comment_ratio: f64,
    pub instructiveness_index: f64,
    pub quality_score: f64,
    pub type_hint_ratio: f64,
}

impl PersonaStyle {
    pub fn features(&self) -> Vec<f64> {
        vec![
            self.comment_ratio,
            self.instructiveness_index,
            self.quality_score,
            self.type_hint_ratio,
        ]
    }
}

/// Groups personas into `k` style clusters, keyed by cluster index.
///
/// Returns an empty map for fewer than `k` personas.
pub fn cluster_personas(styles: &[PersonaStyle], k: usize) -> BTreeMap<usize, Vec<String>> {
    let points: Vec<Vec<f64>> = styles.iter().map(PersonaStyle::features).collect();
    // Every feature vector has the same length, so this cannot fail.
    let clustering = k_means(&points, k, DEFAULT_KMEANS_ITERATIONS).unwrap_or_default();

    clustering
        .members()
        .into_iter()
        .map(|(cluster, indices)| {
            let ids = indices.into_iter().map(|i| styles[i].persona_id.clone()).collect();
            (cluster, ids)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(id: &str, comments: f64, instructive: f64, quality: f64, hints: f64) -> PersonaStyle {
        PersonaStyle {
            persona_id: id.to_string(),
            comment_ratio: comments,
            instructiveness_index: instructive,
            quality_score: quality,
            type_hint_ratio: hints,
        }
    }

    #[test]
    fn separates_two_obvious_groups() {
        let points = vec![
            vec![0.0, 0.0],
            vec![10.0, 10.0],
            vec![0.2, 0.1],
            vec![9.8, 10.1],
            vec![0.1, 0.3],
        ];
        let clustering = k_means(&points, 2, DEFAULT_KMEANS_ITERATIONS).unwrap();

        assert_eq!(clustering.assignments, vec![0, 1, 0, 1, 0]);
        assert!((clustering.centroids[0][0] - 0.1).abs() < 1e-12);
        assert!((clustering.centroids[1][1] - 10.05).abs() < 1e-12);
    }

    #[test]
    fn same_input_gives_same_clustering() {
        let points: Vec<Vec<f64>> = (0..12)
            .map(|i| vec![(i % 4) as f64, (i * 7 % 5) as f64])
            .collect();
        let first = k_means(&points, 3, 10).unwrap();
        let second = k_means(&points, 3, 10).unwrap();
        assert_eq!(first, second);
        assert!(first.assignments.iter().all(|a| *a < 3));
    }

    #[test]
    fn too_few_points_gives_empty_result() {
        let points = vec![vec![1.0], vec![2.0]];
        assert!(k_means(&points, 3, 10).unwrap().is_empty());
        assert!(k_means(&points, 0, 10).unwrap().is_empty());
        assert!(k_means(&[], 1, 10).unwrap().is_empty());
    }

    #[test]
    fn ragged_points_are_rejected() {
        let points = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(
            k_means(&points, 1, 10),
            Err(ValidationError::DimensionMismatch { expected: 2, actual: 1, .. })
        ));
    }

    #[test]
    fn zero_iterations_assigns_to_initial_centroids() {
        let points = vec![vec![0.0], vec![10.0], vec![1.0], vec![9.0]];
        let clustering = k_means(&points, 2, 0).unwrap();
        assert_eq!(clustering.assignments, vec![0, 1, 0, 1]);
        assert_eq!(clustering.centroids, vec![vec![0.0], vec![10.0]]);
    }

    #[test]
    fn clusters_personas_by_style() {
        let styles = vec![
            style("edu_novice", 0.45, 0.9, 0.6, 0.1),
            style("tech_expert", 0.05, 0.2, 0.95, 0.9),
            style("edu_competent", 0.40, 0.85, 0.65, 0.2),
            style("tech_proficient", 0.08, 0.25, 0.9, 0.85),
        ];
        let clusters = cluster_personas(&styles, 2);

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[&0], vec!["edu_novice", "edu_competent"]);
        assert_eq!(clusters[&1], vec!["tech_expert", "tech_proficient"]);
    }

    #[test]
    fn clustering_fewer_personas_than_clusters_is_empty() {
        let styles = vec![style("edu_novice", 0.45, 0.9, 0.6, 0.1)];
        assert!(cluster_personas(&styles, 2).is_empty());
    }
}
