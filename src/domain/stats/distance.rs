//! Distance metrics between feature vectors.

use tracing::warn;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

const SINGULARITY_EPSILON: f64 = 1e-12;

/// Euclidean distance.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the vectors differ in length.
pub fn euclidean_distance(x: &[f64], y: &[f64]) -> Result<f64, ValidationError> {
    weighted_euclidean_distance(x, y, None)
}

/// Weighted Euclidean distance `√(Σ wᵢ·(xᵢ - yᵢ)²)`; unit weights when
/// `weights` is `None`.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the vectors or weights differ in length.
pub fn weighted_euclidean_distance(
    x: &[f64],
    y: &[f64],
    weights: Option<&[f64]>,
) -> Result<f64, ValidationError> {
    if x.len() != y.len() {
        return Err(ValidationError::dimension_mismatch("y", x.len(), y.len()));
    }
    if let Some(w) = weights {
        if w.len() != x.len() {
            return Err(ValidationError::dimension_mismatch("weights", x.len(), w.len()));
        }
    }

    let sum: f64 = x
        .iter()
        .zip(y)
        .enumerate()
        .map(|(i, (a, b))| {
            let w = weights.map_or(1.0, |w| w[i]);
            w * (a - b).powi(2)
        })
        .sum();

    Ok(sum.sqrt())
}

/// Mahalanobis distance `√((x-y)ᵀ Σ⁻¹ (x-y))`.
///
/// With no covariance the identity is assumed, which reduces to Euclidean
/// distance. A singular or malformed covariance matrix also falls back to
/// Euclidean distance.
///
/// # Errors
///
/// Returns `DimensionMismatch` if `x` and `y` differ in length.
pub fn mahalanobis_distance(
    x: &[f64],
    y: &[f64],
    covariance: Option<&[Vec<f64>]>,
) -> Result<f64, ValidationError> {
    let euclidean = euclidean_distance(x, y)?;

    let Some(covariance) = covariance else {
        return Ok(euclidean);
    };

    let inverse = match invert_matrix(covariance) {
        Ok(inverse) if inverse.len() == x.len() => inverse,
        Ok(inverse) => {
            warn!(
                expected = x.len(),
                actual = inverse.len(),
                "covariance dimension mismatch, using euclidean distance"
            );
            return Ok(euclidean);
        }
        Err(err) => {
            warn!(error = %err, "covariance not invertible, using euclidean distance");
            return Ok(euclidean);
        }
    };

    let diff: Vec<f64> = x.iter().zip(y).map(|(a, b)| a - b).collect();
    let quadratic: f64 = inverse
        .iter()
        .zip(&diff)
        .map(|(row, di)| di * row.iter().zip(&diff).map(|(m, dj)| m * dj).sum::<f64>())
        .sum();

    if quadratic < 0.0 {
        warn!(quadratic, "covariance not positive definite, using euclidean distance");
        return Ok(euclidean);
    }

    Ok(quadratic.sqrt())
}

/// Inverts a square matrix by Gauss-Jordan elimination with partial pivoting.
///
/// # Errors
///
/// - `InvalidFormat` if the matrix is empty or not square
/// - `SingularMatrix` if a pivot vanishes
pub fn invert_matrix(matrix: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, DomainError> {
    let n = matrix.len();
    if n == 0 || matrix.iter().any(|row| row.len() != n) {
        return Err(DomainError::from(ValidationError::invalid_format(
            "covariance",
            "matrix must be square and non-empty",
        )));
    }

    let mut a: Vec<Vec<f64>> = matrix.to_vec();
    let mut inverse: Vec<Vec<f64>> = (0..n)
        .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect();

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);

        let pivot = a[pivot_row][col];
        if !pivot.is_finite() || pivot.abs() < SINGULARITY_EPSILON {
            return Err(DomainError::new(ErrorCode::SingularMatrix, "Matrix is singular")
                .with_detail("column", col.to_string()));
        }

        a.swap(col, pivot_row);
        inverse.swap(col, pivot_row);

        for j in 0..n {
            a[col][j] /= pivot;
            inverse[col][j] /= pivot;
        }

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = a[row][col];
            if factor == 0.0 {
                continue;
            }
            for j in 0..n {
                a[row][j] -= factor * a[col][j];
                inverse[row][j] -= factor * inverse[col][j];
            }
        }
    }

    Ok(inverse)
}
