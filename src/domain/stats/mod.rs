//! Stats Module - catalog-agnostic numeric primitives.
//!
//! Every function here is pure and works on plain slices or small fixed
//! shapes. Degenerate input (empty series, zero variance, singular
//! matrices) is answered with a documented neutral value rather than an
//! error; only contract violations such as mismatched vector lengths are
//! reported.
//!
//! # Components
//!
//! - `information` - Shannon entropy, prompt diversity, mutual information
//! - `bayesian` - posterior shortcut, belief update, credible interval
//! - `markov` - Dreyfus-level transition projection, expected value
//! - `forecasting` - exponential smoothing, linear trend, learning curve
//! - `pareto` - dominance, frontier, dominated count
//! - `correlation` - Pearson r, Cohen's d
//! - `distance` - weighted Euclidean and Mahalanobis distance
//! - `clustering` - deterministic k-means over persona style features

mod bayesian;
mod clustering;
mod correlation;
mod distance;
mod forecasting;
mod information;
mod markov;
mod pareto;

pub use bayesian::{
    credible_interval, posterior_probability, update_beliefs, ConfidenceLevel, DEFAULT_LIKELIHOOD,
};
pub use clustering::{
    cluster_personas, k_means, Clustering, PersonaStyle, DEFAULT_KMEANS_ITERATIONS,
};
pub use correlation::{
    effect_size, pearson_correlation, Correlation, EffectMagnitude, EffectSize,
};
pub use distance::{
    euclidean_distance, invert_matrix, mahalanobis_distance, weighted_euclidean_distance,
};
pub use forecasting::{
    exponential_smoothing, learning_curve_model, linear_trend_forecast, LearningCurve,
    DEFAULT_SMOOTHING_ALPHA,
};
pub use information::{mutual_information, prompt_diversity, shannon_entropy, PromptDiversity};
pub use markov::{expected_value, LevelDistribution, TransitionMatrix};
pub use pareto::{
    dominated_count, dominates, find_pareto_frontier, is_pareto_optimal, pareto_frontier_indices,
    PersonaMetrics,
};
