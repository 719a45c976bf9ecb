//! Information-theoretic measures over generated code and prompts.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Shannon entropy (base 2) over the characters of `text`.
///
/// Spaces and newlines are not symbols.
///
/// # Edge Cases
/// - Empty input, or input of only spaces/newlines: 0
/// - A single repeated symbol: 0
pub fn shannon_entropy(text: &str) -> f64 {
    let mut frequencies: HashMap<char, usize> = HashMap::new();
    let mut total = 0usize;

    for c in text.chars().filter(|c| *c != ' ' && *c != '\n') {
        *frequencies.entry(c).or_insert(0) += 1;
        total += 1;
    }

    if total == 0 {
        return 0.0;
    }

    frequencies
        .values()
        .map(|&count| {
            let p = count as f64 / total as f64;
            -p * p.log2()
        })
        .sum()
}

/// Mutual information between two texts, `max(0, H(a) + H(b) - H(a‖b))`.
///
/// The joint entropy is approximated by the entropy of the concatenation.
pub fn mutual_information(a: &str, b: &str) -> f64 {
    let combined = format!("{}{}", a, b);
    let mi = shannon_entropy(a) + shannon_entropy(b) - shannon_entropy(&combined);
    mi.max(0.0)
}

/// Lexical diversity of a prompt set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptDiversity {
    /// Gini-Simpson index `1 - Σ p²` over all tokens.
    pub diversity_index: f64,
    /// Mean pairwise Jaccard distance between per-prompt token sets.
    pub average_jaccard_distance: f64,
    /// Distinct tokens divided by total tokens.
    pub unique_token_ratio: f64,
}

/// Measures how varied a set of prompts is.
///
/// Tokens are lowercase, whitespace-separated words.
///
/// # Edge Cases
/// - No prompts: all zeros
/// - A single prompt: Jaccard distance 0 (no pairs)
/// - Two empty prompts: Jaccard distance 1 (empty union has similarity 0)
pub fn prompt_diversity<S: AsRef<str>>(prompts: &[S]) -> PromptDiversity {
    if prompts.is_empty() {
        return PromptDiversity::default();
    }

    let tokenized: Vec<Vec<String>> = prompts
        .iter()
        .map(|p| {
            p.as_ref()
                .to_lowercase()
                .split_whitespace()
                .map(str::to_owned)
                .collect()
        })
        .collect();

    let token_sets: Vec<HashSet<&str>> = tokenized
        .iter()
        .map(|tokens| tokens.iter().map(String::as_str).collect())
        .collect();

    let mut distances = Vec::new();
    for i in 0..token_sets.len() {
        for j in (i + 1)..token_sets.len() {
            let intersection = token_sets[i].intersection(&token_sets[j]).count();
            let union = token_sets[i].union(&token_sets[j]).count();
            let similarity = if union > 0 {
                intersection as f64 / union as f64
            } else {
                0.0
            };
            distances.push(1.0 - similarity);
        }
    }
    let average_jaccard_distance = if distances.is_empty() {
        0.0
    } else {
        distances.iter().sum::<f64>() / distances.len() as f64
    };

    let mut frequencies: HashMap<&str, usize> = HashMap::new();
    let mut total = 0usize;
    for token in tokenized.iter().flatten() {
        *frequencies.entry(token.as_str()).or_insert(0) += 1;
        total += 1;
    }

    if total == 0 {
        return PromptDiversity {
            diversity_index: 0.0,
            average_jaccard_distance,
            unique_token_ratio: 0.0,
        };
    }

    let simpson: f64 = frequencies
        .values()
        .map(|&count| {
            let p = count as f64 / total as f64;
            p * p
        })
        .sum();

    PromptDiversity {
        diversity_index: 1.0 - simpson,
        average_jaccard_distance,
        unique_token_ratio: frequencies.len() as f64 / total as f64,
    }
}
