// Scoring policy for remote category scores.
//
// The threshold and the set of categories that may flag content encode a
// false-positive/false-negative tradeoff, so both come from configuration.

use anyhow::Result;

use crate::remote::traits::{Category, CategoryScore};

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringPolicy {
    threshold: f64,
    /// Enabled categories, kept in declaration order.
    categories: Vec<Category>,
}

impl ScoringPolicy {
    pub const DEFAULT_THRESHOLD: f64 = 0.5;

    /// Threshold must lie in [0, 1]. Duplicate categories are collapsed.
    pub fn new(threshold: f64, categories: impl IntoIterator<Item = Category>) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            anyhow::bail!("Threshold must be between 0 and 1, got {threshold}");
        }
        let mut categories: Vec<Category> = categories.into_iter().collect();
        categories.sort();
        categories.dedup();
        Ok(Self {
            threshold,
            categories,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Enabled categories whose score is strictly above the threshold,
    /// in declaration order regardless of the order scores arrive in.
    pub fn flagged(&self, scores: &[CategoryScore]) -> Vec<Category> {
        self.categories
            .iter()
            .copied()
            .filter(|category| {
                scores
                    .iter()
                    .any(|s| s.category == *category && s.score > self.threshold)
            })
            .collect()
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
            categories: Category::ALL.to_vec(),
        }
    }
}
