//! Classifier trait and common types

use async_trait::async_trait;
use polarity_core::{Result, SentimentLabel};

/// Trait for text classifiers
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify the given text
    async fn classify(&self, text: &str) -> Result<ClassificationResult>;

    /// Get the classifier name
    fn name(&self) -> &str;
}

/// Result of classification
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    /// Most probable label
    pub label: SentimentLabel,

    /// Posterior probability of `label` (0.0-1.0)
    pub score: f64,

    /// Posterior of every trained class, in training order
    pub all_scores: Vec<(SentimentLabel, f64)>,

    /// Latency in microseconds
    pub latency_us: u64,
}

impl ClassificationResult {
    /// Create a new classification result
    pub fn new(label: SentimentLabel, score: f64) -> Self {
        Self {
            label,
            score,
            all_scores: Vec::new(),
            latency_us: 0,
        }
    }

    /// Build a result from per-class probabilities, keeping the first maximum
    pub fn from_scores(all_scores: Vec<(SentimentLabel, f64)>) -> Self {
        let (label, score) = all_scores
            .iter()
            .copied()
            .fold(None, |best: Option<(SentimentLabel, f64)>, (label, score)| match best {
                Some((_, best_score)) if score <= best_score => best,
                _ => Some((label, score)),
            })
            .unwrap_or((SentimentLabel::Unknown, 0.0));

        Self {
            all_scores,
            ..Self::new(label, score)
        }
    }

    /// Check if score exceeds threshold
    pub fn exceeds_threshold(&self, threshold: f64) -> bool {
        self.score >= threshold
    }
}
