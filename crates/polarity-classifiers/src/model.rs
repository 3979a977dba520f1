//! Model trait shared by supervised classifiers

use polarity_core::{FeatureVector, Result, SentimentLabel};

/// Trait for models trained on labeled feature vectors
pub trait Model: Send + Sync {
    /// Train on a batch of labeled vectors produced over a vocabulary of
    /// `vocabulary_size` features. Any previous trained state is replaced.
    fn train(&mut self, training: &[FeatureVector], vocabulary_size: usize) -> Result<()>;

    /// Predict the label of a feature vector
    fn predict(&self, features: &[f64]) -> Result<SentimentLabel>;

    /// Whether a training run has completed successfully
    fn is_trained(&self) -> bool;

    /// Get the model name
    fn name(&self) -> &str;
}
