//! Shared analyzer handle
//!
//! Predictions take a read lock; retraining takes the write lock, so a
//! retrain never interleaves with predictions against the same model.

use crate::analyzer::SentimentAnalyzer;
use crate::dataset::TextRecord;
use crate::evaluator::EvaluationMetrics;
use parking_lot::{RwLock, RwLockReadGuard};
use polarity_core::{Result, SentimentLabel};
use std::sync::Arc;
use tracing::info;

/// Thread-safe handle to a [`SentimentAnalyzer`]
#[derive(Clone)]
pub struct SharedAnalyzer {
    inner: Arc<RwLock<SentimentAnalyzer>>,
}

impl SharedAnalyzer {
    /// Wrap an analyzer for shared use
    pub fn new(analyzer: SentimentAnalyzer) -> Self {
        Self {
            inner: Arc::new(RwLock::new(analyzer)),
        }
    }

    /// Predict the sentiment of raw text
    pub fn predict(&self, text: &str) -> Result<SentimentLabel> {
        metrics::counter!("polarity_predictions_total").increment(1);
        self.inner.read().predict(text)
    }

    /// Posterior probability of every trained class for raw text
    pub fn predict_with_confidence(&self, text: &str) -> Result<Vec<(SentimentLabel, f64)>> {
        metrics::counter!("polarity_predictions_total").increment(1);
        self.inner.read().predict_with_confidence(text)
    }

    /// Replace the dataset, retrain, and evaluate under the write lock.
    ///
    /// On failure the previously trained model, and the records it was
    /// trained on, keep serving predictions.
    pub fn retrain(&self, records: Vec<TextRecord>) -> Result<EvaluationMetrics> {
        let metrics = self.inner.write().retrain(records)?;

        metrics::counter!("polarity_retrains_total").increment(1);
        info!(accuracy = metrics.accuracy, "Retrained shared analyzer");
        Ok(metrics)
    }

    /// Read access to the underlying analyzer
    pub fn read(&self) -> RwLockReadGuard<'_, SentimentAnalyzer> {
        self.inner.read()
    }

    /// Whether the analyzer has a trained model
    pub fn is_trained(&self) -> bool {
        self.inner.read().is_trained()
    }
}
