//! Naive Bayes sentiment classifier
//!
//! Exposes a trained [`SharedAnalyzer`] through the async [`Classifier`]
//! interface, reporting the posterior of every class.

use crate::classifier::{ClassificationResult, Classifier};
use crate::shared::SharedAnalyzer;
use polarity_core::Result;
use std::time::Instant;

pub struct SentimentClassifier {
    name: String,
    analyzer: SharedAnalyzer,
}

impl SentimentClassifier {
    pub fn new(analyzer: SharedAnalyzer) -> Self {
        Self::with_name("sentiment", analyzer)
    }

    pub fn with_name(name: impl Into<String>, analyzer: SharedAnalyzer) -> Self {
        Self {
            name: name.into(),
            analyzer,
        }
    }

    /// Handle to the analyzer backing this classifier
    pub fn analyzer(&self) -> &SharedAnalyzer {
        &self.analyzer
    }
}

#[async_trait::async_trait]
impl Classifier for SentimentClassifier {
    async fn classify(&self, text: &str) -> Result<ClassificationResult> {
        let start = Instant::now();

        let scores = self.analyzer.predict_with_confidence(text)?;
        let mut result = ClassificationResult::from_scores(scores);
        result.latency_us = start.elapsed().as_micros() as u64;

        Ok(result)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
