//! Model evaluation
//!
//! Runs a trained [`Model`] over held-out vectors and reports accuracy,
//! macro precision/recall, F1 and the confusion matrix.
//!
//! F1 is computed once from the macro-averaged precision and recall rather
//! than by averaging per-label F1 scores; the two differ and callers compare
//! against the former.

use crate::model::Model;
use polarity_core::{Error, FeatureVector, Result, SentimentLabel};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Counts keyed by true label, then predicted label
pub type ConfusionMatrix = BTreeMap<SentimentLabel, BTreeMap<SentimentLabel, usize>>;

/// Summary metrics from one evaluation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EvaluationMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Evaluates a trained model without mutating it
pub struct Evaluator<'a> {
    model: &'a dyn Model,
    confusion: ConfusionMatrix,
    metrics: EvaluationMetrics,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator over a model
    pub fn new(model: &'a dyn Model) -> Self {
        Self {
            model,
            confusion: ConfusionMatrix::new(),
            metrics: EvaluationMetrics::default(),
        }
    }

    /// Evaluate the model on labeled validation vectors.
    ///
    /// An empty validation set yields all-zero metrics rather than an error.
    pub fn evaluate(&mut self, validation: &[FeatureVector]) -> Result<EvaluationMetrics> {
        self.confusion.clear();
        self.metrics = EvaluationMetrics::default();

        if validation.is_empty() {
            warn!("Validation set is empty, reporting zero metrics");
            return Ok(self.metrics);
        }
        if !self.model.is_trained() {
            return Err(Error::NotTrained);
        }

        let mut outcomes = Vec::with_capacity(validation.len());
        for example in validation {
            let predicted = self.model.predict(&example.values)?;
            outcomes.push((example.label, predicted));
        }

        let (metrics, confusion) = score_predictions(&outcomes);
        info!(
            model = self.model.name(),
            examples = validation.len(),
            accuracy = metrics.accuracy,
            f1 = metrics.f1,
            "Evaluation complete"
        );

        self.metrics = metrics;
        self.confusion = confusion;
        Ok(metrics)
    }

    /// Confusion matrix from the last evaluation
    pub fn confusion_matrix(&self) -> &ConfusionMatrix {
        &self.confusion
    }

    /// Metrics from the last evaluation
    pub fn metrics(&self) -> EvaluationMetrics {
        self.metrics
    }

    /// Name of the evaluated model
    pub fn model_name(&self) -> &str {
        self.model.name()
    }
}

/// Compute metrics and the confusion matrix from `(true, predicted)` pairs
pub fn score_predictions(
    outcomes: &[(SentimentLabel, SentimentLabel)],
) -> (EvaluationMetrics, ConfusionMatrix) {
    let mut confusion = ConfusionMatrix::new();
    for (truth, predicted) in outcomes {
        *confusion
            .entry(*truth)
            .or_default()
            .entry(*predicted)
            .or_insert(0) += 1;
    }

    let mut precisions = Vec::new();
    let mut recalls = Vec::new();
    for label in confusion.keys() {
        precisions.extend(precision_for(&confusion, *label));
        recalls.extend(recall_for(&confusion, *label));
    }

    let precision = mean(&precisions);
    let recall = mean(&recalls);
    let metrics = EvaluationMetrics {
        accuracy: accuracy(&confusion),
        precision,
        recall,
        f1: f1_score(precision, recall),
    };

    (metrics, confusion)
}

/// Fraction of examples on the diagonal
pub fn accuracy(confusion: &ConfusionMatrix) -> f64 {
    let mut correct = 0;
    let mut total = 0;
    for (truth, row) in confusion {
        for (predicted, count) in row {
            if truth == predicted {
                correct += count;
            }
            total += count;
        }
    }

    if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64
    }
}

/// `TP / (TP + FP)`, or `None` when the label was never predicted
pub fn precision_for(confusion: &ConfusionMatrix, label: SentimentLabel) -> Option<f64> {
    let mut true_positives = 0;
    let mut false_positives = 0;
    for (truth, row) in confusion {
        if let Some(count) = row.get(&label) {
            if *truth == label {
                true_positives += count;
            } else {
                false_positives += count;
            }
        }
    }

    ratio(true_positives, true_positives + false_positives)
}

/// `TP / (TP + FN)`, or `None` when the label never occurs as truth
pub fn recall_for(confusion: &ConfusionMatrix, label: SentimentLabel) -> Option<f64> {
    let row = confusion.get(&label)?;
    let true_positives = row.get(&label).copied().unwrap_or(0);
    let total: usize = row.values().sum();

    ratio(true_positives, total)
}

/// Harmonic mean of precision and recall, 0 when both are 0
pub fn f1_score(precision: f64, recall: f64) -> f64 {
    if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}

fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    (denominator > 0).then(|| numerator as f64 / denominator as f64)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
