//! Plain-text evaluation report

use crate::evaluator::{ConfusionMatrix, EvaluationMetrics};
use polarity_core::SentimentLabel;
use std::collections::BTreeSet;
use std::fmt::Write;

const COLUMN_WIDTH: usize = 10;

/// Render metrics as percentages followed by the confusion matrix.
///
/// Rows and columns cover every label that appears as truth or prediction,
/// in canonical label order.
pub fn render_report(
    model_name: &str,
    metrics: &EvaluationMetrics,
    confusion: &ConfusionMatrix,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "--- Evaluation Results for {} ---", model_name);
    let _ = writeln!(out, "Accuracy:  {:.4}%", metrics.accuracy * 100.0);
    let _ = writeln!(out, "Precision: {:.4}%", metrics.precision * 100.0);
    let _ = writeln!(out, "Recall:    {:.4}%", metrics.recall * 100.0);
    let _ = writeln!(out, "F1 Score:  {:.4}%", metrics.f1 * 100.0);
    let _ = writeln!(out);

    let labels: BTreeSet<SentimentLabel> = confusion
        .iter()
        .flat_map(|(truth, row)| std::iter::once(*truth).chain(row.keys().copied()))
        .collect();

    let _ = writeln!(out, "Confusion Matrix (rows = actual, columns = predicted):");
    let _ = write!(out, "{:>w$}", "", w = COLUMN_WIDTH);
    for label in &labels {
        let _ = write!(out, "{:>w$}", label.as_str(), w = COLUMN_WIDTH);
    }
    let _ = writeln!(out);

    for truth in &labels {
        let _ = write!(out, "{:>w$}", truth.as_str(), w = COLUMN_WIDTH);
        for predicted in &labels {
            let count = confusion
                .get(truth)
                .and_then(|row| row.get(predicted))
                .copied()
                .unwrap_or(0);
            let _ = write!(out, "{:>w$}", count, w = COLUMN_WIDTH);
        }
        let _ = writeln!(out);
    }

    out
}
