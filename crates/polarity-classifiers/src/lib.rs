//! Polarity Classifiers
//!
//! Supervised sentiment classification over bag-of-words features.
//!
//! Data flows one way:
//! - tokens → [`Vocabulary`] (frequency-ranked, deterministic tiebreak)
//! - vocabulary → feature vectors ([`FeatureExtractor`], count or TF-IDF)
//! - feature vectors → trained [`NaiveBayes`] model
//! - model + held-out vectors → [`EvaluationMetrics`] and a confusion matrix
//!
//! [`SentimentAnalyzer`] wires the stages together behind a text-level API,
//! and [`SentimentClassifier`] exposes a trained analyzer through the async
//! [`Classifier`] interface.

pub mod analyzer;
pub mod classifier;
pub mod config;
pub mod dataset;
pub mod evaluator;
pub mod features;
pub mod model;
pub mod naive_bayes;
pub mod preprocess;
pub mod report;
pub mod sentiment;
pub mod shared;
pub mod vocabulary;

pub use analyzer::SentimentAnalyzer;
pub use classifier::{ClassificationResult, Classifier};
pub use config::{DatasetConfig, SentimentConfig};
pub use dataset::{load_csv, read_csv, train_validation_split, CsvOptions, TextRecord};
pub use evaluator::{score_predictions, ConfusionMatrix, EvaluationMetrics, Evaluator};
pub use features::{FeatureExtractor, WeightingMode};
pub use model::Model;
pub use naive_bayes::{NaiveBayes, DEFAULT_ALPHA};
pub use preprocess::Preprocessor;
pub use report::render_report;
pub use sentiment::SentimentClassifier;
pub use shared::SharedAnalyzer;
pub use vocabulary::{DocumentFrequencies, Vocabulary};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::analyzer::SentimentAnalyzer;
    pub use crate::classifier::{ClassificationResult, Classifier};
    pub use crate::evaluator::{EvaluationMetrics, Evaluator};
    pub use crate::features::{FeatureExtractor, WeightingMode};
    pub use crate::model::Model;
    pub use crate::naive_bayes::NaiveBayes;
    pub use crate::vocabulary::Vocabulary;
    pub use polarity_core::prelude::*;
}
