//! End-to-end sentiment analyzer
//!
//! Wires preprocessing, vocabulary construction, feature extraction, Naive
//! Bayes training and evaluation behind one text-level API.

use crate::config::SentimentConfig;
use crate::dataset::{self, TextRecord};
use crate::evaluator::{ConfusionMatrix, EvaluationMetrics, Evaluator};
use crate::features::FeatureExtractor;
use crate::model::Model;
use crate::naive_bayes::NaiveBayes;
use crate::preprocess::Preprocessor;
use polarity_core::{Error, FeatureVector, LabeledDocument, Result, SentimentLabel};
use std::path::Path;
use tracing::info;

/// Text-level sentiment analysis pipeline
#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    config: SentimentConfig,
    preprocessor: Preprocessor,
    extractor: FeatureExtractor,
    model: NaiveBayes,

    train_records: Vec<TextRecord>,
    validation_records: Vec<TextRecord>,
    validation_features: Vec<FeatureVector>,

    metrics: EvaluationMetrics,
    confusion: ConfusionMatrix,
}

/// Vocabulary and model fitted off to the side, not yet visible
struct StagedModel {
    extractor: FeatureExtractor,
    model: NaiveBayes,
    validation_features: Vec<FeatureVector>,
}

impl SentimentAnalyzer {
    /// Create an untrained analyzer
    pub fn new(config: SentimentConfig) -> Result<Self> {
        let mut preprocessor = Preprocessor::new(config.remove_stop_words)?;
        if let Some(path) = &config.stop_words_path {
            preprocessor.load_stop_words(path)?;
        }

        Ok(Self {
            preprocessor,
            extractor: FeatureExtractor::new(config.weighting),
            model: NaiveBayes::new(config.alpha),
            train_records: Vec::new(),
            validation_records: Vec::new(),
            validation_features: Vec::new(),
            metrics: EvaluationMetrics::default(),
            confusion: ConfusionMatrix::new(),
            config,
        })
    }

    /// Load a CSV dataset and split it per the configured ratio
    pub fn load_training_data(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let records = dataset::load_csv(path, self.config.dataset.csv)?;
        let count = records.len();
        self.set_training_data(records)?;
        Ok(count)
    }

    /// Split records into training and validation sets
    pub fn set_training_data(&mut self, records: Vec<TextRecord>) -> Result<()> {
        let (train, validation) =
            dataset::train_validation_split(&records, self.config.train_ratio, self.config.seed)?;
        self.set_split(train, validation);
        Ok(())
    }

    /// Use an explicit training/validation split
    pub fn set_split(&mut self, train: Vec<TextRecord>, validation: Vec<TextRecord>) {
        self.train_records = train;
        self.validation_records = validation;
    }

    fn documents(&self, records: &[TextRecord]) -> Vec<LabeledDocument> {
        records
            .iter()
            .map(|r| LabeledDocument {
                tokens: self.preprocessor.process(&r.text),
                label: r.label,
            })
            .collect()
    }

    /// Build the vocabulary from the training split and train the model.
    ///
    /// The vocabulary and model are replaced together, and only when
    /// training succeeds.
    pub fn train(&mut self) -> Result<()> {
        let staged = self.fit(&self.train_records, &self.validation_records)?;
        self.commit(staged);
        Ok(())
    }

    /// Split `records`, train on them and evaluate, in one step.
    ///
    /// Nothing is replaced unless training succeeds: on failure the
    /// analyzer keeps its previous records, vocabulary and model.
    pub fn retrain(&mut self, records: Vec<TextRecord>) -> Result<EvaluationMetrics> {
        let (train, validation) =
            dataset::train_validation_split(&records, self.config.train_ratio, self.config.seed)?;
        let staged = self.fit(&train, &validation)?;

        self.set_split(train, validation);
        self.commit(staged);
        self.evaluate()
    }

    fn fit(&self, train: &[TextRecord], validation: &[TextRecord]) -> Result<StagedModel> {
        if train.is_empty() {
            return Err(Error::invalid_input("no training data loaded"));
        }

        let train_documents = self.documents(train);
        let validation_documents = self.documents(validation);

        let mut extractor = FeatureExtractor::new(self.config.weighting);
        extractor.fit_documents(
            &train_documents,
            self.config.min_frequency,
            self.config.max_vocabulary_size,
        );

        let train_features = extractor.batch_transform(&train_documents);
        let mut model = NaiveBayes::new(self.config.alpha);
        model.train(&train_features, extractor.vocabulary_size())?;

        info!(
            "Analyzer trained on {} documents with vocabulary size {}",
            train_features.len(),
            extractor.vocabulary_size()
        );

        Ok(StagedModel {
            validation_features: extractor.batch_transform(&validation_documents),
            extractor,
            model,
        })
    }

    fn commit(&mut self, staged: StagedModel) {
        self.extractor = staged.extractor;
        self.model = staged.model;
        self.validation_features = staged.validation_features;
        self.metrics = EvaluationMetrics::default();
        self.confusion.clear();
    }

    /// Evaluate on the validation split
    pub fn evaluate(&mut self) -> Result<EvaluationMetrics> {
        if !self.model.is_trained() {
            return Err(Error::NotTrained);
        }

        let mut evaluator = Evaluator::new(&self.model);
        let metrics = evaluator.evaluate(&self.validation_features)?;
        self.confusion = evaluator.confusion_matrix().clone();
        self.metrics = metrics;

        Ok(metrics)
    }

    fn features(&self, text: &str) -> Result<Vec<f64>> {
        if !self.model.is_trained() {
            return Err(Error::NotTrained);
        }
        Ok(self.extractor.extract(&self.preprocessor.process(text)))
    }

    /// Predict the sentiment of raw text
    pub fn predict(&self, text: &str) -> Result<SentimentLabel> {
        let features = self.features(text)?;
        self.model.predict(&features)
    }

    /// Posterior probability of every trained class for raw text
    pub fn predict_with_confidence(&self, text: &str) -> Result<Vec<(SentimentLabel, f64)>> {
        let features = self.features(text)?;
        self.model.predict_proba(&features)
    }

    /// Whether training has succeeded
    pub fn is_trained(&self) -> bool {
        self.model.is_trained()
    }

    /// Metrics from the last evaluation
    pub fn metrics(&self) -> EvaluationMetrics {
        self.metrics
    }

    /// Confusion matrix from the last evaluation
    pub fn confusion_matrix(&self) -> &ConfusionMatrix {
        &self.confusion
    }

    pub fn config(&self) -> &SentimentConfig {
        &self.config
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    pub fn model(&self) -> &NaiveBayes {
        &self.model
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    /// Sizes of the training and validation splits
    pub fn split_sizes(&self) -> (usize, usize) {
        (self.train_records.len(), self.validation_records.len())
    }
}
