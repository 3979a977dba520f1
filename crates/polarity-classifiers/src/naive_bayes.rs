//! Multinomial Naive Bayes
//!
//! Estimates per-class log priors and per-feature log likelihoods with
//! additive smoothing:
//!
//! ```text
//! prior(c)            = ln(count(c) / N)
//! likelihood(c, i)    = ln((W(c, i) + alpha) / (T(c) + alpha * V))
//! default(c)          = ln(alpha / (T(c) + alpha * V))
//! ```
//!
//! `W(c, i)` is the feature mass accumulated for class `c` at index `i` and
//! `T(c)` the total mass of the class. Only features with non-zero mass get an
//! explicit entry; every other lookup falls back to the class default, which
//! is exactly the smoothed value for `W(c, i) = 0`.

use crate::model::Model;
use polarity_core::{Error, FeatureVector, Result, SentimentLabel};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Smoothing used when the configured alpha is not a positive number
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Multinomial Naive Bayes classifier
#[derive(Debug, Clone)]
pub struct NaiveBayes {
    alpha: f64,
    state: Option<TrainedState>,
}

#[derive(Debug, Clone, PartialEq)]
struct TrainedState {
    feature_count: usize,
    /// Classes in the order they were first seen during training
    classes: Vec<ClassModel>,
}

#[derive(Debug, Clone, PartialEq)]
struct ClassModel {
    label: SentimentLabel,
    log_prior: f64,
    log_likelihoods: HashMap<usize, f64>,
    default_log_likelihood: f64,
}

impl ClassModel {
    fn log_likelihood(&self, index: usize) -> f64 {
        self.log_likelihoods
            .get(&index)
            .copied()
            .unwrap_or(self.default_log_likelihood)
    }

    fn score(&self, features: &[f64]) -> f64 {
        features
            .iter()
            .enumerate()
            .filter(|(_, value)| **value > 0.0)
            .fold(self.log_prior, |acc, (index, value)| {
                acc + value * self.log_likelihood(index)
            })
    }
}

/// Per-class sums gathered in one pass over the training set
struct ClassAccumulator {
    label: SentimentLabel,
    documents: usize,
    total_mass: f64,
    feature_mass: HashMap<usize, f64>,
}

impl NaiveBayes {
    /// Create an untrained model.
    ///
    /// A non-positive or non-finite `alpha` is replaced with
    /// [`DEFAULT_ALPHA`] rather than rejected.
    pub fn new(alpha: f64) -> Self {
        let alpha = if alpha > 0.0 && alpha.is_finite() {
            alpha
        } else {
            debug!(alpha, "Non-positive smoothing parameter, using {}", DEFAULT_ALPHA);
            DEFAULT_ALPHA
        };

        Self { alpha, state: None }
    }

    /// Effective smoothing parameter
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Number of features the model was trained on
    pub fn feature_count(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.feature_count)
    }

    /// Classes seen during training, in first-seen order
    pub fn classes(&self) -> Vec<SentimentLabel> {
        self.state
            .as_ref()
            .map(|s| s.classes.iter().map(|c| c.label).collect())
            .unwrap_or_default()
    }

    /// Log prior of a class
    pub fn log_prior(&self, label: SentimentLabel) -> Option<f64> {
        self.class(label).map(|c| c.log_prior)
    }

    /// Smoothed log likelihood of feature `index` given a class
    pub fn log_likelihood(&self, label: SentimentLabel, index: usize) -> Option<f64> {
        let feature_count = self.feature_count()?;
        if index >= feature_count {
            return None;
        }
        self.class(label).map(|c| c.log_likelihood(index))
    }

    /// Log likelihood used for features never observed with a class
    pub fn default_log_likelihood(&self, label: SentimentLabel) -> Option<f64> {
        self.class(label).map(|c| c.default_log_likelihood)
    }

    fn class(&self, label: SentimentLabel) -> Option<&ClassModel> {
        self.state
            .as_ref()
            .and_then(|s| s.classes.iter().find(|c| c.label == label))
    }

    fn trained_state(&self, features: &[f64]) -> Result<&TrainedState> {
        let state = self.state.as_ref().ok_or(Error::NotTrained)?;
        if features.len() != state.feature_count {
            return Err(Error::dimension_mismatch(state.feature_count, features.len()));
        }
        Ok(state)
    }

    /// Unnormalized log posterior of every class, in class order
    pub fn scores(&self, features: &[f64]) -> Result<Vec<(SentimentLabel, f64)>> {
        let state = self.trained_state(features)?;
        Ok(state
            .classes
            .iter()
            .map(|c| (c.label, c.score(features)))
            .collect())
    }

    /// Posterior probability of every class, in class order.
    ///
    /// The log posteriors are shifted by their maximum before exponentiation.
    pub fn predict_proba(&self, features: &[f64]) -> Result<Vec<(SentimentLabel, f64)>> {
        let scores = self.scores(features)?;
        let max = scores
            .iter()
            .map(|(_, s)| *s)
            .fold(f64::NEG_INFINITY, f64::max);
        let sum: f64 = scores.iter().map(|(_, s)| (s - max).exp()).sum();

        Ok(scores
            .into_iter()
            .map(|(label, s)| (label, (s - max).exp() / sum))
            .collect())
    }

    fn fit_state(
        &self,
        training: &[FeatureVector],
        vocabulary_size: usize,
    ) -> Result<TrainedState> {
        if training.is_empty() {
            return Err(Error::invalid_input("training set is empty"));
        }
        if vocabulary_size == 0 {
            return Err(Error::invalid_input("vocabulary is empty"));
        }
        if let Some((position, example)) = training
            .iter()
            .enumerate()
            .find(|(_, example)| example.len() != vocabulary_size)
        {
            return Err(Error::invalid_input(format!(
                "training example {} has {} features, expected {}",
                position,
                example.len(),
                vocabulary_size
            )));
        }
        let invalid = training.iter().enumerate().find_map(|(position, example)| {
            example
                .values
                .iter()
                .find(|v| !(**v >= 0.0 && v.is_finite()))
                .map(|v| (position, *v))
        });
        if let Some((position, value)) = invalid {
            return Err(Error::invalid_input(format!(
                "training example {} has feature value {}, expected a finite non-negative number",
                position, value
            )));
        }

        let mut accumulators: Vec<ClassAccumulator> = Vec::new();
        let mut positions: HashMap<SentimentLabel, usize> = HashMap::new();

        for example in training {
            let position = *positions.entry(example.label).or_insert_with(|| {
                accumulators.push(ClassAccumulator {
                    label: example.label,
                    documents: 0,
                    total_mass: 0.0,
                    feature_mass: HashMap::new(),
                });
                accumulators.len() - 1
            });

            let class = &mut accumulators[position];
            class.documents += 1;
            for (index, value) in example.values.iter().enumerate() {
                if *value != 0.0 {
                    *class.feature_mass.entry(index).or_insert(0.0) += value;
                    class.total_mass += value;
                }
            }
        }

        let total_documents = training.len() as f64;
        let smoothed_vocabulary = self.alpha * vocabulary_size as f64;

        let classes = accumulators
            .into_iter()
            .map(|class| {
                let denominator = class.total_mass + smoothed_vocabulary;
                let log_likelihoods = class
                    .feature_mass
                    .into_iter()
                    .map(|(index, mass)| (index, ((mass + self.alpha) / denominator).ln()))
                    .collect();

                ClassModel {
                    label: class.label,
                    log_prior: (class.documents as f64 / total_documents).ln(),
                    log_likelihoods,
                    default_log_likelihood: (self.alpha / denominator).ln(),
                }
            })
            .collect();

        Ok(TrainedState {
            feature_count: vocabulary_size,
            classes,
        })
    }
}

impl Default for NaiveBayes {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA)
    }
}

impl Model for NaiveBayes {
    fn train(&mut self, training: &[FeatureVector], vocabulary_size: usize) -> Result<()> {
        // Build the new tables first so a failed run leaves the old ones in place.
        let state = self.fit_state(training, vocabulary_size).map_err(|e| {
            warn!("Naive Bayes training failed: {}", e);
            e
        })?;

        info!(
            "Trained Naive Bayes with {} examples, {} features and {} classes",
            training.len(),
            vocabulary_size,
            state.classes.len()
        );

        self.state = Some(state);
        Ok(())
    }

    fn predict(&self, features: &[f64]) -> Result<SentimentLabel> {
        let state = self.trained_state(features)?;

        let mut best: Option<(SentimentLabel, f64)> = None;
        for class in &state.classes {
            let score = class.score(features);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((class.label, score)),
            }
        }

        Ok(best.map_or(SentimentLabel::Unknown, |(label, _)| label))
    }

    fn is_trained(&self) -> bool {
        self.state.is_some()
    }

    fn name(&self) -> &str {
        "Naive Bayes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn vector(values: &[f64], label: SentimentLabel) -> FeatureVector {
        FeatureVector::new(values.to_vec(), label)
    }

    /// bad = 0, good = 1
    fn scenario() -> Vec<FeatureVector> {
        vec![
            vector(&[1.0, 2.0], SentimentLabel::Positive),
            vector(&[2.0, 1.0], SentimentLabel::Negative),
        ]
    }

    #[test]
    fn test_scenario_priors_and_likelihoods() {
        let mut model = NaiveBayes::new(1.0);
        model.train(&scenario(), 2).unwrap();

        let half = 0.5f64.ln();
        assert!((model.log_prior(SentimentLabel::Positive).unwrap() - half).abs() < EPS);
        assert!((model.log_prior(SentimentLabel::Negative).unwrap() - half).abs() < EPS);

        let pos_good = model.log_likelihood(SentimentLabel::Positive, 1).unwrap();
        let pos_bad = model.log_likelihood(SentimentLabel::Positive, 0).unwrap();
        assert!((pos_good - (3.0f64 / 5.0).ln()).abs() < EPS);
        assert!((pos_bad - (2.0f64 / 5.0).ln()).abs() < EPS);
        assert!(
            (model.default_log_likelihood(SentimentLabel::Positive).unwrap() - (1.0f64 / 5.0).ln())
                .abs()
                < EPS
        );
    }

    #[test]
    fn test_scenario_good_predicts_positive() {
        let mut model = NaiveBayes::new(1.0);
        model.train(&scenario(), 2).unwrap();

        let scores = model.scores(&[0.0, 2.0]).unwrap();
        assert!(scores[0].1 > scores[1].1);
        assert_eq!(model.predict(&[0.0, 2.0]).unwrap(), SentimentLabel::Positive);

        let query = FeatureVector::unlabeled(vec![3.0, 0.0]);
        assert_eq!(query.label, SentimentLabel::Unknown);
        assert_eq!(model.predict(&query.values).unwrap(), SentimentLabel::Negative);
    }

    #[test]
    fn test_priors_sum_to_one() {
        let training = vec![
            vector(&[1.0, 0.0, 0.0], SentimentLabel::Positive),
            vector(&[1.0, 1.0, 0.0], SentimentLabel::Positive),
            vector(&[0.0, 1.0, 0.0], SentimentLabel::Negative),
            vector(&[0.0, 0.0, 4.0], SentimentLabel::Neutral),
        ];
        let mut model = NaiveBayes::default();
        model.train(&training, 3).unwrap();

        let total: f64 = model
            .classes()
            .into_iter()
            .map(|c| model.log_prior(c).unwrap().exp())
            .sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unseen_feature_uses_default() {
        let training = vec![
            vector(&[3.0, 0.0, 0.0], SentimentLabel::Positive),
            vector(&[0.0, 2.0, 0.0], SentimentLabel::Negative),
        ];
        let mut model = NaiveBayes::new(0.5);
        model.train(&training, 3).unwrap();

        let expected = (0.5f64 / (3.0 + 0.5 * 3.0)).ln();
        for index in [1, 2] {
            let value = model.log_likelihood(SentimentLabel::Positive, index).unwrap();
            assert!((value - expected).abs() < EPS);
        }
        assert!(model.log_likelihood(SentimentLabel::Positive, 3).is_none());
        assert!(model.log_likelihood(SentimentLabel::Neutral, 0).is_none());
    }

    #[test]
    fn test_non_positive_alpha_is_sanitized() {
        assert_eq!(NaiveBayes::new(0.0).alpha(), DEFAULT_ALPHA);
        assert_eq!(NaiveBayes::new(-3.0).alpha(), DEFAULT_ALPHA);
        assert_eq!(NaiveBayes::new(f64::NAN).alpha(), DEFAULT_ALPHA);
        assert_eq!(NaiveBayes::new(0.25).alpha(), 0.25);
    }

    #[test]
    fn test_training_validation_errors() {
        let mut model = NaiveBayes::default();

        assert!(matches!(model.train(&[], 2), Err(Error::InvalidInput(_))));
        assert!(matches!(model.train(&scenario(), 0), Err(Error::InvalidInput(_))));
        assert!(matches!(model.train(&scenario(), 3), Err(Error::InvalidInput(_))));
        assert!(!model.is_trained());
    }

    #[test]
    fn test_training_rejects_negative_and_non_finite_values() {
        for bad in [-3.0, f64::NAN, f64::INFINITY] {
            let mut model = NaiveBayes::default();
            let training = vec![
                vector(&[bad, 1.0], SentimentLabel::Positive),
                vector(&[1.0, 1.0], SentimentLabel::Negative),
            ];

            assert!(matches!(model.train(&training, 2), Err(Error::InvalidInput(_))));
            assert!(!model.is_trained());
        }

        let mut model = NaiveBayes::default();
        model.train(&scenario(), 2).unwrap();
        let negative = vec![vector(&[-3.0, 1.0], SentimentLabel::Positive)];
        assert!(model.train(&negative, 2).is_err());

        let probabilities = model.predict_proba(&[0.0, 1.0]).unwrap();
        assert!(probabilities.iter().all(|(_, p)| p.is_finite()));
    }

    #[test]
    fn test_failed_retrain_keeps_previous_state() {
        let mut model = NaiveBayes::default();
        model.train(&scenario(), 2).unwrap();
        let before = model.state.clone();

        let ragged = vec![vector(&[1.0], SentimentLabel::Neutral)];
        assert!(model.train(&ragged, 2).is_err());
        assert_eq!(model.state, before);
        assert_eq!(model.predict(&[0.0, 2.0]).unwrap(), SentimentLabel::Positive);
    }

    #[test]
    fn test_retrain_replaces_state() {
        let mut model = NaiveBayes::default();
        model.train(&scenario(), 2).unwrap();

        let neutral = vec![vector(&[1.0, 1.0, 1.0], SentimentLabel::Neutral)];
        model.train(&neutral, 3).unwrap();

        assert_eq!(model.classes(), vec![SentimentLabel::Neutral]);
        assert_eq!(model.feature_count(), Some(3));
        assert!(model.log_prior(SentimentLabel::Positive).is_none());
    }

    #[test]
    fn test_predict_before_training() {
        let model = NaiveBayes::default();
        assert!(matches!(model.predict(&[1.0]), Err(Error::NotTrained)));
        assert!(matches!(model.predict_proba(&[1.0]), Err(Error::NotTrained)));
    }

    #[test]
    fn test_predict_dimension_mismatch() {
        let mut model = NaiveBayes::default();
        model.train(&scenario(), 2).unwrap();

        assert!(matches!(
            model.predict(&[1.0, 2.0, 3.0]),
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_ties_go_to_first_seen_class() {
        let training = vec![
            vector(&[1.0, 1.0], SentimentLabel::Negative),
            vector(&[1.0, 1.0], SentimentLabel::Positive),
        ];
        let mut model = NaiveBayes::default();
        model.train(&training, 2).unwrap();

        assert_eq!(
            model.classes(),
            vec![SentimentLabel::Negative, SentimentLabel::Positive]
        );
        assert_eq!(model.predict(&[1.0, 1.0]).unwrap(), SentimentLabel::Negative);
        assert_eq!(model.predict(&[0.0, 0.0]).unwrap(), SentimentLabel::Negative);
    }

    #[test]
    fn test_zero_and_negative_values_do_not_score() {
        let mut model = NaiveBayes::default();
        model.train(&scenario(), 2).unwrap();

        let prior_only = model.scores(&[0.0, 0.0]).unwrap();
        let with_negative = model.scores(&[-4.0, 0.0]).unwrap();
        assert_eq!(prior_only, with_negative);
    }

    #[test]
    fn test_empty_class_set_falls_back_to_unknown() {
        let model = NaiveBayes {
            alpha: DEFAULT_ALPHA,
            state: Some(TrainedState {
                feature_count: 2,
                classes: Vec::new(),
            }),
        };
        assert_eq!(model.predict(&[1.0, 1.0]).unwrap(), SentimentLabel::Unknown);
    }

    #[test]
    fn test_predict_proba_normalizes() {
        let mut model = NaiveBayes::default();
        model.train(&scenario(), 2).unwrap();

        let proba = model.predict_proba(&[0.0, 5.0]).unwrap();
        let total: f64 = proba.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(proba[0].0, SentimentLabel::Positive);
        assert!(proba[0].1 > proba[1].1);
    }

    #[test]
    fn test_training_is_deterministic() {
        let mut a = NaiveBayes::default();
        let mut b = NaiveBayes::default();
        a.train(&scenario(), 2).unwrap();
        b.train(&scenario(), 2).unwrap();

        assert_eq!(a.state, b.state);
        assert_eq!(a.name(), "Naive Bayes");
    }
}
