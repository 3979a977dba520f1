//! Async classifier integration tests
//!
//! Drives a trained analyzer through the [`Classifier`] trait, the way a
//! caller holding `Arc<dyn Classifier>` would.

use polarity_classifiers::prelude::*;
use polarity_classifiers::{SentimentClassifier, SentimentConfig, SharedAnalyzer, TextRecord};
use std::sync::Arc;

fn training_records() -> Vec<TextRecord> {
    let mut records = Vec::new();
    for _ in 0..6 {
        records.push(TextRecord::new("Great service, friendly staff!", SentimentLabel::Positive));
        records.push(TextRecord::new("Terrible food and rude waiter.", SentimentLabel::Negative));
        records.push(TextRecord::new("Average meal, nothing memorable.", SentimentLabel::Neutral));
    }
    records
}

fn trained_classifier() -> SentimentClassifier {
    let analyzer = SentimentAnalyzer::new(SentimentConfig {
        seed: Some(3),
        ..SentimentConfig::default()
    })
    .unwrap();

    let shared = SharedAnalyzer::new(analyzer);
    shared.retrain(training_records()).unwrap();
    SentimentClassifier::new(shared)
}

#[tokio::test]
async fn test_classify_positive() {
    let classifier = trained_classifier();

    let result = classifier.classify("friendly staff and great service").await.unwrap();
    assert_eq!(result.label, SentimentLabel::Positive);
    assert!(result.score > 0.5, "Expected a confident positive, got {}", result.score);
    assert_eq!(result.all_scores.len(), 3);
}

#[tokio::test]
async fn test_classify_negative() {
    let classifier = trained_classifier();

    let result = classifier.classify("RUDE waiter, terrible!").await.unwrap();
    assert_eq!(result.label, SentimentLabel::Negative);

    let total: f64 = result.all_scores.iter().map(|(_, p)| p).sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_classify_untrained_fails() {
    let analyzer = SentimentAnalyzer::new(SentimentConfig::default()).unwrap();
    let classifier = SentimentClassifier::new(SharedAnalyzer::new(analyzer));

    let err = classifier.classify("anything").await.unwrap_err();
    assert!(matches!(err, Error::NotTrained));
}

#[tokio::test]
async fn test_classifier_as_trait_object() {
    let classifier: Arc<dyn Classifier> = Arc::new(trained_classifier());
    assert_eq!(classifier.name(), "sentiment");

    let handles: Vec<_> = ["great service", "terrible food", "average meal"]
        .into_iter()
        .map(|text| {
            let classifier = Arc::clone(&classifier);
            tokio::spawn(async move { classifier.classify(text).await.unwrap().label })
        })
        .collect();

    let mut labels = Vec::new();
    for handle in handles {
        labels.push(handle.await.unwrap());
    }

    assert_eq!(
        labels,
        vec![
            SentimentLabel::Positive,
            SentimentLabel::Negative,
            SentimentLabel::Neutral
        ]
    );
}

#[tokio::test]
async fn test_retrain_through_classifier_handle() {
    let classifier = trained_classifier();
    assert!(classifier.analyzer().is_trained());

    let flipped: Vec<TextRecord> = training_records()
        .into_iter()
        .map(|record| {
            let label = match record.label {
                SentimentLabel::Positive => SentimentLabel::Negative,
                SentimentLabel::Negative => SentimentLabel::Positive,
                other => other,
            };
            TextRecord::new(record.text, label)
        })
        .collect();

    classifier.analyzer().retrain(flipped).unwrap();

    let result = classifier.classify("great service").await.unwrap();
    assert_eq!(result.label, SentimentLabel::Negative);
}
