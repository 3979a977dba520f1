//! Training and inference benchmarks
//!
//! Measures the hot paths of the pipeline on a synthetic corpus:
//! - vocabulary fitting and feature extraction (count and TF-IDF)
//! - Naive Bayes training
//! - single-document classification through the async interface
//!
//! Run with: cargo bench -p polarity-classifiers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tokio::runtime::Runtime;

use polarity_classifiers::prelude::*;
use polarity_classifiers::{SentimentClassifier, SentimentConfig, SharedAnalyzer, TextRecord};

const POSITIVE: &[&str] = &["great", "love", "excellent", "happy", "wonderful", "fast"];
const NEGATIVE: &[&str] = &["awful", "hate", "broken", "slow", "refund", "worst"];
const FILLER: &[&str] = &["product", "delivery", "price", "support", "box", "order", "day"];

/// Deterministic corpus of `size` documents cycling through three labels
fn synthetic_corpus(size: usize) -> Vec<LabeledDocument> {
    (0..size)
        .map(|i| {
            let (words, label) = match i % 3 {
                0 => (POSITIVE, SentimentLabel::Positive),
                1 => (NEGATIVE, SentimentLabel::Negative),
                _ => (FILLER, SentimentLabel::Neutral),
            };
            let tokens: Vec<&str> = (0..12)
                .map(|j| {
                    if j % 3 == 0 {
                        words[(i + j) % words.len()]
                    } else {
                        FILLER[(i * 7 + j) % FILLER.len()]
                    }
                })
                .collect();
            LabeledDocument::new(tokens, label)
        })
        .collect()
}

fn benchmark_feature_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("Feature_Extraction");
    group.sample_size(50);

    for size in [100, 1_000] {
        let corpus = synthetic_corpus(size);

        for mode in [WeightingMode::Count, WeightingMode::TfIdf] {
            let id = BenchmarkId::new(format!("{:?}", mode), size);
            group.bench_with_input(id, &corpus, |b, corpus| {
                b.iter(|| {
                    let mut extractor = FeatureExtractor::new(mode);
                    extractor.fit_documents(black_box(corpus), 1, 0);
                    extractor.batch_transform(corpus)
                });
            });
        }
    }

    group.finish();
}

fn benchmark_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("Naive_Bayes_Training");
    group.sample_size(50);

    for size in [100, 1_000] {
        let corpus = synthetic_corpus(size);
        let mut extractor = FeatureExtractor::new(WeightingMode::Count);
        extractor.fit_documents(&corpus, 1, 0);
        let vectors = extractor.batch_transform(&corpus);
        let vocabulary_size = extractor.vocabulary_size();

        group.bench_with_input(BenchmarkId::new("train", size), &vectors, |b, vectors| {
            b.iter(|| {
                let mut model = NaiveBayes::default();
                model.train(black_box(vectors), vocabulary_size).unwrap();
                model
            });
        });
    }

    group.finish();
}

fn benchmark_classification(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let records: Vec<TextRecord> = synthetic_corpus(300)
        .into_iter()
        .map(|doc| TextRecord::new(doc.tokens.join(" "), doc.label))
        .collect();

    let analyzer = SentimentAnalyzer::new(SentimentConfig {
        seed: Some(42),
        ..SentimentConfig::default()
    })
    .expect("Failed to create analyzer");
    let shared = SharedAnalyzer::new(analyzer);
    shared.retrain(records).expect("Failed to train analyzer");
    let classifier = SentimentClassifier::new(shared);

    let test_cases = vec![
        ("short", "Great product, love it!"),
        ("mixed", "The delivery was slow but support was excellent."),
        ("unknown_words", "Lorem ipsum dolor sit amet."),
    ];

    let mut group = c.benchmark_group("Sentiment_Classifier");
    group.significance_level(0.05);
    group.sample_size(100);

    for (name, text) in test_cases {
        group.bench_with_input(BenchmarkId::new("classify", name), &text, |b, text| {
            b.iter(|| rt.block_on(async { classifier.classify(black_box(text)).await.unwrap() }));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_feature_extraction,
    benchmark_training,
    benchmark_classification
);
criterion_main!(benches);
