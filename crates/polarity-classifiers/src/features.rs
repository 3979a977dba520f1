//! Feature extraction
//!
//! Converts tokenized documents into fixed-length vectors over a
//! [`Vocabulary`], weighting each entry by raw count or by TF-IDF.

use crate::vocabulary::{DocumentFrequencies, Vocabulary};
use polarity_core::{FeatureVector, LabeledDocument, Token};
use serde::{Deserialize, Serialize};
use tracing::info;

/// How vocabulary hits are weighted in a feature vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightingMode {
    /// Raw term counts (bag of words)
    #[default]
    Count,
    /// Term count multiplied by `ln(N / df)`
    TfIdf,
}

/// Converts token sequences into feature vectors
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    mode: WeightingMode,
    vocabulary: Vocabulary,
    document_frequencies: DocumentFrequencies,
}

impl FeatureExtractor {
    /// Create an extractor with an empty vocabulary
    pub fn new(mode: WeightingMode) -> Self {
        Self {
            mode,
            vocabulary: Vocabulary::default(),
            document_frequencies: DocumentFrequencies::default(),
        }
    }

    /// Create an extractor over an existing vocabulary.
    ///
    /// `document_frequencies` is only consulted in TF-IDF mode.
    pub fn with_vocabulary(
        mode: WeightingMode,
        vocabulary: Vocabulary,
        document_frequencies: DocumentFrequencies,
    ) -> Self {
        let document_frequencies = match mode {
            WeightingMode::TfIdf => document_frequencies,
            WeightingMode::Count => DocumentFrequencies::default(),
        };
        Self {
            mode,
            vocabulary,
            document_frequencies,
        }
    }

    /// Build the vocabulary from a training corpus, replacing any previous one
    pub fn fit<D>(&mut self, corpus: &[D], min_frequency: usize, max_size: usize)
    where
        D: AsRef<[Token]>,
    {
        let (vocabulary, document_frequencies) =
            Vocabulary::build(corpus, min_frequency, max_size);
        *self = Self::with_vocabulary(self.mode, vocabulary, document_frequencies);
    }

    /// Build the vocabulary from labeled documents
    pub fn fit_documents(
        &mut self,
        documents: &[LabeledDocument],
        min_frequency: usize,
        max_size: usize,
    ) {
        let corpus: Vec<&[Token]> = documents.iter().map(|d| d.tokens.as_slice()).collect();
        self.fit(&corpus, min_frequency, max_size);
    }

    /// Convert one document into a vector of length V.
    ///
    /// Tokens outside the vocabulary contribute nothing.
    pub fn extract(&self, tokens: &[Token]) -> Vec<f64> {
        let mut values = vec![0.0; self.vocabulary.len()];

        for token in tokens {
            if let Some(index) = self.vocabulary.index_of(token) {
                values[index] += 1.0;
            }
        }

        if self.mode == WeightingMode::TfIdf {
            for (index, value) in values.iter_mut().enumerate() {
                if *value > 0.0 {
                    *value *= self.document_frequencies.idf(index);
                }
            }
        }

        values
    }

    /// Convert a labeled document, carrying its label over
    pub fn transform(&self, document: &LabeledDocument) -> FeatureVector {
        FeatureVector::new(self.extract(&document.tokens), document.label)
    }

    /// Convert a batch of labeled documents, preserving order
    pub fn batch_transform(&self, documents: &[LabeledDocument]) -> Vec<FeatureVector> {
        let vectors: Vec<FeatureVector> = documents.iter().map(|d| self.transform(d)).collect();
        info!(
            "Transformed {} documents over {} features",
            vectors.len(),
            self.vocabulary.len()
        );
        vectors
    }

    /// Weighting mode selected at construction
    pub fn mode(&self) -> WeightingMode {
        self.mode
    }

    /// Current vocabulary
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Current vocabulary size (V)
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Document frequencies (empty in count mode)
    pub fn document_frequencies(&self) -> &DocumentFrequencies {
        &self.document_frequencies
    }
}
