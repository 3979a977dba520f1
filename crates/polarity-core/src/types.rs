//! Core types for Polarity

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A normalized string unit produced by upstream text cleaning.
///
/// Equality and hashing are exact string comparisons; no further
/// normalization happens once a token reaches the feature layer.
pub type Token = String;

/// Sentiment category attached to a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    /// Unlabeled, or a label outside the known set
    Unknown,
}

impl SentimentLabel {
    /// All labels in their canonical order
    pub const ALL: [SentimentLabel; 4] = [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
        SentimentLabel::Unknown,
    ];

    /// Lowercase name of the label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a label case-insensitively, mapping anything unrecognised to `Unknown`.
    ///
    /// Accepts the full names as well as the `pos`/`neg`/`neu` abbreviations
    /// commonly found in sentiment datasets.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" | "pos" => Self::Positive,
            "negative" | "neg" => Self::Negative,
            "neutral" | "neu" => Self::Neutral,
            _ => Self::Unknown,
        }
    }

    /// Whether this is a real sentiment category rather than the sentinel
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl Default for SentimentLabel {
    fn default() -> Self {
        Self::Unknown
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lenient(s))
    }
}

/// A tokenized document with its label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledDocument {
    /// Tokens in document order
    pub tokens: Vec<Token>,

    /// Document label (`Unknown` when unlabeled)
    pub label: SentimentLabel,
}

impl LabeledDocument {
    /// Create a new labeled document
    pub fn new<I, T>(tokens: I, label: SentimentLabel) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            label,
        }
    }
}

/// Fixed-length numeric vector over the vocabulary, with an optional label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// One non-negative weight per vocabulary entry
    pub values: Vec<f64>,

    /// Supervision label (`Unknown` when unlabeled)
    pub label: SentimentLabel,
}

impl FeatureVector {
    /// Create a labeled feature vector
    pub fn new(values: Vec<f64>, label: SentimentLabel) -> Self {
        Self { values, label }
    }

    /// Create a feature vector without supervision
    pub fn unlabeled(values: Vec<f64>) -> Self {
        Self::new(values, SentimentLabel::Unknown)
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the vector has no features
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
