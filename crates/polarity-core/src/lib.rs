//! Polarity Core
//!
//! Core types and error handling shared across Polarity components.
//!
//! This crate provides:
//! - Sentiment labels and the token type consumed by the feature layer
//! - Labeled documents and feature vectors
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{FeatureVector, LabeledDocument, SentimentLabel, Token};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{FeatureVector, LabeledDocument, SentimentLabel, Token};
}
