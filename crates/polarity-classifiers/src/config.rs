//! Configuration for the sentiment pipeline

use crate::dataset::CsvOptions;
use crate::features::WeightingMode;
use crate::naive_bayes::DEFAULT_ALPHA;
use polarity_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for preprocessing, features, smoothing and data splitting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentConfig {
    /// Drop stop words during preprocessing
    #[serde(default = "default_true")]
    pub remove_stop_words: bool,

    /// Replace the built-in stop-word list with this file
    #[serde(default)]
    pub stop_words_path: Option<PathBuf>,

    /// Feature weighting
    #[serde(default)]
    pub weighting: WeightingMode,

    /// Minimum corpus frequency for a token to enter the vocabulary
    #[serde(default = "default_min_frequency")]
    pub min_frequency: usize,

    /// Vocabulary cap (0 = unbounded)
    #[serde(default = "default_max_vocabulary_size")]
    pub max_vocabulary_size: usize,

    /// Additive smoothing; non-positive values fall back to 1.0
    #[serde(default = "default_alpha")]
    pub alpha: f64,

    /// Fraction of records used for training
    #[serde(default = "default_train_ratio")]
    pub train_ratio: f64,

    /// Seed for the train/validation shuffle
    #[serde(default)]
    pub seed: Option<u64>,

    /// Dataset location and column mapping
    #[serde(default)]
    pub dataset: DatasetConfig,
}

/// Dataset location and CSV column mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// CSV file with text and label columns
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(flatten)]
    pub csv: CsvOptions,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            remove_stop_words: true,
            stop_words_path: None,
            weighting: WeightingMode::Count,
            min_frequency: default_min_frequency(),
            max_vocabulary_size: default_max_vocabulary_size(),
            alpha: default_alpha(),
            train_ratio: default_train_ratio(),
            seed: None,
            dataset: DatasetConfig::default(),
        }
    }
}

impl SentimentConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse sentiment config: {}", e)))
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::config(format!(
                "Failed to read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }
}

fn default_true() -> bool {
    true
}

fn default_min_frequency() -> usize {
    2
}

fn default_max_vocabulary_size() -> usize {
    5000
}

fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}

fn default_train_ratio() -> f64 {
    0.8
}
