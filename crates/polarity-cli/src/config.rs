//! Configuration loading with command-line overrides

use crate::Cli;
use polarity_classifiers::{SentimentConfig, WeightingMode};
use std::path::Path;

/// Load the YAML config if it exists (defaults otherwise), then apply the
/// overrides given on the command line.
pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<SentimentConfig> {
    let mut config = if Path::new(config_path).exists() {
        SentimentConfig::from_file(config_path)?
    } else {
        SentimentConfig::default()
    };

    if let Some(file) = &cli.file {
        config.dataset.path = Some(file.clone());
    }

    if cli.tf_idf {
        config.weighting = WeightingMode::TfIdf;
    }

    if let Some(alpha) = cli.alpha {
        config.alpha = alpha;
    }

    if let Some(min_frequency) = cli.min_frequency {
        config.min_frequency = min_frequency;
    }

    if let Some(max_vocabulary) = cli.max_vocabulary {
        config.max_vocabulary_size = max_vocabulary;
    }

    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    Ok(config)
}
