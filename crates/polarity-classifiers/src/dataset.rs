//! Labeled text datasets
//!
//! CSV loading with skip-and-warn handling of malformed rows, and a shuffled
//! train/validation split.

use polarity_core::{Error, Result, SentimentLabel};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Raw text with its sentiment label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRecord {
    pub text: String,
    pub label: SentimentLabel,
}

impl TextRecord {
    /// Create a new record
    pub fn new(text: impl Into<String>, label: SentimentLabel) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// Column mapping for CSV datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvOptions {
    /// Skip the first row
    #[serde(default = "default_true")]
    pub has_header: bool,

    /// Zero-based index of the text column
    #[serde(default)]
    pub text_column: usize,

    /// Zero-based index of the label column
    #[serde(default = "default_label_column")]
    pub label_column: usize,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            text_column: 0,
            label_column: default_label_column(),
        }
    }
}

/// Load labeled records from a CSV file
pub fn load_csv(path: impl AsRef<Path>, options: CsvOptions) -> Result<Vec<TextRecord>> {
    let file = File::open(path.as_ref())?;
    let records = read_csv(file, options)?;
    info!("Loaded {} examples from {}", records.len(), path.as_ref().display());
    Ok(records)
}

/// Read labeled records from any CSV source.
///
/// Rows that cannot be parsed, lack the configured columns, or carry an
/// unrecognised label are skipped. Fails only when no row survives.
pub fn read_csv<R: Read>(source: R, options: CsvOptions) -> Result<Vec<TextRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(options.has_header)
        .flexible(true)
        .from_reader(source);

    let mut records = Vec::new();
    let mut skipped = 0usize;
    let needed = options.text_column.max(options.label_column) + 1;

    for (row, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!(row, "Skipping unreadable row: {}", e);
                skipped += 1;
                continue;
            }
        };

        let (Some(text), Some(label)) = (
            record.get(options.text_column),
            record.get(options.label_column),
        ) else {
            warn!(
                row,
                columns = record.len(),
                needed,
                "Skipping row without enough columns"
            );
            skipped += 1;
            continue;
        };

        let label = SentimentLabel::parse_lenient(label);
        if !label.is_known() {
            debug!(row, "Skipping row with unrecognised label");
            skipped += 1;
            continue;
        }

        records.push(TextRecord::new(text, label));
    }

    if skipped > 0 {
        warn!("Skipped {} rows while reading dataset", skipped);
    }
    if records.is_empty() {
        return Err(Error::invalid_input("no valid rows in dataset"));
    }

    Ok(records)
}

/// Shuffle and split records into `(train, validation)`.
///
/// The training part holds `floor(len * train_ratio)` records. Passing a
/// seed makes the shuffle reproducible.
pub fn train_validation_split<T: Clone>(
    records: &[T],
    train_ratio: f64,
    seed: Option<u64>,
) -> Result<(Vec<T>, Vec<T>)> {
    if !(train_ratio > 0.0 && train_ratio < 1.0) {
        return Err(Error::invalid_input(format!(
            "train ratio must be between 0 and 1, got {}",
            train_ratio
        )));
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut train = records.to_vec();
    train.shuffle(&mut rng);

    let train_size = (records.len() as f64 * train_ratio) as usize;
    let validation = train.split_off(train_size);

    info!(
        "Split data into {} training and {} validation examples",
        train.len(),
        validation.len()
    );
    Ok((train, validation))
}

fn default_true() -> bool {
    true
}

fn default_label_column() -> usize {
    1
}
