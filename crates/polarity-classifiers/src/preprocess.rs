//! Text preprocessing
//!
//! Lowercases, strips ASCII punctuation, splits on whitespace and optionally
//! drops stop words. The output is the token stream consumed by
//! [`FeatureExtractor`](crate::features::FeatureExtractor).

use polarity_core::{Error, Result, Token};
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "an", "the", "in", "on", "at", "to", "for", "is", "am", "are", "was", "were", "i", "you",
    "he", "she", "it", "we", "they", "and", "or", "but", "so", "this", "that", "these", "those",
    "my", "your", "his", "her", "its", "our", "their",
];

/// Turns raw text into normalized tokens
#[derive(Debug, Clone)]
pub struct Preprocessor {
    punctuation: Regex,
    remove_stop_words: bool,
    stop_words: HashSet<String>,
}

impl Preprocessor {
    /// Create a preprocessor with the built-in English stop-word list
    pub fn new(remove_stop_words: bool) -> Result<Self> {
        Ok(Self {
            punctuation: Regex::new(r"[[:punct:]]").map_err(|e| {
                Error::internal(format!("Failed to compile punctuation regex: {}", e))
            })?,
            remove_stop_words,
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        })
    }

    /// Enable or disable stop-word removal
    pub fn set_stop_word_removal(&mut self, remove: bool) {
        self.remove_stop_words = remove;
    }

    /// Replace the stop-word list with whitespace-separated words from a file
    pub fn load_stop_words(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let content = std::fs::read_to_string(path.as_ref())?;
        self.stop_words = content
            .split_whitespace()
            .map(|w| w.to_lowercase())
            .collect();

        info!(
            "Loaded {} stop words from {}",
            self.stop_words.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Whether a word is treated as a stop word
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Lowercase, drop punctuation and collapse runs of whitespace
    pub fn clean_text(&self, text: &str) -> String {
        let lower = text.to_lowercase();
        let stripped = self.punctuation.replace_all(&lower, "");
        stripped.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Split on whitespace, applying stop-word removal when enabled
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        text.split_whitespace()
            .filter(|w| !(self.remove_stop_words && self.is_stop_word(w)))
            .map(str::to_string)
            .collect()
    }

    /// Full pipeline: clean then tokenize
    pub fn process(&self, text: &str) -> Vec<Token> {
        self.tokenize(&self.clean_text(text))
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new(true).expect("Failed to create preprocessor")
    }
}
