//! Vocabulary construction
//!
//! Turns a tokenized training corpus into a dense token → index mapping.
//! Tokens are ranked by descending corpus frequency with ties broken by
//! ascending lexicographic order, so the same corpus always produces the
//! same feature layout.

use polarity_core::{Error, Result, Token};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Token → index mapping defining the feature-vector layout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    index: HashMap<Token, usize>,
    tokens: Vec<Token>,
}

/// Per-token document frequencies collected alongside a vocabulary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFrequencies {
    counts: Vec<usize>,
    document_count: usize,
}

impl Vocabulary {
    /// Build a vocabulary and its document frequencies from a corpus.
    ///
    /// Tokens whose total frequency is below `min_frequency` are dropped.
    /// A `max_size` of 0 means the vocabulary is unbounded.
    pub fn build<D>(
        corpus: &[D],
        min_frequency: usize,
        max_size: usize,
    ) -> (Self, DocumentFrequencies)
    where
        D: AsRef<[Token]>,
    {
        let mut term_frequency: HashMap<&str, usize> = HashMap::new();
        let mut document_frequency: HashMap<&str, usize> = HashMap::new();

        for document in corpus {
            let mut seen: HashSet<&str> = HashSet::new();
            for token in document.as_ref() {
                *term_frequency.entry(token.as_str()).or_insert(0) += 1;
                seen.insert(token.as_str());
            }
            for token in seen {
                *document_frequency.entry(token).or_insert(0) += 1;
            }
        }

        let distinct = term_frequency.len();
        let mut ranked: Vec<(&str, usize)> = term_frequency
            .into_iter()
            .filter(|(_, count)| *count >= min_frequency)
            .collect();

        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        if max_size > 0 && ranked.len() > max_size {
            ranked.truncate(max_size);
        }

        let mut vocabulary = Self::default();
        let mut counts = Vec::with_capacity(ranked.len());
        for (token, _) in ranked {
            vocabulary.push(token.to_string());
            counts.push(document_frequency.get(token).copied().unwrap_or(0));
        }

        debug!(
            distinct,
            retained = vocabulary.len(),
            min_frequency,
            max_size,
            "Filtered vocabulary candidates"
        );
        info!("Vocabulary built with {} tokens", vocabulary.len());

        let frequencies = DocumentFrequencies::new(counts, corpus.len());
        (vocabulary, frequencies)
    }

    /// Create a vocabulary from tokens already in index order
    pub fn from_tokens<I, T>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        let mut vocabulary = Self::default();
        for token in tokens {
            let token = token.into();
            if vocabulary.contains(&token) {
                return Err(Error::invalid_input(format!(
                    "duplicate vocabulary token '{}'",
                    token
                )));
            }
            vocabulary.push(token);
        }
        Ok(vocabulary)
    }

    fn push(&mut self, token: Token) {
        self.index.insert(token.clone(), self.tokens.len());
        self.tokens.push(token);
    }

    /// Number of tokens (V)
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the vocabulary is empty
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Index assigned to a token
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// Token at an index
    pub fn token_at(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Whether a token is part of the vocabulary
    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    /// Tokens in index order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Iterate `(token, index)` pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.tokens.iter().enumerate().map(|(i, t)| (t.as_str(), i))
    }
}

impl DocumentFrequencies {
    /// Create document frequencies from per-index counts and the corpus size
    pub fn new(counts: Vec<usize>, document_count: usize) -> Self {
        Self {
            counts,
            document_count,
        }
    }

    /// Number of documents containing the token at `index`
    pub fn get(&self, index: usize) -> usize {
        self.counts.get(index).copied().unwrap_or(0)
    }

    /// Total number of documents the frequencies were collected from (N)
    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Natural-log inverse document frequency, `ln(N / df)`.
    ///
    /// Returns 0 when either N or df is 0.
    pub fn idf(&self, index: usize) -> f64 {
        let df = self.get(index);
        if self.document_count == 0 || df == 0 {
            return 0.0;
        }
        (self.document_count as f64 / df as f64).ln()
    }
}
