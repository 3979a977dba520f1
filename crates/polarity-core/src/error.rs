//! Error types for Polarity

/// Result type alias using Polarity's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Polarity operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Empty or inconsistent training data, empty vocabulary, bad split ratios
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Prediction or evaluation requested before a successful training run
    #[error("model is not trained")]
    NotTrained,

    /// Feature vector length differs from the trained vocabulary size
    #[error("dimension mismatch: expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// File system errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader errors
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create a new dimension mismatch error
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }
}
