//! Error types for the vector crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading the corpus or comparing embeddings.
#[derive(Debug, Error)]
pub enum VectorError {
    /// The corpus file does not exist.
    #[error("embedding corpus not found: {}", .0.display())]
    CorpusNotFound(PathBuf),

    /// Reading or decompressing the corpus failed.
    #[error("corpus I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A matching corpus line could not be parsed into an embedding.
    #[error("malformed embedding for '{word}' at component {index}: {reason}")]
    MalformedLine {
        /// The token that led the line.
        word: String,
        /// Zero-based component index of the offending field.
        index: usize,
        /// What was wrong with the field.
        reason: String,
    },

    /// Dimension mismatch between two vectors.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The expected dimension.
        expected: usize,
        /// The actual dimension.
        actual: usize,
    },

    /// Invalid dimension (e.g., zero).
    #[error("invalid dimension: expected at least {expected}, got {actual}")]
    InvalidDimension {
        /// The minimum expected dimension.
        expected: usize,
        /// The actual dimension.
        actual: usize,
    },

    /// Invalid value in a vector (NaN, Infinity).
    #[error("invalid value at index {index}: {value} - {reason}")]
    InvalidValue {
        /// The index of the invalid value.
        index: usize,
        /// The invalid value.
        value: f32,
        /// The reason the value is invalid.
        reason: &'static str,
    },

    /// Cosine similarity is undefined for a zero-magnitude vector.
    #[error("cosine similarity undefined: zero-magnitude vector")]
    ZeroMagnitude,
}

impl VectorError {
    /// Whether the error is confined to a single word rather than the corpus as a whole.
    #[must_use]
    pub const fn is_word_scoped(&self) -> bool {
        !matches!(self, Self::CorpusNotFound(_) | Self::Io(_))
    }
}
