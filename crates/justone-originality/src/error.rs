//! Error types for originality scoring.
//!
//! [`enum@Error`] covers failures that stop a run: unreadable inputs, bad
//! configuration, a dataset without the expected columns. [`OriginalityError`]
//! explains why a single score is undefined; it never aborts other cells.

use std::path::PathBuf;

use justone_vector::VectorError;
use thiserror::Error;

/// Result type for fallible run-level operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a scoring run.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The dictionary file does not exist.
    #[error("dictionary not found: {}", .0.display())]
    DictionaryNotFound(PathBuf),

    /// The word validation pattern does not compile.
    #[error("invalid word pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A required column is missing from the dataset.
    #[error("column '{0}' not found in dataset")]
    MissingColumn(String),

    /// The dataset has no header row.
    #[error("dataset has no columns")]
    EmptyHeader,

    /// The embedding corpus could not be opened or read.
    #[error("corpus error: {0}")]
    Vector(#[from] VectorError),

    /// CSV parsing or writing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The worker pool could not be started.
    #[error("worker pool error: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Why an originality score could not be computed.
#[derive(Debug, Error)]
pub enum OriginalityError {
    /// The cell does not split into exactly two words.
    #[error("malformed word pair '{pair}': expected exactly one '{separator}'")]
    MalformedPair {
        /// The raw cell content.
        pair: String,
        /// The separator that was expected.
        separator: String,
    },

    /// The word has no line in the corpus.
    #[error("'{0}' not found in corpus")]
    WordNotFound(String),

    /// The corpus could not produce an embedding for the word.
    #[error("no embedding for '{word}': {source}")]
    Lookup {
        /// The word being looked up.
        word: String,
        /// The underlying failure.
        #[source]
        source: VectorError,
    },

    /// The two embeddings cannot be compared.
    #[error("distance from '{word}' to '{mystery}' undefined: {source}")]
    Distance {
        /// The pair member.
        word: String,
        /// The mystery word.
        mystery: String,
        /// The underlying failure.
        #[source]
        source: VectorError,
    },
}

impl OriginalityError {
    /// Short machine-readable label for summaries.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MalformedPair { .. } => "malformed_pair",
            Self::WordNotFound(_) => "not_found",
            Self::Lookup { .. } => "lookup_failed",
            Self::Distance { .. } => "distance_undefined",
        }
    }
}
