//! Word embedding lookup over a text corpus.
//!
//! - [`Corpus`] - handle to a gzip or plain corpus file, yielding raw lines
//! - [`ScanStore`] - one full scan per lookup, no state between calls
//! - [`PreloadedStore`] - one scan up front for a known word set
//!
//! Both stores implement [`EmbeddingLookup`] and return identical results.

mod corpus;
mod preloaded;
mod scan_store;

use std::sync::Arc;

pub use corpus::{Compression, Corpus, CorpusLine, CorpusLines};
pub use preloaded::PreloadedStore;
pub use scan_store::ScanStore;

use crate::error::VectorError;
use crate::types::Embedding;

/// Resolves a word to its embedding.
///
/// Implementations are read-only and safe to call from many threads at once.
pub trait EmbeddingLookup: Send + Sync {
    /// Look up the embedding for `word` exactly as written.
    ///
    /// Returns `Ok(None)` when the corpus has no line for the word.
    ///
    /// # Errors
    ///
    /// [`VectorError::Io`] if the corpus cannot be read, or a parse error if
    /// the word's line is malformed.
    fn lookup(&self, word: &str) -> Result<Option<Embedding>, VectorError>;
}

impl<T: EmbeddingLookup + ?Sized> EmbeddingLookup for &T {
    fn lookup(&self, word: &str) -> Result<Option<Embedding>, VectorError> {
        (**self).lookup(word)
    }
}

impl<T: EmbeddingLookup + ?Sized> EmbeddingLookup for Box<T> {
    fn lookup(&self, word: &str) -> Result<Option<Embedding>, VectorError> {
        (**self).lookup(word)
    }
}

impl<T: EmbeddingLookup + ?Sized> EmbeddingLookup for Arc<T> {
    fn lookup(&self, word: &str) -> Result<Option<Embedding>, VectorError> {
        (**self).lookup(word)
    }
}
