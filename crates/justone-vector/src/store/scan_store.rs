//! Embedding lookup by full linear scan.

use std::path::Path;

use tracing::trace;

use super::corpus::Corpus;
use super::EmbeddingLookup;
use crate::error::VectorError;
use crate::types::Embedding;

/// Resolves words by scanning the corpus from the top on every call.
///
/// Nothing is cached between lookups: each call opens its own decompression
/// stream, stops at the first line whose token equals the query, and drops the
/// stream before returning. Memory use is one line buffer per in-flight lookup,
/// while time is linear in the corpus size for every miss.
///
/// # Example
///
/// ```ignore
/// use justone_vector::store::{EmbeddingLookup, ScanStore};
///
/// let store = ScanStore::open("vectors_german.txt.gz")?;
/// if let Some(embedding) = store.lookup("katze")? {
///     println!("dimension {}", embedding.dimension());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScanStore {
    corpus: Corpus,
}

impl ScanStore {
    /// Create a store over an already opened corpus.
    #[must_use]
    pub const fn new(corpus: Corpus) -> Self {
        Self { corpus }
    }

    /// Open the corpus at `path`.
    ///
    /// # Errors
    ///
    /// See [`Corpus::open`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self, VectorError> {
        Corpus::open(path).map(Self::new)
    }
}

impl EmbeddingLookup for ScanStore {
    fn lookup(&self, word: &str) -> Result<Option<Embedding>, VectorError> {
        let mut lines = self.corpus.lines()?;
        while let Some(line) = lines.next_line()? {
            if line.has_token(word) {
                let embedding = line.embedding(word);
                trace!(word, line = lines.line_number(), "corpus hit");
                return embedding.map(Some);
            }
        }
        trace!(word, lines = lines.line_number(), "corpus miss");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_first_match_wins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vectors.txt");
        std::fs::write(&path, "hund 1 0\nkatze 0 1\nhund 5 5\n").unwrap();

        let store = ScanStore::open(&path).unwrap();
        assert_eq!(store.lookup("hund").unwrap().unwrap().as_slice(), &[1.0, 0.0]);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vectors.txt");
        std::fs::write(&path, "Hund 1 0\n").unwrap();

        let store = ScanStore::open(&path).unwrap();
        assert!(store.lookup("hund").unwrap().is_none());
        assert!(store.lookup("Hund").unwrap().is_some());
    }

    #[test]
    fn test_malformed_line_is_scoped_to_word() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vectors.txt");
        std::fs::write(&path, "kaputt 1 x\nkatze 0 1\n").unwrap();

        let store = ScanStore::open(&path).unwrap();
        assert!(matches!(store.lookup("kaputt"), Err(VectorError::MalformedLine { .. })));
        assert!(store.lookup("katze").unwrap().is_some());
    }
}
