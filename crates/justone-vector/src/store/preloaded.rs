//! Embedding lookup served from a single preloading pass.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use super::corpus::{parse_components, Corpus};
use super::EmbeddingLookup;
use crate::error::VectorError;
use crate::types::Embedding;

/// What the preloading pass found for a requested word.
#[derive(Debug, Clone)]
enum Entry {
    Found(Embedding),
    /// Raw component bytes of a line that failed to parse; re-parsed on
    /// lookup to reproduce the scan error.
    Malformed(Vec<u8>),
    Missing,
}

/// Resolves a known set of words from memory after one pass over the corpus.
///
/// [`PreloadedStore::build`] reads the corpus once, keeping the first line for
/// each requested word and stopping as soon as all of them are found. Lookups
/// then give the same answers a [`ScanStore`](super::ScanStore) would: hits,
/// misses and per-word parse errors alike. Words outside the requested set
/// fall back to a scan of the corpus.
#[derive(Debug, Clone)]
pub struct PreloadedStore {
    corpus: Corpus,
    entries: HashMap<String, Entry>,
}

impl PreloadedStore {
    /// Scan `corpus` once and keep the embeddings for `words`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::Io`] if reading the corpus fails.
    pub fn build<I, S>(corpus: Corpus, words: I) -> Result<Self, VectorError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut remaining: HashSet<String> = words.into_iter().map(Into::into).collect();
        let requested = remaining.len();
        let mut entries = HashMap::with_capacity(requested);

        let mut lines = corpus.lines()?;
        while !remaining.is_empty() {
            let Some(line) = lines.next_line()? else {
                break;
            };
            let Ok(token) = std::str::from_utf8(line.token()) else {
                continue;
            };
            let Some(word) = remaining.take(token) else {
                continue;
            };

            let entry = match line.embedding(&word) {
                Ok(embedding) => Entry::Found(embedding),
                Err(_) => Entry::Malformed(line.components().to_vec()),
            };
            entries.insert(word, entry);
        }
        let scanned = lines.line_number();
        drop(lines);

        let missing = remaining.len();
        entries.extend(remaining.into_iter().map(|word| (word, Entry::Missing)));

        info!(requested, missing, lines = scanned, "preloaded embeddings");
        Ok(Self { corpus, entries })
    }

    /// Number of requested words that were found with a valid embedding.
    #[must_use]
    pub fn found(&self) -> usize {
        self.entries.values().filter(|e| matches!(e, Entry::Found(_))).count()
    }

    /// Whether `word` was part of the preloaded set.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }
}

impl EmbeddingLookup for PreloadedStore {
    fn lookup(&self, word: &str) -> Result<Option<Embedding>, VectorError> {
        match self.entries.get(word) {
            Some(Entry::Found(embedding)) => Ok(Some(embedding.clone())),
            Some(Entry::Malformed(components)) => parse_components(word, components).map(Some),
            Some(Entry::Missing) => Ok(None),
            None => {
                debug!(word, "word not preloaded, scanning corpus");
                super::ScanStore::new(self.corpus.clone()).lookup(word)
            }
        }
    }
}
