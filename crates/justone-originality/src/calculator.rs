//! Originality of one word pair against one mystery word.

use justone_vector::distance::cosine_distance;
use justone_vector::{Embedding, EmbeddingLookup};
use tracing::debug;

use crate::error::OriginalityError;
use crate::pair::{WordPair, PAIR_SEPARATOR};

/// Scores word pairs by their mean cosine distance to a mystery word.
///
/// ```text
/// originality = (d(word1, mystery) + d(word2, mystery)) / 2
/// d(a, b)     = (1 - cos(a, b)) * 100
/// ```
///
/// The calculator holds no state between calls besides the lookup it wraps.
/// A call performs three lookups: both pair members and the mystery word,
/// which is shared by the two legs.
#[derive(Debug, Clone)]
pub struct OriginalityCalculator<L> {
    store: L,
    separator: String,
}

impl<L: EmbeddingLookup> OriginalityCalculator<L> {
    /// Create a calculator over `store` using the `" + "` pair separator.
    pub fn new(store: L) -> Self {
        Self { store, separator: PAIR_SEPARATOR.to_owned() }
    }

    /// Use a different pair separator.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// The wrapped lookup.
    pub const fn store(&self) -> &L {
        &self.store
    }

    /// Pair separator in use.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Resolve `word` to its embedding, treating a miss as an error.
    ///
    /// # Errors
    ///
    /// [`OriginalityError::WordNotFound`] on a miss, [`OriginalityError::Lookup`]
    /// if the corpus line cannot be read or parsed.
    pub fn embedding(&self, word: &str) -> Result<Embedding, OriginalityError> {
        match self.store.lookup(word) {
            Ok(Some(embedding)) => Ok(embedding),
            Ok(None) => Err(OriginalityError::WordNotFound(word.to_owned())),
            Err(source) => Err(OriginalityError::Lookup { word: word.to_owned(), source }),
        }
    }

    /// Scaled cosine distance between two words.
    ///
    /// # Errors
    ///
    /// Any lookup failure, or [`OriginalityError::Distance`] when the
    /// embeddings cannot be compared.
    pub fn distance(&self, word: &str, other: &str) -> Result<f64, OriginalityError> {
        let a = self.embedding(word)?;
        let b = self.embedding(other)?;
        Self::distance_between(word, &a, other, &b)
    }

    /// Originality of `pair` with respect to `mystery`.
    ///
    /// # Errors
    ///
    /// Returns the first reason the score is undefined: a malformed pair, a
    /// word missing from the corpus, an unreadable embedding, or embeddings
    /// that cannot be compared. There is no partial score.
    pub fn originality(&self, pair: &str, mystery: &str) -> Result<f64, OriginalityError> {
        let pair = WordPair::parse(pair, &self.separator)?;
        let target = self.embedding(mystery)?;

        let first = self.embedding(pair.first)?;
        let d1 = Self::distance_between(pair.first, &first, mystery, &target)?;
        debug!(word = pair.first, mystery, distance = d1, "distance to mystery word");

        let second = self.embedding(pair.second)?;
        let d2 = Self::distance_between(pair.second, &second, mystery, &target)?;
        debug!(word = pair.second, mystery, distance = d2, "distance to mystery word");

        let originality = (d1 + d2) / 2.0;
        debug!(first = pair.first, second = pair.second, mystery, originality, "originality");
        Ok(originality)
    }

    fn distance_between(
        word: &str,
        a: &Embedding,
        mystery: &str,
        b: &Embedding,
    ) -> Result<f64, OriginalityError> {
        cosine_distance(a, b).map_err(|source| OriginalityError::Distance {
            word: word.to_owned(),
            mystery: mystery.to_owned(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use justone_vector::VectorError;

    use super::*;

    /// In-memory lookup that counts calls.
    #[derive(Default)]
    struct MapLookup {
        vectors: HashMap<&'static str, Vec<f32>>,
        calls: AtomicUsize,
    }

    impl MapLookup {
        fn with(mut self, word: &'static str, v: &[f32]) -> Self {
            self.vectors.insert(word, v.to_vec());
            self
        }
    }

    impl EmbeddingLookup for MapLookup {
        fn lookup(&self, word: &str) -> Result<Option<Embedding>, VectorError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.vectors.get(word).map(|v| Embedding::new(v.clone())).transpose()
        }
    }

    fn fixture() -> MapLookup {
        MapLookup::default()
            .with("tier", &[1.0, 0.0])
            .with("katze", &[3.0, 4.0])
            .with("hund", &[0.0, 1.0])
            .with("null", &[0.0, 0.0])
            .with("breit", &[1.0, 0.0, 0.0])
    }

    #[test]
    fn averages_both_distances() {
        let calculator = OriginalityCalculator::new(fixture());
        // katze: 1 - 3/5 -> 40, hund: orthogonal -> 100
        let score = calculator.originality("katze + hund", "tier").unwrap();
        assert!((score - 70.0).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn mystery_word_is_looked_up_once() {
        let calculator = OriginalityCalculator::new(fixture());
        calculator.originality("katze + hund", "tier").unwrap();
        assert_eq!(calculator.store().calls.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn malformed_pair_is_undefined() {
        let calculator = OriginalityCalculator::new(fixture());
        let err = calculator.originality("katze hund", "tier").unwrap_err();
        assert!(matches!(err, OriginalityError::MalformedPair { .. }));
        assert_eq!(calculator.store().calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn missing_word_is_undefined() {
        let calculator = OriginalityCalculator::new(fixture());
        let err = calculator.originality("katze + giraffe", "tier").unwrap_err();
        assert!(matches!(err, OriginalityError::WordNotFound(ref w) if w == "giraffe"));

        let err = calculator.originality("katze + hund", "giraffe").unwrap_err();
        assert!(matches!(err, OriginalityError::WordNotFound(ref w) if w == "giraffe"));
    }

    #[test]
    fn zero_vector_is_undefined() {
        let calculator = OriginalityCalculator::new(fixture());
        let err = calculator.originality("null + hund", "tier").unwrap_err();
        assert!(matches!(
            err,
            OriginalityError::Distance { source: VectorError::ZeroMagnitude, .. }
        ));
    }

    #[test]
    fn dimension_mismatch_is_undefined() {
        let calculator = OriginalityCalculator::new(fixture());
        let err = calculator.originality("katze + breit", "tier").unwrap_err();
        assert!(matches!(
            err,
            OriginalityError::Distance { source: VectorError::DimensionMismatch { .. }, .. }
        ));
    }

    #[test]
    fn custom_separator() {
        let calculator = OriginalityCalculator::new(fixture()).with_separator(";");
        assert!(calculator.originality("katze;hund", "tier").is_ok());
        assert!(calculator.originality("katze + hund", "tier").is_err());
    }

    #[test]
    fn word_distance() {
        let calculator = OriginalityCalculator::new(fixture());
        let d = calculator.distance("hund", "tier").unwrap();
        assert!((d - 100.0).abs() < 1e-9);
        assert_eq!(calculator.distance("tier", "tier").unwrap(), 0.0);
    }
}
