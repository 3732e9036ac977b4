//! Reference set of valid words.
//!
//! The dictionary is loaded once and handed around by reference. It does not
//! restrict which words are looked up in the corpus; it only answers whether
//! a word is known, for reporting.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use regex::Regex;
use tracing::info;

use crate::error::{Error, Result};

/// Lowercase ASCII letters with optional internal hyphens, at least two characters.
pub const DEFAULT_WORD_PATTERN: &str = "^[a-z][a-z-]*[a-z]$";

/// Immutable set of words accepted by the validation pattern.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// Load a dictionary file using [`DEFAULT_WORD_PATTERN`].
    ///
    /// # Errors
    ///
    /// See [`Dictionary::load_with_pattern`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_pattern(path, DEFAULT_WORD_PATTERN)
    }

    /// Load a dictionary file, keeping lines that match `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DictionaryNotFound`] if the file is missing,
    /// [`Error::Pattern`] if the pattern is invalid and [`Error::Io`] on read
    /// failures.
    pub fn load_with_pattern(path: impl AsRef<Path>, pattern: &str) -> Result<Self> {
        let path = path.as_ref();
        let pattern = Regex::new(pattern)?;
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::DictionaryNotFound(path.to_path_buf()),
            _ => Error::Io(e),
        })?;

        let dictionary = Self::from_reader(BufReader::new(file), &pattern)?;
        info!(path = %path.display(), words = dictionary.len(), "loaded dictionary");
        Ok(dictionary)
    }

    /// Read one candidate word per line from `reader`.
    ///
    /// A line is kept when `pattern` matches at its start; the stored word is
    /// the line with surrounding whitespace removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if reading fails.
    pub fn from_reader(reader: impl BufRead, pattern: &Regex) -> Result<Self> {
        let mut words = HashSet::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.strip_suffix('\r').unwrap_or(&line);
            if pattern.find(line).is_some_and(|m| m.start() == 0) {
                words.insert(line.trim().to_owned());
            }
        }
        Ok(Self { words })
    }

    /// Whether `word` is in the dictionary.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the dictionary has no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over the words in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl FromIterator<String> for Dictionary {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self { words: iter.into_iter().collect() }
    }
}
