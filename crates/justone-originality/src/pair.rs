//! Word pairs as submitted in a round cell.

use crate::error::OriginalityError;

/// Separator between the two words of a submitted pair.
pub const PAIR_SEPARATOR: &str = " + ";

/// Two words taken from one cell, e.g. `"katze + hund"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordPair<'a> {
    /// Word before the separator.
    pub first: &'a str,
    /// Word after the separator.
    pub second: &'a str,
}

impl<'a> WordPair<'a> {
    /// Split `cell` at `separator`.
    ///
    /// The words are taken verbatim, without trimming or case folding.
    ///
    /// # Errors
    ///
    /// Returns [`OriginalityError::MalformedPair`] unless the separator occurs
    /// exactly once.
    pub fn parse(cell: &'a str, separator: &str) -> Result<Self, OriginalityError> {
        let malformed = || OriginalityError::MalformedPair {
            pair: cell.to_owned(),
            separator: separator.to_owned(),
        };

        if separator.is_empty() {
            return Err(malformed());
        }

        let (first, second) = cell.split_once(separator).ok_or_else(malformed)?;
        if second.contains(separator) {
            return Err(malformed());
        }
        Ok(Self { first, second })
    }

    /// Both words in order.
    #[must_use]
    pub const fn words(&self) -> [&'a str; 2] {
        [self.first, self.second]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pair() {
        let pair = WordPair::parse("katze + hund", PAIR_SEPARATOR).unwrap();
        assert_eq!(pair.first, "katze");
        assert_eq!(pair.second, "hund");
        assert_eq!(pair.words(), ["katze", "hund"]);
    }

    #[test]
    fn missing_separator_is_malformed() {
        for cell in ["katze hund", "katze+hund", "", "katze"] {
            assert!(
                matches!(
                    WordPair::parse(cell, PAIR_SEPARATOR),
                    Err(OriginalityError::MalformedPair { .. })
                ),
                "cell {cell:?}"
            );
        }
    }

    #[test]
    fn more_than_two_words_is_malformed() {
        let result = WordPair::parse("katze + hund + maus", PAIR_SEPARATOR);
        assert!(matches!(result, Err(OriginalityError::MalformedPair { .. })));
    }

    #[test]
    fn words_are_not_trimmed() {
        let pair = WordPair::parse(" katze  +  hund", PAIR_SEPARATOR).unwrap();
        assert_eq!(pair.first, " katze ");
        assert_eq!(pair.second, " hund");
    }

    #[test]
    fn empty_words_are_kept() {
        let pair = WordPair::parse(" + hund", PAIR_SEPARATOR).unwrap();
        assert_eq!(pair.first, "");
        assert_eq!(pair.second, "hund");
    }
}
