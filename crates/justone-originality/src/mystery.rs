//! Round number to mystery word assignment.

use crate::error::{Error, Result};

/// Mystery words of the six rounds played in the study, in round order.
pub const DEFAULT_MYSTERY_WORDS: [&str; 6] =
    ["raum", "taube", "golf", "elektrizität", "ende", "sombrero"];

/// Ordered mystery words, addressed by 1-based round number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MysteryWords {
    words: Vec<String>,
}

impl MysteryWords {
    /// Create an assignment from words in round order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `words` is empty or contains an empty word.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.is_empty() {
            return Err(Error::Config("at least one mystery word is required".to_owned()));
        }
        if let Some(round) = words.iter().position(String::is_empty) {
            return Err(Error::Config(format!("mystery word for round {} is empty", round + 1)));
        }
        Ok(Self { words })
    }

    /// Mystery word for a 1-based round number.
    #[must_use]
    pub fn get(&self, round: usize) -> Option<&str> {
        round.checked_sub(1).and_then(|i| self.words.get(i)).map(String::as_str)
    }

    /// Number of rounds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always `false`; an assignment has at least one round.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// `(round, word)` pairs with 1-based round numbers.
    pub fn rounds(&self) -> impl Iterator<Item = (usize, &str)> {
        self.words.iter().enumerate().map(|(i, w)| (i + 1, w.as_str()))
    }
}

impl Default for MysteryWords {
    fn default() -> Self {
        Self { words: DEFAULT_MYSTERY_WORDS.iter().map(|w| (*w).to_owned()).collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_six_rounds() {
        let mystery = MysteryWords::default();
        assert_eq!(mystery.len(), 6);
        assert_eq!(mystery.get(1), Some("raum"));
        assert_eq!(mystery.get(4), Some("elektrizität"));
        assert_eq!(mystery.get(6), Some("sombrero"));
    }

    #[test]
    fn rounds_are_one_based() {
        let mystery = MysteryWords::new(["tier", "haus"]).unwrap();
        assert_eq!(mystery.get(0), None);
        assert_eq!(mystery.get(3), None);
        assert_eq!(mystery.rounds().collect::<Vec<_>>(), vec![(1, "tier"), (2, "haus")]);
    }

    #[test]
    fn empty_assignment_is_rejected() {
        assert!(matches!(MysteryWords::new(Vec::<String>::new()), Err(Error::Config(_))));
        assert!(matches!(MysteryWords::new(["tier", ""]), Err(Error::Config(_))));
    }
}
