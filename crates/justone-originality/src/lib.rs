//! justone-originality
//!
//! Originality scoring for rounds of the word-association game "Just One".
//!
//! In every round a player submits two words that should lead teammates to a
//! hidden mystery word. A submission's originality is the mean scaled cosine
//! distance of its two words to the mystery word: higher means the player
//! reached further from the obvious associations.
//!
//! # Pipeline
//!
//! 1. [`Dataset::read`] loads the game table.
//! 2. [`DatasetProcessor::process`] expands transliterated umlauts, scores
//!    every (row, round) cell on a worker pool and adds one
//!    `originality_<round>` column per round.
//! 3. [`Dataset::write`] stores the augmented table.
//!
//! Cells whose score is undefined (malformed pair, word missing from the
//! corpus, zero or mismatched vectors) are left empty. Only run-level
//! failures abort, see [`enum@Error`].
//!
//! # Modules
//!
//! - [`calculator`] - Originality of one pair against one mystery word
//! - [`dataset`] - CSV table and column layout
//! - [`dictionary`] - Reference word list
//! - [`mystery`] - Round to mystery word assignment
//! - [`normalize`] - Umlaut expansion
//! - [`pair`] - Word pair parsing
//! - [`processor`] - Parallel scoring of a whole dataset

pub mod calculator;
pub mod dataset;
pub mod dictionary;
pub mod error;
pub mod mystery;
pub mod normalize;
pub mod pair;
pub mod processor;

pub use calculator::OriginalityCalculator;
pub use dataset::{ColumnLayout, Dataset};
pub use dictionary::{Dictionary, DEFAULT_WORD_PATTERN};
pub use error::{Error, OriginalityError, Result};
pub use mystery::{MysteryWords, DEFAULT_MYSTERY_WORDS};
pub use normalize::UmlautNormalizer;
pub use pair::{WordPair, PAIR_SEPARATOR};
pub use processor::{DatasetProcessor, LookupStrategy, ProcessorConfig, RunSummary};
