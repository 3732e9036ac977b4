//! Scores every (row, round) cell of a dataset in parallel.
//!
//! Each cell is an independent unit of work: it reads one word pair and the
//! round's mystery word and performs read-only lookups against the corpus.
//! Units run on a bounded [`rayon`] pool and write into a result slot keyed by
//! (row, round), so completion order never affects the output. A unit whose
//! word pair cannot be scored leaves its own cell empty and nothing else; a
//! corpus that cannot be read stops the whole run.
//!
//! # Example
//!
//! ```ignore
//! use justone_originality::{Dataset, DatasetProcessor, MysteryWords, ProcessorConfig};
//! use justone_vector::Corpus;
//!
//! let corpus = Corpus::open("vectors_german.txt.gz")?;
//! let processor = DatasetProcessor::new(corpus, MysteryWords::default(), ProcessorConfig::new());
//!
//! let mut dataset = Dataset::read("pre_test_combined_edit.csv")?;
//! let summary = processor.process(&mut dataset)?;
//! dataset.write("pre_test_combined_edit_with_originality.csv")?;
//! println!("{} of {} cells scored", summary.scored, summary.cells());
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use justone_vector::{Corpus, EmbeddingLookup, PreloadedStore, ScanStore, VectorError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::calculator::OriginalityCalculator;
use crate::dataset::{ColumnLayout, Dataset};
use crate::dictionary::Dictionary;
use crate::error::{Error, OriginalityError, Result};
use crate::mystery::MysteryWords;
use crate::normalize::UmlautNormalizer;
use crate::pair::{WordPair, PAIR_SEPARATOR};

/// How embeddings are resolved during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupStrategy {
    /// Scan the corpus once per lookup.
    #[default]
    Scan,
    /// Scan once for every word the dataset needs, then serve from memory.
    Preload,
}

impl fmt::Display for LookupStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scan => write!(f, "scan"),
            Self::Preload => write!(f, "preload"),
        }
    }
}

impl FromStr for LookupStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "scan" => Ok(Self::Scan),
            "preload" => Ok(Self::Preload),
            _ => Err(Error::Config(format!("unknown lookup strategy: {s}. Valid: scan, preload"))),
        }
    }
}

/// Configuration for [`DatasetProcessor`].
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// Worker threads; 0 uses the available parallelism.
    /// Default: 0
    pub threads: usize,

    /// Embedding lookup strategy.
    /// Default: [`LookupStrategy::Scan`]
    pub strategy: LookupStrategy,

    /// Round input and output column names.
    pub layout: ColumnLayout,

    /// Separator between the two words of a pair.
    /// Default: `" + "`
    pub separator: String,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            strategy: LookupStrategy::Scan,
            layout: ColumnLayout::default(),
            separator: PAIR_SEPARATOR.to_owned(),
        }
    }
}

impl ProcessorConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of worker threads.
    #[must_use]
    pub const fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set the lookup strategy.
    #[must_use]
    pub const fn strategy(mut self, strategy: LookupStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the column layout.
    #[must_use]
    pub fn layout(mut self, layout: ColumnLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the pair separator.
    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

/// Outcome counts of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows in the dataset.
    pub rows: usize,
    /// Rounds scored per row.
    pub rounds: usize,
    /// Cells with a score.
    pub scored: usize,
    /// Cells left empty, by reason.
    pub undefined: BTreeMap<&'static str, usize>,
    /// Distinct pair words absent from the dictionary, if one was given.
    pub unknown_words: BTreeSet<String>,
}

impl RunSummary {
    /// Total number of scored and unscored cells.
    #[must_use]
    pub fn cells(&self) -> usize {
        self.rows * self.rounds
    }

    /// Number of cells left empty.
    #[must_use]
    pub fn undefined_total(&self) -> usize {
        self.undefined.values().sum()
    }
}

/// Adds one originality column per round to a dataset.
#[derive(Debug, Clone)]
pub struct DatasetProcessor {
    corpus: Corpus,
    mystery: MysteryWords,
    config: ProcessorConfig,
    normalizer: UmlautNormalizer,
    dictionary: Option<Dictionary>,
}

impl DatasetProcessor {
    /// Create a processor with the default umlaut normalizer and no dictionary.
    #[must_use]
    pub fn new(corpus: Corpus, mystery: MysteryWords, config: ProcessorConfig) -> Self {
        Self { corpus, mystery, config, normalizer: UmlautNormalizer::default(), dictionary: None }
    }

    /// Replace the cell normalizer.
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: UmlautNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Report pair words missing from `dictionary`. Lookups are not restricted.
    #[must_use]
    pub fn with_dictionary(mut self, dictionary: Dictionary) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    /// Normalize `dataset`, score every (row, round) cell and append the
    /// output columns.
    ///
    /// # Errors
    ///
    /// Fails only for run-level problems: a missing round column, a corpus
    /// that cannot be read or decompressed, or a worker pool that cannot
    /// start. Per-cell failures become empty cells.
    pub fn process(&self, dataset: &mut Dataset) -> Result<RunSummary> {
        dataset.normalize(&self.normalizer);

        let layout = &self.config.layout;
        let columns = self
            .mystery
            .rounds()
            .map(|(round, _)| dataset.require_column(&layout.round_column(round)))
            .collect::<Result<Vec<usize>>>()?;

        let lookup: Box<dyn EmbeddingLookup> = match self.config.strategy {
            LookupStrategy::Scan => Box::new(ScanStore::new(self.corpus.clone())),
            LookupStrategy::Preload => Box::new(PreloadedStore::build(
                self.corpus.clone(),
                self.words_needed(dataset, &columns),
            )?),
        };
        let calculator =
            OriginalityCalculator::new(lookup).with_separator(self.config.separator.as_str());

        self.score(dataset, &columns, &calculator)
    }

    /// Run the per-cell computations and merge the results into `dataset`.
    fn score<L: EmbeddingLookup>(
        &self,
        dataset: &mut Dataset,
        columns: &[usize],
        calculator: &OriginalityCalculator<L>,
    ) -> Result<RunSummary> {
        let rows = dataset.len();
        let rounds = columns.len();
        let units: Vec<(usize, usize)> =
            (0..rows).flat_map(|row| (0..rounds).map(move |round| (row, round))).collect();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .thread_name(|i| format!("justone-worker-{i}"))
            .build()?;
        info!(
            rows,
            rounds,
            workers = pool.current_num_threads(),
            strategy = %self.config.strategy,
            "scoring"
        );

        let view: &Dataset = dataset;
        let outcomes: Vec<std::result::Result<f64, OriginalityError>> = pool.install(|| {
            units
                .par_iter()
                .map(|&(row, round)| {
                    let pair = view.cell(row, columns[round]);
                    let mystery = self.mystery.get(round + 1).unwrap_or_default();
                    let round = round + 1;
                    match calculator.originality(pair, mystery) {
                        Ok(score) => {
                            debug!(row, round, pair, mystery, score, "scored");
                            Ok(Ok(score))
                        }
                        Err(OriginalityError::Lookup { word, source })
                            if !source.is_word_scoped() =>
                        {
                            error!(row, round, word = %word, "corpus unreadable: {source}");
                            Err(source)
                        }
                        Err(e) => {
                            warn!(row, round, pair, mystery, "originality undefined: {e}");
                            Ok(Err(e))
                        }
                    }
                })
                .collect::<std::result::Result<_, VectorError>>()
        })?;

        let mut summary = RunSummary { rows, rounds, ..RunSummary::default() };
        let mut grid = vec![vec![String::new(); rows]; rounds];
        for (&(row, round), outcome) in units.iter().zip(outcomes) {
            match outcome {
                Ok(score) => {
                    grid[round][row] = format!("{score:?}");
                    summary.scored += 1;
                }
                Err(e) => *summary.undefined.entry(e.kind()).or_default() += 1,
            }
        }

        if let Some(dictionary) = &self.dictionary {
            summary.unknown_words = self.unknown_words(dataset, columns, dictionary);
            if !summary.unknown_words.is_empty() {
                warn!(count = summary.unknown_words.len(), "pair words missing from dictionary");
            }
        }

        for (round, values) in grid.into_iter().enumerate() {
            dataset.set_column(&self.config.layout.output_column(round + 1), values)?;
        }

        info!(scored = summary.scored, undefined = summary.undefined_total(), "scoring complete");
        Ok(summary)
    }

    /// Every word a run will look up: pair members and mystery words.
    fn words_needed(&self, dataset: &Dataset, columns: &[usize]) -> BTreeSet<String> {
        let mut words: BTreeSet<String> =
            self.mystery.rounds().map(|(_, word)| word.to_owned()).collect();
        words.extend(self.pair_words(dataset, columns).map(str::to_owned));
        words
    }

    fn unknown_words(
        &self,
        dataset: &Dataset,
        columns: &[usize],
        dictionary: &Dictionary,
    ) -> BTreeSet<String> {
        self.pair_words(dataset, columns)
            .filter(|word| !dictionary.contains(word))
            .map(str::to_owned)
            .collect()
    }

    fn pair_words<'d>(
        &'d self,
        dataset: &'d Dataset,
        columns: &'d [usize],
    ) -> impl Iterator<Item = &'d str> + 'd {
        columns.iter().flat_map(move |&column| {
            dataset
                .column(column)
                .filter_map(move |cell| WordPair::parse(cell, &self.config.separator).ok())
                .flat_map(|pair| pair.words())
        })
    }
}
