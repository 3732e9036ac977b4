//! Configuration for justone
//!
//! # Example Configuration
//!
//! ```toml
//! [model]
//! vectors = "vectors_german.txt.gz"
//! dictionary = "vocab_german.txt"
//! pattern = "^[a-z][a-z-]*[a-z]$"
//! lookup = "scan"
//!
//! [dataset]
//! input = "pre_test_combined_edit.csv"
//! output = "pre_test_combined_edit_with_originality.csv"
//! round_column = "new_justone{round}playervote_group"
//! output_column = "originality_{round}"
//! separator = " + "
//!
//! [rounds]
//! mystery_words = ["raum", "taube", "golf", "elektrizität", "ende", "sombrero"]
//!
//! [workers]
//! threads = 0
//! ```

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use justone_originality::dataset::{DEFAULT_OUTPUT_COLUMN, DEFAULT_ROUND_COLUMN};
use justone_originality::{
    ColumnLayout, LookupStrategy, MysteryWords, ProcessorConfig, DEFAULT_MYSTERY_WORDS,
    DEFAULT_WORD_PATTERN, PAIR_SEPARATOR,
};
use serde::{Deserialize, Serialize};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "justone.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Embedding corpus and dictionary
    #[serde(default)]
    pub model: ModelConfig,

    /// Input and output tables
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Mystery word per round
    #[serde(default)]
    pub rounds: RoundsConfig,

    /// Worker pool
    #[serde(default)]
    pub workers: WorkersConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.dataset.validate()?;
        self.rounds.validate()?;
        Ok(())
    }

    /// Column naming for the dataset
    pub fn layout(&self) -> Result<ColumnLayout> {
        Ok(ColumnLayout::new(&self.dataset.round_column, &self.dataset.output_column)?)
    }

    /// Mystery words in round order
    pub fn mystery_words(&self) -> Result<MysteryWords> {
        Ok(MysteryWords::new(self.rounds.mystery_words.iter().cloned())?)
    }

    /// Options for the dataset processor
    pub fn processor_config(&self) -> Result<ProcessorConfig> {
        Ok(ProcessorConfig::new()
            .threads(self.workers.threads)
            .strategy(self.model.lookup)
            .layout(self.layout()?)
            .separator(self.dataset.separator.as_str()))
    }
}

/// Default config file content with comments, written by `justone init`
pub fn default_config_content() -> String {
    let mystery_words = DEFAULT_MYSTERY_WORDS
        .iter()
        .map(|w| format!("\"{w}\""))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r##"# justone configuration
# Originality scores for Just One word-association rounds

[model]
# Embedding corpus, one "<word> <c1> ... <cN>" line per word (gzip or plain)
vectors = "vectors_german.txt.gz"
# Reference word list; pair words missing from it are reported, not skipped.
# Set to "" to skip the report.
dictionary = "vocab_german.txt"
# Dictionary lines must match this pattern to be kept
pattern = "{DEFAULT_WORD_PATTERN}"
# "scan" reads the corpus once per lookup, "preload" reads it once per run
lookup = "scan"

[dataset]
input = "pre_test_combined_edit.csv"
output = "pre_test_combined_edit_with_originality.csv"
# {{round}} is replaced by the round number
round_column = "{DEFAULT_ROUND_COLUMN}"
output_column = "{DEFAULT_OUTPUT_COLUMN}"
separator = "{PAIR_SEPARATOR}"

[rounds]
# Mystery word of each round, first entry is round 1
mystery_words = [{mystery_words}]

[workers]
# 0 = one worker per available CPU
threads = 0
"##
    )
}

/// Embedding corpus and dictionary configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Path to the gzip-compressed embedding corpus
    #[serde(default = "default_vectors")]
    pub vectors: PathBuf,

    /// Path to the reference dictionary (empty to skip the dictionary report)
    #[serde(default = "default_dictionary")]
    pub dictionary: Option<PathBuf>,

    /// Pattern a dictionary line must match to be kept
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Embedding lookup strategy: scan or preload
    #[serde(default)]
    pub lookup: LookupStrategy,
}

fn default_vectors() -> PathBuf {
    PathBuf::from("vectors_german.txt.gz")
}

fn default_dictionary() -> Option<PathBuf> {
    Some(PathBuf::from("vocab_german.txt"))
}

fn default_pattern() -> String {
    DEFAULT_WORD_PATTERN.to_string()
}

impl ModelConfig {
    /// Dictionary to load, if the report is enabled
    pub fn dictionary_path(&self) -> Option<&Path> {
        self.dictionary.as_deref().filter(|path| !path.as_os_str().is_empty())
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            vectors: default_vectors(),
            dictionary: default_dictionary(),
            pattern: default_pattern(),
            lookup: LookupStrategy::Scan,
        }
    }
}

/// Input and output table configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// CSV file with one word pair column per round
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Where the augmented table is written
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Word pair column name, `{round}` is replaced by the round number
    #[serde(default = "default_round_column")]
    pub round_column: String,

    /// Output column name, `{round}` is replaced by the round number
    #[serde(default = "default_output_column")]
    pub output_column: String,

    /// Separator between the two words of a pair
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_input() -> PathBuf {
    PathBuf::from("pre_test_combined_edit.csv")
}

fn default_output() -> PathBuf {
    PathBuf::from("pre_test_combined_edit_with_originality.csv")
}

fn default_round_column() -> String {
    DEFAULT_ROUND_COLUMN.to_string()
}

fn default_output_column() -> String {
    DEFAULT_OUTPUT_COLUMN.to_string()
}

fn default_separator() -> String {
    PAIR_SEPARATOR.to_string()
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            round_column: default_round_column(),
            output_column: default_output_column(),
            separator: default_separator(),
        }
    }
}

impl DatasetConfig {
    /// Validate dataset configuration
    pub fn validate(&self) -> Result<()> {
        if self.separator.is_empty() {
            return Err(anyhow!("dataset.separator cannot be empty"));
        }
        ColumnLayout::new(&self.round_column, &self.output_column)?;
        if self.round_column == self.output_column {
            return Err(anyhow!("dataset.round_column and dataset.output_column must differ"));
        }
        Ok(())
    }
}

/// Mystery word configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundsConfig {
    /// Mystery word of each round, first entry is round 1
    #[serde(default = "default_mystery_words")]
    pub mystery_words: Vec<String>,
}

fn default_mystery_words() -> Vec<String> {
    DEFAULT_MYSTERY_WORDS.iter().map(|w| (*w).to_string()).collect()
}

impl Default for RoundsConfig {
    fn default() -> Self {
        Self { mystery_words: default_mystery_words() }
    }
}

impl RoundsConfig {
    /// Validate round configuration
    pub fn validate(&self) -> Result<()> {
        MysteryWords::new(self.mystery_words.iter().cloned())?;
        Ok(())
    }
}

/// Worker pool configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkersConfig {
    /// Worker threads (0 = available parallelism)
    #[serde(default)]
    pub threads: usize,
}
