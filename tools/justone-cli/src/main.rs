//! justone - originality scores for Just One word-association rounds
//!
//! Reads a game table, scores every submitted word pair by its cosine
//! distance to the round's mystery word, and writes the table back with one
//! `originality_<round>` column per round.

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use justone_originality::LookupStrategy;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, DEFAULT_CONFIG_FILE};

#[derive(Parser)]
#[command(name = "justone")]
#[command(about = "Score the originality of Just One word-association rounds")]
#[command(version)]
struct Cli {
    /// Path to config file (default: justone.toml)
    #[arg(short, long, env = "JUSTONE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Embedding corpus (overrides config)
    #[arg(long, global = true)]
    vectors: Option<PathBuf>,

    /// Reference dictionary (overrides config)
    #[arg(long, global = true)]
    dictionary: Option<PathBuf>,

    /// Worker threads, 0 = available parallelism (overrides config)
    #[arg(short = 'j', long, global = true)]
    threads: Option<usize>,

    /// Lookup strategy: scan or preload (overrides config)
    #[arg(long, global = true)]
    lookup: Option<LookupStrategy>,

    /// Log debug output, including every distance
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a game table and write it with originality columns
    Score {
        /// Input CSV (default from config)
        input: Option<PathBuf>,

        /// Output CSV (default from config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the embedding of a word
    Lookup {
        /// Word exactly as it appears in the corpus
        word: String,
    },

    /// Cosine distance between two words, scaled by 100
    Distance {
        /// First word
        word1: String,

        /// Second word
        word2: String,
    },

    /// Originality of one word pair against a mystery word
    Originality {
        /// Pair such as "katze + hund"
        pair: String,

        /// Mystery word
        mystery: String,
    },

    /// Initialize a new config file
    Init {
        /// Output path for config file
        #[arg(default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    if let Err(e) = run() {
        // Display root cause directly for clear error messages
        let chain: Vec<_> = e.chain().collect();
        if let Some(root_cause) = chain.last() {
            eprintln!("Error: {root_cause}");
        }
        // Show context chain if there are additional layers
        if chain.len() > 1 {
            eprintln!("\nContext:");
            for cause in chain.iter().take(chain.len() - 1) {
                eprintln!("  - {cause}");
            }
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    if let Commands::Init { path, force } = &cli.command {
        return commands::init::run(path, *force);
    }

    let config_path = cli.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let mut cfg = Config::load_or_default(&config_path)?;

    if let Some(vectors) = cli.vectors {
        cfg.model.vectors = vectors;
    }
    if let Some(dictionary) = cli.dictionary {
        cfg.model.dictionary = Some(dictionary);
    }
    if let Some(threads) = cli.threads {
        cfg.workers.threads = threads;
    }
    if let Some(lookup) = cli.lookup {
        cfg.model.lookup = lookup;
    }

    match cli.command {
        Commands::Score { input, output } => {
            commands::score::run(&cfg, input.as_deref(), output.as_deref())?;
        }
        Commands::Lookup { word } => commands::lookup::run(&cfg, &word)?,
        Commands::Distance { word1, word2 } => commands::distance::run(&cfg, &word1, &word2)?,
        Commands::Originality { pair, mystery } => {
            commands::originality::run(&cfg, &pair, &mystery)?;
        }
        Commands::Init { .. } => {}
    }

    Ok(())
}

/// Log to stderr so stdout carries only command output.
fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { "justone=debug" } else { "justone=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
