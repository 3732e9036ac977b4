//! Score command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use justone_originality::{Dataset, DatasetProcessor, Dictionary, RunSummary};
use tracing::info;

use crate::commands::open_corpus;
use crate::config::Config;

/// Run the full pipeline: read, normalize, score, write.
pub fn run(cfg: &Config, input: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let input = input.unwrap_or(cfg.dataset.input.as_path());
    let output = output.unwrap_or(cfg.dataset.output.as_path());

    let corpus = open_corpus(cfg)?;
    let mut processor =
        DatasetProcessor::new(corpus, cfg.mystery_words()?, cfg.processor_config()?);
    if let Some(path) = cfg.model.dictionary_path() {
        let dictionary = Dictionary::load_with_pattern(path, &cfg.model.pattern)
            .with_context(|| format!("failed to load dictionary {}", path.display()))?;
        processor = processor.with_dictionary(dictionary);
    }

    let mut dataset = Dataset::read(input)
        .with_context(|| format!("failed to read dataset {}", input.display()))?;
    let summary = processor
        .process(&mut dataset)
        .with_context(|| format!("failed to score {}", input.display()))?;
    dataset
        .write(output)
        .with_context(|| format!("failed to write dataset {}", output.display()))?;

    info!(output = %output.display(), "done");
    print_summary(&summary, output);
    Ok(())
}

fn print_summary(summary: &RunSummary, output: &Path) {
    println!("Wrote {}", output.display());
    println!(
        "  {} rows x {} rounds: {} scored, {} undefined",
        summary.rows,
        summary.rounds,
        summary.scored,
        summary.undefined_total()
    );
    for (reason, count) in &summary.undefined {
        println!("    {reason}: {count}");
    }
    if !summary.unknown_words.is_empty() {
        let words: Vec<_> = summary.unknown_words.iter().map(String::as_str).collect();
        println!("  {} pair words not in dictionary: {}", words.len(), words.join(", "));
    }
}
