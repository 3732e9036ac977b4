//! Command implementations.

pub mod distance;
pub mod init;
pub mod lookup;
pub mod originality;
pub mod score;

use anyhow::{Context, Result};
use justone_originality::OriginalityCalculator;
use justone_vector::{Corpus, ScanStore};

use crate::config::Config;

/// Open the configured embedding corpus.
pub fn open_corpus(cfg: &Config) -> Result<Corpus> {
    Corpus::open(&cfg.model.vectors)
        .with_context(|| format!("failed to open corpus {}", cfg.model.vectors.display()))
}

/// Calculator over a scanning store, for one-off queries.
pub fn calculator(cfg: &Config) -> Result<OriginalityCalculator<ScanStore>> {
    let store = ScanStore::new(open_corpus(cfg)?);
    Ok(OriginalityCalculator::new(store).with_separator(cfg.dataset.separator.as_str()))
}
