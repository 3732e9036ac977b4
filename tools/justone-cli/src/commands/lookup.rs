//! Lookup command implementation.

use anyhow::{Context, Result};
use justone_vector::{EmbeddingLookup, ScanStore};

use crate::commands::open_corpus;
use crate::config::Config;

/// Components shown before the listing is elided.
const PREVIEW_COMPONENTS: usize = 5;

/// Print the dimension and leading components of `word`'s embedding.
pub fn run(cfg: &Config, word: &str) -> Result<()> {
    let store = ScanStore::new(open_corpus(cfg)?);
    match store.lookup(word).with_context(|| format!("lookup of '{word}' failed"))? {
        Some(embedding) => {
            let preview = embedding
                .iter()
                .take(PREVIEW_COMPONENTS)
                .map(f32::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            let more = if embedding.dimension() > PREVIEW_COMPONENTS { ", ..." } else { "" };
            println!("{word}: dimension {} [{preview}{more}]", embedding.dimension());
            println!("  norm {:.4}", embedding.l2_norm());
        }
        None => println!("{word}: not found"),
    }
    Ok(())
}
