//! Distance command implementation.

use anyhow::{Context, Result};

use crate::commands::calculator;
use crate::config::Config;

/// Print the scaled cosine distance between two words.
pub fn run(cfg: &Config, word1: &str, word2: &str) -> Result<()> {
    let distance = calculator(cfg)?
        .distance(word1, word2)
        .with_context(|| format!("no distance between '{word1}' and '{word2}'"))?;
    println!("{distance:?}");
    Ok(())
}
