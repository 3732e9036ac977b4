//! Originality command implementation.

use anyhow::Result;

use crate::commands::calculator;
use crate::config::Config;

/// Print the originality of `pair` against `mystery`, or why it is undefined.
pub fn run(cfg: &Config, pair: &str, mystery: &str) -> Result<()> {
    match calculator(cfg)?.originality(pair, mystery) {
        Ok(score) => println!("{score:?}"),
        Err(e) => println!("undefined ({}): {e}", e.kind()),
    }
    Ok(())
}
