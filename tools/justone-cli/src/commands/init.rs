//! Init command implementation.

use std::path::Path;

use anyhow::{bail, Result};

use crate::config::default_config_content;

/// Write the default configuration to `path`.
pub fn run(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists, use --force to overwrite", path.display());
    }
    std::fs::write(path, default_config_content())?;
    println!("Created config file: {}", path.display());
    println!("  Point [model] vectors at your embedding corpus before running 'justone score'");
    Ok(())
}
