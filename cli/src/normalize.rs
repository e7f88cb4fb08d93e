use anyhow::{Context, Result};
use std::path::Path;

/// Normalize a raw corpus file into the working recipe dataset
pub fn normalize(input: &Path, output: &Path, limit: usize) -> Result<()> {
    let written = pantry_core::normalize_file(input, output, limit)
        .with_context(|| format!("Failed to normalize {}", input.display()))?;

    println!("Wrote {} recipes to {}", written, output.display());

    Ok(())
}
