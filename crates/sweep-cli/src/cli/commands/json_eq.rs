//! `sweep json-eq` – structural comparison of two JSON files.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use sweep_core::util::json_bytes_equal;

pub fn run_json_eq(a: &Path, b: &Path) -> Result<()> {
    let left = fs::read(a).with_context(|| format!("read {}", a.display()))?;
    let right = fs::read(b).with_context(|| format!("read {}", b.display()))?;
    if !json_bytes_equal(&left, &right) {
        anyhow::bail!("{} and {} differ (or are not valid JSON)", a.display(), b.display());
    }
    println!("equal");
    Ok(())
}
