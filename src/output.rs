//! Timing files consumed by the word-highlighting player
//!
//! One `<section>.json` per section: `[{"word": "...", "start": 1.234}, ...]`
//! in canonical order, starts rounded to milliseconds.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::types::TimedWord;

pub fn timing_json(words: &[TimedWord]) -> Result<String> {
    serde_json::to_string_pretty(words).context("Failed to serialize word timing")
}

/// Write `<out_dir>/<id>.json`, creating the directory if needed.
pub fn write_timing(out_dir: &Path, id: &str, words: &[TimedWord]) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {:?}", out_dir))?;
    let path = out_dir.join(format!("{id}.json"));
    fs::write(&path, timing_json(words)?)
        .with_context(|| format!("Failed to write timing file {:?}", path))?;
    Ok(path)
}
