//! CLI Commands

pub mod config;
pub mod leads;
pub mod schedule;
pub mod sequence;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Read a JSON array from `path`
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("{} is not a valid JSON array", path.display()))
}

/// Like [`read_json`], but a missing file is an empty list
pub fn read_json_or_empty<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    read_json(path)
}

pub fn write_json<T: Serialize>(path: &Path, data: &[T]) -> Result<()> {
    let content = serde_json::to_string_pretty(data)?;
    fs::write(path, content).with_context(|| format!("cannot write {}", path.display()))
}
