//! Common utilities for tupleset-cmd

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tupleset::{PartitionedRecordSequence, snapshot::PartitionedSnapshot};

/// Checks if a file exists and is readable
pub fn validate_file_exists(path: &str) -> Result<()> {
    let file_path = Path::new(path);
    if !file_path.exists() {
        anyhow::bail!("File does not exist: {}", path);
    }
    if !file_path.is_file() {
        anyhow::bail!("Path is not a file: {}", path);
    }
    Ok(())
}

/// Reads a partitioned result document and builds the sequence it describes.
pub fn load_sequence(path: &str) -> Result<PartitionedRecordSequence> {
    validate_file_exists(path)?;
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))?;
    let snapshot: PartitionedSnapshot = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse result document: {}", path))?;
    let seq = snapshot
        .into_sequence()
        .with_context(|| format!("Invalid result document: {}", path))?;
    log::debug!("loaded {} subsets from {}", seq.subset_count(), path);
    Ok(seq)
}
