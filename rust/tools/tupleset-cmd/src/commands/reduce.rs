//! Reduce command implementation

use anyhow::{Context, Result};
use std::fs;
use tupleset::{TupleSequence, snapshot::SequenceSnapshot};

use crate::utils;

pub fn run(limit: usize, output: Option<String>, file: String) -> Result<()> {
    let reduced = reduce_file(&file, limit)?;
    let json =
        serde_json::to_string_pretty(&reduced).context("Failed to serialize reduced result")?;

    match output {
        Some(output_file) => {
            fs::write(&output_file, &json)
                .with_context(|| format!("Failed to write reduced result to: {}", output_file))?;
            println!(
                "Reduced result ({} rows) written to: {}",
                reduced.rows.len(),
                output_file
            );
        }
        None => {
            println!("{}", json);
        }
    }
    Ok(())
}

fn reduce_file(file: &str, limit: usize) -> Result<SequenceSnapshot> {
    let seq = utils::load_sequence(file)?;
    let reduced = seq.reduced(limit);
    log::info!(
        "reduced {} rows from {} subsets to {}",
        seq.len(),
        seq.subset_count(),
        reduced.len()
    );
    Ok(SequenceSnapshot::from_sequence(&reduced))
}
