//! Inspect command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use tupleset::{PartitionedRecordSequence, TupleSequence};

use crate::utils;

/// Number of leading rows shown per subset in verbose mode.
const SAMPLE_ROWS: usize = 3;

#[derive(Debug, Serialize)]
struct InspectSummary {
    binding_names: Vec<String>,
    total_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<usize>,
    subsets: Vec<SubsetInfo>,
}

#[derive(Debug, Serialize)]
struct SubsetInfo {
    id: String,
    rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    quota: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sample: Vec<String>,
}

/// Run the inspect command
pub fn run(verbose: u8, limit: Option<usize>, file: String) -> Result<()> {
    let seq = utils::load_sequence(&file)?;
    let summary = summarize(&seq, limit, verbose)?;
    let json =
        serde_json::to_string_pretty(&summary).context("Failed to serialize inspect summary")?;
    println!("{}", json);
    Ok(())
}

fn summarize(
    seq: &PartitionedRecordSequence,
    limit: Option<usize>,
    verbose: u8,
) -> Result<InspectSummary> {
    let quotas = limit.map(|limit| seq.quotas(limit));
    let mut subsets = Vec::with_capacity(seq.subset_count());
    for (i, id) in seq.subset_ids().enumerate() {
        let rows = seq.subset_rows(id)?;
        let sample = if verbose > 0 {
            rows.iter()
                .take(SAMPLE_ROWS)
                .map(ToString::to_string)
                .collect()
        } else {
            Vec::new()
        };
        subsets.push(SubsetInfo {
            id: id.to_string(),
            rows: rows.len(),
            quota: quotas.as_ref().map(|q| q[i].1),
            sample,
        });
    }

    Ok(InspectSummary {
        binding_names: seq.binding_names().to_vec(),
        total_rows: seq.len(),
        limit,
        subsets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::tests::{SAMPLE, write_sample};

    #[test]
    fn test_summary_with_quotas() {
        let file = write_sample(SAMPLE);
        let seq = utils::load_sequence(file.path().to_str().unwrap()).unwrap();

        let summary = summarize(&seq, Some(3), 0).unwrap();
        assert_eq!(summary.total_rows, 5);
        assert_eq!(summary.binding_names, ["x"]);
        let quotas = summary
            .subsets
            .iter()
            .map(|s| (s.id.as_str(), s.rows, s.quota))
            .collect::<Vec<_>>();
        assert_eq!(quotas, [("a", 3, Some(2)), ("b", 2, Some(1))]);
        assert!(summary.subsets.iter().all(|s| s.sample.is_empty()));
    }

    #[test]
    fn test_verbose_summary_shows_samples() {
        let file = write_sample(SAMPLE);
        let seq = utils::load_sequence(file.path().to_str().unwrap()).unwrap();

        let summary = summarize(&seq, None, 1).unwrap();
        assert_eq!(summary.subsets[0].sample, ["(1)", "(2)", "(3)"]);
        assert_eq!(summary.subsets[1].quota, None);

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("limit").is_none());
        assert_eq!(json["subsets"][1]["rows"], 2);
    }
}
