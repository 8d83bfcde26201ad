//! Page command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use tupleset::{PartitionedRecordSequence, Row, TupleSequence};

use crate::utils;

#[derive(Debug, Serialize)]
struct PageSummary {
    total_rows: usize,
    rows: Vec<PageEntry>,
}

#[derive(Debug, Serialize)]
struct PageEntry {
    index: usize,
    subset: String,
    row: Row,
}

pub fn run(offset: usize, count: usize, reverse: bool, file: String) -> Result<()> {
    let mut seq = utils::load_sequence(&file)?;
    let page = read_page(&mut seq, offset, count, reverse)?;
    let json = serde_json::to_string_pretty(&page).context("Failed to serialize page")?;
    println!("{}", json);
    Ok(())
}

/// Walks up to `count` rows through the sequence cursor, starting `offset`
/// rows from the front (or from the back when `reverse` is set).
fn read_page(
    seq: &mut PartitionedRecordSequence,
    offset: usize,
    count: usize,
    reverse: bool,
) -> Result<PageSummary> {
    let total_rows = seq.len();
    let start = if reverse {
        total_rows.saturating_sub(offset)
    } else {
        offset
    };
    seq.set_index(start)
        .with_context(|| format!("Offset {} is beyond the {} rows of the result", offset, total_rows))?;

    let mut rows = Vec::with_capacity(count.min(total_rows));
    while rows.len() < count {
        let (row, index) = if reverse {
            match until_exhausted(seq.previous_row())? {
                Some(row) => (row, seq.index()),
                None => break,
            }
        } else {
            match until_exhausted(seq.next_row())? {
                Some(row) => (row, seq.index() - 1),
                None => break,
            }
        };
        let subset = seq.current_subset_id().unwrap_or_default().to_string();
        rows.push(PageEntry { index, subset, row });
    }
    seq.close();

    Ok(PageSummary { total_rows, rows })
}

/// Maps running off either end of the sequence to `None`; any other failure
/// is an error.
fn until_exhausted(step: tupleset::Result<Row>) -> Result<Option<Row>> {
    match step {
        Ok(row) => Ok(Some(row)),
        Err(e) if e.is_no_such_element() => Ok(None),
        Err(e) => Err(e).context("Failed to read the next page row"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::tests::{SAMPLE, write_sample};

    fn load() -> PartitionedRecordSequence {
        let file = write_sample(SAMPLE);
        utils::load_sequence(file.path().to_str().unwrap()).unwrap()
    }

    fn entries(page: &PageSummary) -> Vec<(usize, &str)> {
        page.rows
            .iter()
            .map(|e| (e.index, e.subset.as_str()))
            .collect()
    }

    #[test]
    fn test_forward_page_crosses_subsets() {
        let mut seq = load();
        let page = read_page(&mut seq, 2, 2, false).unwrap();
        assert_eq!(page.total_rows, 5);
        assert_eq!(entries(&page), [(2, "a"), (3, "b")]);
    }

    #[test]
    fn test_reverse_page() {
        let mut seq = load();
        let page = read_page(&mut seq, 1, 10, true).unwrap();
        assert_eq!(entries(&page), [(3, "b"), (2, "a"), (1, "a"), (0, "a")]);
    }

    #[test]
    fn test_page_past_end() {
        let mut seq = load();
        let page = read_page(&mut seq, 5, 3, false).unwrap();
        assert!(page.rows.is_empty());
        assert!(read_page(&mut seq, 6, 3, false).is_err());

        let page = read_page(&mut seq, 10, 3, true).unwrap();
        assert!(page.rows.is_empty());
    }

    #[test]
    fn test_only_exhaustion_ends_the_page() {
        let row = Row::new(vec![tupleset::Value::from(1i64)]);
        assert_eq!(until_exhausted(Ok(row.clone())).unwrap(), Some(row));

        let end = Err(tupleset::Error::no_such_element(tupleset::Direction::Next));
        assert_eq!(until_exhausted(end).unwrap(), None);

        let err = until_exhausted(Err(tupleset::Error::out_of_range(7, 5))).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
