// File: src/core/loader.rs
use crate::core::types::{CountTable, RawCounts, ALL_KEY};
use crate::error::{FormatError, MissingDataError, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// Parses one line of aggregation output: a JSON string key, a TAB, then a
/// JSON object of non-negative integer counts.
/// e.g. `"Pizza"\t{"cheese": 7, "UNK": 2}`
pub fn parse_counts_line(line: &str, line_no: usize) -> std::result::Result<(String, CountTable), FormatError> {
    let fail = |reason: String| FormatError { line: line_no, reason };

    let (raw_key, raw_counts) = line
        .split_once('\t')
        .ok_or_else(|| fail("expected a TAB between key and counts".to_string()))?;

    let key: String = serde_json::from_str(raw_key.trim())
        .map_err(|e| fail(format!("key is not a JSON string: {}", e)))?;
    let counts: CountTable = serde_json::from_str(raw_counts.trim())
        .map_err(|e| fail(format!("counts are not an object of non-negative integers: {}", e)))?;

    Ok((key, counts))
}

/// Reads the whole counts source once and splits it into the category totals
/// (the `all` line) and the per-category word tables.
///
/// Duplicate keys are last-write-wins. Line order does not matter otherwise.
pub fn load_counts<R: BufRead>(reader: R) -> Result<RawCounts> {
    let mut category_totals: Option<CountTable> = None;
    let mut word_counts = HashMap::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let (key, counts) = parse_counts_line(&line, idx + 1)?;
        debug!(key = %key, entries = counts.len(), "parsed counts line");

        if key == ALL_KEY {
            if category_totals.replace(counts).is_some() {
                warn!(line = idx + 1, "duplicate \"all\" line overrides earlier totals");
            }
        } else if word_counts.insert(key.clone(), counts).is_some() {
            warn!(line = idx + 1, category = %key, "duplicate category line overrides earlier counts");
        }
    }

    let category_totals = category_totals.ok_or(MissingDataError::NoTotals)?;
    Ok(RawCounts { category_totals, word_counts })
}

/// Opens a counts file and loads it with [`load_counts`].
pub fn load_counts_from_path(path: &Path) -> Result<RawCounts> {
    let file = File::open(path)?;
    load_counts(BufReader::new(file))
}
