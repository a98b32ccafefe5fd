//! Snapshot CSV comparison.
//!
//! Two operations over loaded CSV tables:
//!
//! - a keyed two-file diff (rows keyed by their first column): rows unique
//!   to either file, rows present in both with differing content, and the
//!   count of perfectly matching rows;
//! - a three-file membership check: whether the selected key columns of
//!   each probe row appear anywhere in a reference file.
//!
//! Reports are plain data; the `book_diff` binary does the printing.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{ReplayError, Result};

/// A CSV file loaded whole: header row plus data rows.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Load a CSV file. Rows may have varying field counts.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ReplayError::InputNotFound(path.to_path_buf()));
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;

        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { headers, rows })
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn keyed(&self) -> BTreeMap<&str, &Vec<String>> {
        self.rows
            .iter()
            .filter(|row| !row.is_empty())
            .map(|row| (row[0].as_str(), row))
            .collect()
    }
}

/// One differing cell: column name, left value, right value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellDiff {
    pub column: String,
    pub left: String,
    pub right: String,
}

/// A key present in both files whose rows differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDiff {
    pub key: String,
    pub cells: Vec<CellDiff>,
}

/// Outcome of a keyed two-file comparison.
#[derive(Debug, Clone, Default)]
pub struct DiffReport {
    /// Whether the header rows are identical
    pub headers_match: bool,
    /// Keys only present in the left file, sorted
    pub only_left: Vec<String>,
    /// Keys only present in the right file, sorted
    pub only_right: Vec<String>,
    /// Keys present in both with differing content, sorted
    pub differing: Vec<RowDiff>,
    /// Count of keys whose rows match exactly
    pub matching: usize,
}

impl DiffReport {
    /// True when both files agree completely.
    pub fn is_clean(&self) -> bool {
        self.headers_match
            && self.only_left.is_empty()
            && self.only_right.is_empty()
            && self.differing.is_empty()
    }
}

/// Compare two tables keyed by their first column.
///
/// Later rows with a repeated key shadow earlier ones, and key order in
/// the report is lexicographic.
pub fn diff_keyed(left: &CsvTable, right: &CsvTable) -> DiffReport {
    let left_map = left.keyed();
    let right_map = right.keyed();

    let mut report = DiffReport {
        headers_match: left.headers == right.headers,
        ..Default::default()
    };

    for (&key, &row) in &left_map {
        match right_map.get(key) {
            None => report.only_left.push(key.to_string()),
            Some(&other) if other == row => report.matching += 1,
            Some(&other) => {
                let max_cols = row.len().max(other.len());
                let mut cells = Vec::new();
                for col in 0..max_cols {
                    let lv = row.get(col).map(String::as_str).unwrap_or("(missing)");
                    let rv = other.get(col).map(String::as_str).unwrap_or("(missing)");
                    if lv != rv {
                        let column = left
                            .headers
                            .get(col)
                            .cloned()
                            .unwrap_or_else(|| format!("column {col}"));
                        cells.push(CellDiff {
                            column,
                            left: lv.to_string(),
                            right: rv.to_string(),
                        });
                    }
                }
                report.differing.push(RowDiff {
                    key: key.to_string(),
                    cells,
                });
            }
        }
    }

    for &key in right_map.keys() {
        if !left_map.contains_key(key) {
            report.only_right.push(key.to_string());
        }
    }

    report
}

/// Outcome of probing one table's key combinations against a reference.
#[derive(Debug, Clone, Default)]
pub struct MembershipReport {
    /// Probe keys found in the reference, in probe row order
    pub found: Vec<String>,
    /// Probe keys absent from the reference, in probe row order
    pub missing: Vec<String>,
}

fn combine_key(row: &[String], key_columns: &[usize]) -> Option<String> {
    let parts: Vec<&str> = key_columns
        .iter()
        .filter_map(|&col| row.get(col).map(String::as_str))
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("|"))
    }
}

/// Check which key-column combinations of `probe` exist in `reference`.
pub fn membership_check(
    probe: &CsvTable,
    reference: &CsvTable,
    key_columns: &[usize],
) -> MembershipReport {
    let reference_keys: BTreeSet<String> = reference
        .rows
        .iter()
        .filter_map(|row| combine_key(row, key_columns))
        .collect();

    let mut report = MembershipReport::default();
    for row in &probe.rows {
        let Some(key) = combine_key(row, key_columns) else {
            continue;
        };
        if reference_keys.contains(&key) {
            report.found.push(key);
        } else {
            report.missing.push(key);
        }
    }

    report
}
