//! Join engine
//!
//! Joins build a fresh table from two inputs by nested-loop matching. Keys
//! are arbitrary cell values that may repeat and have no order, so no index
//! is built: every left row is tested against every right row.

use rustc_hash::FxHashSet;

use crate::model::header::unique_against;
use crate::model::{Cell, CellValue, RowInput, Table};

/// Join variant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JoinKind {
    /// Keep left rows with no match, padded on the right
    #[default]
    Left,
    /// Drop left rows with no match
    Inner,
}

impl std::str::FromStr for JoinKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(JoinKind::Left),
            "inner" => Ok(JoinKind::Inner),
            _ => Err(format!("Unknown join kind: {}", s)),
        }
    }
}

/// Main join engine
#[derive(Debug, Clone, Copy, Default)]
pub struct JoinEngine {
    kind: JoinKind,
}

impl JoinEngine {
    pub fn new(kind: JoinKind) -> Self {
        Self { kind }
    }

    /// Join `left` with `right` where `left[left_key] == right[right_key]`
    ///
    /// Matched rows carry every left cell followed by every right cell except
    /// the right key. A left row matching several right rows produces one row
    /// per match. If either key column is missing nothing matches.
    pub fn join(&self, left: &Table, left_key: &str, right: &Table, right_key: &str) -> Table {
        // Resolve the key by position first; renaming may give another
        // right column the key's name.
        let right_key_idx = right.column_index(right_key);
        let right = resolve_collisions(left, right, right_key_idx);
        let mut result = Table::new();

        let left_headers = left.column_headers();
        let right_headers = right.column_headers();
        let left_key_idx = left.column_index(left_key);

        let right_rows = right.value_rows();
        for left_row in left.value_rows() {
            let mut matched = false;

            if let (Some(lk), Some(rk)) = (left_key_idx, right_key_idx) {
                let key = &left_row[lk];
                for right_row in &right_rows {
                    if !keys_match(key, &right_row[rk]) {
                        continue;
                    }
                    let mut cells = zip_cells(&left_headers, &left_row);
                    cells.extend(
                        right_headers
                            .iter()
                            .zip(right_row)
                            .enumerate()
                            .filter(|&(i, _)| i != rk)
                            .map(|(_, (header, value))| Cell::new(header.clone(), value.clone())),
                    );
                    result.push_row(RowInput::Cells(cells));
                    matched = true;
                }
            }

            if !matched && self.kind == JoinKind::Left {
                result.push_row(RowInput::Cells(zip_cells(&left_headers, &left_row)));
            }
        }

        result
    }
}

/// Deep equality of the stored values; padding matches padding.
fn keys_match(left: &CellValue, right: &CellValue) -> bool {
    left == right
}

fn zip_cells(headers: &[String], values: &[CellValue]) -> Vec<Cell> {
    headers
        .iter()
        .zip(values)
        .map(|(header, value)| Cell::new(header.clone(), value.clone()))
        .collect()
}

/// Copy `right`, renaming every non-key column whose header collides with a
/// left header (or with a header already chosen for an earlier right column)
///
/// The key column at `key_idx` keeps its name. It never reaches the result,
/// so a renamed column may end up sharing it.
fn resolve_collisions(left: &Table, right: &Table, key_idx: Option<usize>) -> Table {
    let mut taken: FxHashSet<String> = left.column_headers().into_iter().collect();
    let mut right = right.clone();
    for (idx, column) in right.columns.iter_mut().enumerate() {
        if Some(idx) == key_idx {
            continue;
        }
        column.header = unique_against(&column.header, &taken);
        taken.insert(column.header.clone());
    }
    right
}

/// Convenience function to compute a join
pub fn compute_join(
    left: &Table,
    left_key: &str,
    right: &Table,
    right_key: &str,
    kind: JoinKind,
) -> Table {
    JoinEngine::new(kind).join(left, left_key, right, right_key)
}

impl Table {
    /// Left join this table with `right`
    pub fn left_join(&self, left_key: &str, right: &Table, right_key: &str) -> Table {
        compute_join(self, left_key, right, right_key, JoinKind::Left)
    }

    /// Inner join this table with `right`
    pub fn inner_join(&self, left_key: &str, right: &Table, right_key: &str) -> Table {
        compute_join(self, left_key, right, right_key, JoinKind::Inner)
    }
}
