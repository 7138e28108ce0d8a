//! Row representations
//!
//! Rows are never stored. They are cut across the columns on demand, in one
//! of three shapes: an ordered list of `{header, data}` cells, a record keyed
//! by header, or the bare values in column order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::cell::CellValue;

/// A row keyed by header, in column order
pub type Record = IndexMap<String, CellValue>;

/// One cell of a row together with the header it sits under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub header: String,
    pub data: CellValue,
}

impl Cell {
    pub fn new(header: impl Into<String>, data: impl Into<CellValue>) -> Self {
        Self {
            header: header.into(),
            data: data.into(),
        }
    }
}

/// A row handed to the table for insertion
#[derive(Debug, Clone, PartialEq)]
pub enum RowInput {
    /// Values assigned to existing columns by position; extras are dropped
    Values(Vec<CellValue>),
    /// Values keyed by header; unknown headers become new columns
    Record(Record),
    /// `{header, data}` pairs; unknown headers become new columns
    Cells(Vec<Cell>),
}

impl From<Vec<CellValue>> for RowInput {
    fn from(values: Vec<CellValue>) -> Self {
        RowInput::Values(values)
    }
}

impl From<Record> for RowInput {
    fn from(record: Record) -> Self {
        RowInput::Record(record)
    }
}

impl From<Vec<Cell>> for RowInput {
    fn from(cells: Vec<Cell>) -> Self {
        RowInput::Cells(cells)
    }
}

/// Shape of rows returned by read operations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowFormat {
    /// Header to value records
    #[default]
    Records,
    /// Bare values in column order
    Values,
}

/// A row produced by a read operation
#[derive(Debug, Clone, PartialEq)]
pub enum RowView {
    Record(Record),
    Values(Vec<CellValue>),
}

impl RowView {
    /// Number of cells in the row
    pub fn len(&self) -> usize {
        match self {
            RowView::Record(record) => record.len(),
            RowView::Values(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            RowView::Record(record) => Some(record),
            RowView::Values(_) => None,
        }
    }

    pub fn as_values(&self) -> Option<&[CellValue]> {
        match self {
            RowView::Values(values) => Some(values),
            RowView::Record(_) => None,
        }
    }

    /// Value under `header`; only records carry headers
    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.as_record().and_then(|record| record.get(header))
    }
}

/// Build a record from `(header, value)` pairs
///
/// ```
/// use taboo::model::{record, CellValue};
///
/// let dog = record([("name", "rex"), ("color", "red")]);
/// assert_eq!(dog.get("name"), Some(&CellValue::from("rex")));
/// ```
pub fn record<K, V, I>(pairs: I) -> Record
where
    K: Into<String>,
    V: Into<CellValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
