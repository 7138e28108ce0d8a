//! Row predicates

use crate::model::{CellValue, Record, Table};

/// A conjunction of `header == value` terms
///
/// A single record and a list of single-key records both normalise to the
/// same ordered list of terms. A row matches when every term holds. An empty
/// predicate matches every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    terms: Vec<(String, CellValue)>,
}

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a term
    pub fn and(mut self, header: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.terms.push((header.into(), value.into()));
        self
    }

    /// Conjunction of every record in `records`, in order
    pub fn all_of<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        records.into_iter().flatten().collect()
    }

    pub fn terms(&self) -> &[(String, CellValue)] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Indices of the rows of `table` that satisfy every term, ascending
    ///
    /// A term naming a header the table lacks matches no row.
    pub fn matching_rows(&self, table: &Table) -> Vec<usize> {
        let mut resolved: Vec<(usize, &CellValue)> = Vec::with_capacity(self.terms.len());
        for (header, value) in &self.terms {
            match table.column_index(header) {
                Some(idx) => resolved.push((idx, value)),
                None => return Vec::new(),
            }
        }

        let columns = table.columns();
        (0..table.row_count())
            .filter(|&row| {
                resolved
                    .iter()
                    .all(|&(col, value)| &columns[col].data[row] == value)
            })
            .collect()
    }
}

impl From<Record> for Predicate {
    fn from(record: Record) -> Self {
        record.into_iter().collect()
    }
}

impl From<Vec<Record>> for Predicate {
    fn from(records: Vec<Record>) -> Self {
        Self::all_of(records)
    }
}

impl FromIterator<(String, CellValue)> for Predicate {
    fn from_iter<T: IntoIterator<Item = (String, CellValue)>>(iter: T) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}
