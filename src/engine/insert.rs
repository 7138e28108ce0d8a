//! Row insertion

use rustc_hash::FxHashSet;

use crate::error::{Result, TableError};
use crate::model::{CellValue, Column, RowInput, Table};

use super::notify::{ChangeEvent, ChangeKind};
use super::WriteOptions;

impl Table {
    /// Add rows in order
    ///
    /// Value rows fill existing columns by position and drop anything past
    /// the last column. Record and cell rows create a column for every header
    /// not seen before. Every row is repaired as soon as it lands, so a later
    /// row that introduces a column leaves earlier rows padded in it.
    ///
    /// Cell rows that repeat a header fail the whole call before any row is
    /// applied. Callbacks fire once per call. Returns the number of rows added.
    pub fn add_rows<I, R>(&mut self, rows: I, options: WriteOptions) -> Result<usize>
    where
        I: IntoIterator<Item = R>,
        R: Into<RowInput>,
    {
        let rows: Vec<RowInput> = rows.into_iter().map(Into::into).collect();
        for row in &rows {
            check_row_headers(row)?;
        }

        let before = self.row_count();
        for row in rows {
            self.push_row(row);
        }
        let added = self.row_count() - before;

        self.notify(options.silent, ChangeEvent::new(ChangeKind::RowsAdded, added));
        Ok(added)
    }

    /// Add a single row
    pub fn add_row(&mut self, row: impl Into<RowInput>, options: WriteOptions) -> Result<usize> {
        let row: RowInput = row.into();
        self.add_rows(std::iter::once(row), options)
    }

    /// Append one row and repair the table
    ///
    /// A table without columns gains no row from a value row.
    pub(crate) fn push_row(&mut self, row: RowInput) {
        let before = self.row_count();
        match row {
            RowInput::Values(values) => {
                for (column, value) in self.columns.iter_mut().zip(values) {
                    column.data.push(value);
                }
            }
            RowInput::Record(record) => {
                for (header, value) in record {
                    self.add_cell(header, value, before);
                }
            }
            RowInput::Cells(cells) => {
                for cell in cells {
                    self.add_cell(cell.header, cell.data, before);
                }
            }
        }
        if !self.columns.is_empty() {
            self.pad_to(before + 1);
        }
        self.clean();
    }

    /// Append one value to the named column, creating the column if needed
    ///
    /// A new column starts padded to `rows_before`. Leaves the table ragged;
    /// callers repair it afterwards.
    fn add_cell(&mut self, header: String, value: CellValue, rows_before: usize) {
        let idx = match self.column_index(&header) {
            Some(idx) => idx,
            None => {
                self.columns.push(Column::padded(header, rows_before));
                self.columns.len() - 1
            }
        };
        self.columns[idx].data.push(value);
    }
}

fn check_row_headers(row: &RowInput) -> Result<()> {
    if let RowInput::Cells(cells) = row {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for cell in cells {
            if !seen.insert(cell.header.as_str()) {
                return Err(TableError::DuplicateRowHeaders {
                    header: cell.header.clone(),
                });
            }
        }
    }
    Ok(())
}
