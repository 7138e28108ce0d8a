//! The column store

use indexmap::IndexMap;
use serde::Serialize;

use crate::engine::notify::{Callbacks, ChangeEvent, ChangeKind};
use crate::engine::{ColumnOptions, DuplicateHeaders, WriteOptions};
use crate::error::{Result, TableError};

use super::cell::CellValue;
use super::column::Column;
use super::header::dedupe_headers;
use super::row::{Cell, Record, RowFormat, RowView};

/// Metadata key holding the table name
pub const NAME_KEY: &str = "name";

/// An in-memory, column-oriented table
///
/// The columns are the only stored state; rows are produced on demand.
/// After every public mutation all columns hold the same number of cells
/// and, unless a caller asked otherwise, no two columns share a header.
#[derive(Debug, Default)]
pub struct Table {
    pub(crate) columns: Vec<Column>,
    metadata: IndexMap<String, CellValue>,
    pub(crate) callbacks: Callbacks,
}

/// One distinct value of a column together with everything seen next to it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedObject {
    pub name: CellValue,
    pub related: IndexMap<String, Vec<CellValue>>,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table tagged with a name
    pub fn with_name(name: impl Into<String>) -> Self {
        let name: String = name.into();
        let mut table = Self::new();
        table
            .metadata
            .insert(NAME_KEY.to_string(), CellValue::from(name));
        table
    }

    /// Name stored in the metadata, if any
    pub fn name(&self) -> Option<&str> {
        self.metadata.get(NAME_KEY).and_then(CellValue::as_str)
    }

    pub fn metadata(&self) -> &IndexMap<String, CellValue> {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut IndexMap<String, CellValue> {
        &mut self.metadata
    }

    /// Column headers in column order
    pub fn column_headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.header.clone()).collect()
    }

    /// Borrow the columns
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get column index by header
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.header == header)
    }

    /// Get column by header
    pub fn column(&self, header: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.header == header)
    }

    /// Values of one column, in row order
    pub fn get_column(&self, header: &str) -> Option<&[CellValue]> {
        self.column(header).map(|c| c.data.as_slice())
    }

    /// Number of rows; a table without columns has none
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Repair the table after a structural change
    ///
    /// Pads every column with the empty marker up to the longest one, then
    /// renames colliding headers.
    pub(crate) fn clean(&mut self) {
        let longest = self.columns.iter().map(Column::len).max().unwrap_or(0);
        self.pad_to(longest);
        dedupe_headers(&mut self.columns);
    }

    pub(crate) fn pad_to(&mut self, len: usize) {
        for column in &mut self.columns {
            column.pad_to(len);
        }
    }

    /// Add a single column
    ///
    /// Under the default policy the column is always appended and a repeated
    /// header is renamed by the cleaning pass. Under `Ignore` an existing
    /// header is left alone. Under `Reject` an existing header is an error.
    /// Returns whether a column was appended.
    pub fn add_column(&mut self, header: impl Into<String>, options: ColumnOptions) -> Result<bool> {
        let header = header.into();
        let exists = self.column_index(&header).is_some();
        match options.duplicates {
            DuplicateHeaders::Ignore if exists => return Ok(false),
            DuplicateHeaders::Reject if exists => {
                return Err(TableError::DuplicateHeaders { header })
            }
            _ => {}
        }

        let rows = self.row_count();
        self.columns.push(Column::padded(header, rows));
        self.clean();
        self.notify(
            options.silent,
            ChangeEvent::new(ChangeKind::ColumnsAdded, 1),
        );
        Ok(true)
    }

    /// Add several columns in one call
    ///
    /// Under `Reject` the whole call fails before anything changes if a
    /// header is repeated within `headers` or already present.
    /// Returns the number of columns appended.
    pub fn add_columns<I, S>(&mut self, headers: I, options: ColumnOptions) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();

        let accepted: Vec<String> = match options.duplicates {
            DuplicateHeaders::Rename => headers,
            DuplicateHeaders::Ignore => {
                let mut accepted: Vec<String> = Vec::with_capacity(headers.len());
                for header in headers {
                    if self.column_index(&header).is_none() && !accepted.contains(&header) {
                        accepted.push(header);
                    }
                }
                accepted
            }
            DuplicateHeaders::Reject => {
                for (i, header) in headers.iter().enumerate() {
                    if self.column_index(header).is_some() || headers[..i].contains(header) {
                        return Err(TableError::DuplicateHeaders {
                            header: header.clone(),
                        });
                    }
                }
                headers
            }
        };

        let rows = self.row_count();
        let added = accepted.len();
        self.columns
            .extend(accepted.into_iter().map(|h| Column::padded(h, rows)));
        self.clean();
        self.notify(
            options.silent,
            ChangeEvent::new(ChangeKind::ColumnsAdded, added),
        );
        Ok(added)
    }

    /// Remove every row and column
    pub fn clear(&mut self, options: WriteOptions) {
        let rows = self.row_count();
        self.columns.clear();
        self.notify(options.silent, ChangeEvent::new(ChangeKind::Cleared, rows));
    }

    /// Bare values of row `index`
    pub fn values_at(&self, index: usize) -> Vec<CellValue> {
        if index >= self.row_count() {
            return Vec::new();
        }
        self.columns.iter().map(|c| c.data[index].clone()).collect()
    }

    /// Record of row `index`
    pub fn record_at(&self, index: usize) -> Record {
        if index >= self.row_count() {
            return Record::new();
        }
        self.columns
            .iter()
            .map(|c| (c.header.clone(), c.data[index].clone()))
            .collect()
    }

    /// `{header, data}` pairs of row `index`
    pub fn row_cells(&self, index: usize) -> Vec<Cell> {
        if index >= self.row_count() {
            return Vec::new();
        }
        self.columns
            .iter()
            .map(|c| Cell::new(c.header.clone(), c.data[index].clone()))
            .collect()
    }

    /// Row `index` in the requested shape; out of range yields an empty row
    pub fn get_row(&self, index: usize, format: RowFormat) -> RowView {
        match format {
            RowFormat::Records => RowView::Record(self.record_at(index)),
            RowFormat::Values => RowView::Values(self.values_at(index)),
        }
    }

    /// Every row in insertion order
    pub fn get_rows(&self, format: RowFormat) -> Vec<RowView> {
        (0..self.row_count())
            .map(|i| self.get_row(i, format))
            .collect()
    }

    /// Every row as bare values
    pub(crate) fn value_rows(&self) -> Vec<Vec<CellValue>> {
        (0..self.row_count()).map(|i| self.values_at(i)).collect()
    }

    /// Denormalize the table around one column
    ///
    /// For every distinct value of `header` (first-seen order), collect the
    /// values of every other column from the rows holding that value.
    pub fn column_to_objects(&self, header: &str) -> Vec<RelatedObject> {
        let Some(key_idx) = self.column_index(header) else {
            return Vec::new();
        };

        let mut objects: Vec<RelatedObject> = Vec::new();
        for value in &self.columns[key_idx].data {
            if !objects.iter().any(|o| &o.name == value) {
                objects.push(RelatedObject {
                    name: value.clone(),
                    related: IndexMap::new(),
                });
            }
        }

        for object in &mut objects {
            for row in 0..self.row_count() {
                if self.columns[key_idx].data[row] != object.name {
                    continue;
                }
                for (col_idx, column) in self.columns.iter().enumerate() {
                    if col_idx == key_idx {
                        continue;
                    }
                    object
                        .related
                        .entry(column.header.clone())
                        .or_default()
                        .push(column.data[row].clone());
                }
            }
        }

        objects
    }
}

/// Deep copy of the column store; metadata and callbacks are not carried over
impl Clone for Table {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            metadata: IndexMap::new(),
            callbacks: Callbacks::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record;

    fn dogs() -> Table {
        let mut table = Table::new();
        table
            .add_rows(
                vec![
                    record([("name", "rex"), ("color", "red")]),
                    record([("name", "snuffles"), ("color", "black")]),
                    record([("name", "brian"), ("color", "white")]),
                ],
                WriteOptions::default(),
            )
            .unwrap();
        table
    }

    #[test]
    fn test_new_table_is_empty() {
        let table = Table::with_name("pets");
        assert_eq!(table.name(), Some("pets"));
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
        assert!(table.get_rows(RowFormat::Records).is_empty());
    }

    #[test]
    fn test_add_columns() {
        let mut table = Table::new();
        let added = table
            .add_columns(["column 1", "column 2", "column 3"], ColumnOptions::default())
            .unwrap();
        assert_eq!(added, 3);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_duplicate_headers_are_renamed() {
        let mut table = Table::new();
        table
            .add_columns(["hello", "hello", "hello"], ColumnOptions::default())
            .unwrap();
        assert_eq!(table.column_headers(), vec!["hello-1", "hello-2", "hello"]);
    }

    #[test]
    fn test_add_column_allows_duplicates() {
        let mut table = Table::new();
        assert!(table.add_column("hello", ColumnOptions::default()).unwrap());
        assert!(table.add_column("hello", ColumnOptions::default()).unwrap());
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.column_headers(), vec!["hello-1", "hello"]);
    }

    #[test]
    fn test_add_column_ignore_duplicates() {
        let mut table = Table::new();
        table
            .add_column("hello", ColumnOptions::ignore_duplicates())
            .unwrap();
        let added = table
            .add_column("hello", ColumnOptions::ignore_duplicates())
            .unwrap();
        assert!(!added);
        assert_eq!(table.column_headers(), vec!["hello"]);

        let added = table
            .add_columns(["hello", "world", "world"], ColumnOptions::ignore_duplicates())
            .unwrap();
        assert_eq!(added, 1);
        assert_eq!(table.column_headers(), vec!["hello", "world"]);
    }

    #[test]
    fn test_reject_duplicates_fails_before_mutating() {
        let mut table = Table::new();
        let err = table
            .add_columns(["a", "b", "a"], ColumnOptions::reject_duplicates())
            .unwrap_err();
        assert!(matches!(err, TableError::DuplicateHeaders { ref header } if header == "a"));
        assert_eq!(table.column_count(), 0);

        table.add_column("a", ColumnOptions::default()).unwrap();
        assert!(table
            .add_column("a", ColumnOptions::reject_duplicates())
            .is_err());
        assert_eq!(table.column_count(), 1);
    }

    #[test]
    fn test_new_column_is_padded_to_row_count() {
        let mut table = dogs();
        table.add_column("age", ColumnOptions::default()).unwrap();
        assert_eq!(table.get_column("age").map(<[_]>::len), Some(3));
        assert!(table.get_column("age").unwrap().iter().all(CellValue::is_empty));
    }

    #[test]
    fn test_get_column_and_rows() {
        let table = dogs();
        assert_eq!(table.column_headers(), vec!["name", "color"]);
        assert_eq!(
            table.get_column("name").unwrap(),
            &[
                CellValue::from("rex"),
                CellValue::from("snuffles"),
                CellValue::from("brian")
            ]
        );
        assert!(table.get_column("age").is_none());

        let row = table.get_row(1, RowFormat::Values);
        assert_eq!(
            row.as_values().unwrap(),
            &[CellValue::from("snuffles"), CellValue::from("black")]
        );
        let row = table.get_row(0, RowFormat::Records);
        assert_eq!(row.get("color"), Some(&CellValue::from("red")));

        let cells = table.row_cells(2);
        assert_eq!(cells[0], Cell::new("name", "brian"));
    }

    #[test]
    fn test_out_of_range_row_is_empty() {
        let table = dogs();
        assert!(table.get_row(3, RowFormat::Records).is_empty());
        assert!(table.get_row(99, RowFormat::Values).is_empty());
        assert!(table.row_cells(3).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut table = dogs();
        table.clear(WriteOptions::default());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut table = dogs();
        table
            .metadata_mut()
            .insert("owner".to_string(), CellValue::from("jeff"));
        let mut copy = table.clone();
        assert!(copy.metadata().is_empty());
        assert_eq!(copy.get_rows(RowFormat::Records), table.get_rows(RowFormat::Records));

        copy.add_row(record([("name", "fido")]), WriteOptions::default())
            .unwrap();
        assert_eq!(copy.row_count(), 4);
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn test_column_to_objects() {
        let mut table = Table::new();
        table
            .add_rows(
                vec![
                    record([("owner", "jeff"), ("pet", "rex")]),
                    record([("owner", "frank"), ("pet", "mittens")]),
                    record([("owner", "jeff"), ("pet", "harvey")]),
                ],
                WriteOptions::default(),
            )
            .unwrap();

        let objects = table.column_to_objects("owner");
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].name, CellValue::from("jeff"));
        assert_eq!(
            objects[0].related["pet"],
            vec![CellValue::from("rex"), CellValue::from("harvey")]
        );
        assert_eq!(objects[1].related["pet"], vec![CellValue::from("mittens")]);
        assert!(table.column_to_objects("missing").is_empty());
    }
}
