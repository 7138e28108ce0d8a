//! Row queries and row mutations by predicate

use crate::model::{CellValue, RowFormat, RowView, Table};

use super::notify::{ChangeEvent, ChangeKind};
use super::predicate::Predicate;
use super::WriteOptions;

impl Table {
    /// Rows matching every term of `predicate`, in row order
    pub fn get_rows_where(&self, predicate: &Predicate, format: RowFormat) -> Vec<RowView> {
        predicate
            .matching_rows(self)
            .into_iter()
            .map(|i| self.get_row(i, format))
            .collect()
    }

    /// Overwrite `header` with `value` in every row matching `predicate`
    ///
    /// Does nothing, and fires nothing, when `header` is not a column.
    /// Returns the number of rows updated.
    pub fn update_where(
        &mut self,
        header: &str,
        value: impl Into<CellValue>,
        predicate: &Predicate,
        options: WriteOptions,
    ) -> usize {
        let Some(target) = self.column_index(header) else {
            return 0;
        };

        let value = value.into();
        let rows = predicate.matching_rows(self);
        for &row in &rows {
            self.columns[target].data[row] = value.clone();
        }

        self.notify(
            options.silent,
            ChangeEvent::new(ChangeKind::RowsUpdated, rows.len()),
        );
        rows.len()
    }

    /// Delete every row matching `predicate`; returns the number deleted
    pub fn delete_rows_where(&mut self, predicate: &Predicate, options: WriteOptions) -> usize {
        let rows = predicate.matching_rows(self);
        self.remove_rows(&rows);
        self.notify(
            options.silent,
            ChangeEvent::new(ChangeKind::RowsDeleted, rows.len()),
        );
        rows.len()
    }

    /// Delete row `index`; an index past the end deletes nothing
    pub fn delete_row_at_index(&mut self, index: usize, options: WriteOptions) -> usize {
        if index >= self.row_count() {
            return 0;
        }
        self.remove_rows(&[index]);
        self.notify(options.silent, ChangeEvent::new(ChangeKind::RowsDeleted, 1));
        1
    }

    /// Remove the given row indices from every column in one pass
    ///
    /// Indices are marked up front, so each removal leaves the positions of
    /// the rows still to be removed untouched.
    fn remove_rows(&mut self, rows: &[usize]) {
        if rows.is_empty() {
            return;
        }
        let mut doomed = vec![false; self.row_count()];
        for &row in rows {
            if let Some(mark) = doomed.get_mut(row) {
                *mark = true;
            }
        }
        for column in &mut self.columns {
            let mut marks = doomed.iter();
            column.data.retain(|_| !marks.next().copied().unwrap_or(false));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{record, Record};

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

    fn name_is(name: &str) -> Predicate {
        Predicate::new().and("name", name)
    }

    #[test]
    fn test_get_rows_where() {
        let table = dogs();
        let rows = table.get_rows_where(&name_is("rex"), RowFormat::Records);
        assert_eq!(rows, vec![RowView::Record(record([("name", "rex"), ("color", "red")]))]);

        let rows = table.get_rows_where(&name_is("rex"), RowFormat::Values);
        assert_eq!(
            rows,
            vec![RowView::Values(vec![CellValue::from("rex"), CellValue::from("red")])]
        );

        assert!(table.get_rows_where(&name_is("fido"), RowFormat::Records).is_empty());
    }

    #[test]
    fn test_update_where() {
        let mut table = dogs();
        let predicate = Predicate::from(vec![record([("color", "red")])]);
        let updated = table.update_where("name", "woof", &predicate, WriteOptions::default());
        assert_eq!(updated, 1);
        assert_eq!(table.get_rows_where(&name_is("woof"), RowFormat::Records).len(), 1);
        // position is kept
        assert_eq!(table.record_at(0)["name"], CellValue::from("woof"));
    }

    #[test]
    fn test_update_missing_column_is_noop() {
        let mut table = dogs();
        let before = table.get_rows(RowFormat::Records);
        let updated = table.update_where("age", 3, &Predicate::new(), WriteOptions::default());
        assert_eq!(updated, 0);
        assert_eq!(table.get_rows(RowFormat::Records), before);
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_delete_rows_where() {
        let mut table = dogs();
        let both: Predicate = record([("name", "snuffles"), ("color", "black")]).into();
        assert_eq!(table.delete_rows_where(&both, WriteOptions::default()), 1);
        assert!(table.get_rows_where(&name_is("snuffles"), RowFormat::Records).is_empty());

        table.delete_rows_where(&name_is("rex"), WriteOptions::default());
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.delete_rows_where(&name_is("brian"), WriteOptions::default()), 1);
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_delete_many_is_idempotent() {
        let mut table = Table::new();
        let rows: Vec<Record> = (0..10i64)
            .map(|i| record([("n", CellValue::Int(i)), ("even", CellValue::Bool(i % 2 == 0))]))
            .collect();
        table.add_rows(rows, WriteOptions::default()).unwrap();

        let evens = Predicate::new().and("even", true);
        assert_eq!(table.delete_rows_where(&evens, WriteOptions::default()), 5);
        assert_eq!(table.row_count(), 5);
        assert_eq!(table.delete_rows_where(&evens, WriteOptions::default()), 0);
        assert_eq!(
            table.get_column("n").unwrap(),
            &[
                CellValue::Int(1),
                CellValue::Int(3),
                CellValue::Int(5),
                CellValue::Int(7),
                CellValue::Int(9)
            ]
        );
    }

    #[test]
    fn test_delete_scattered_rows_keeps_columns_aligned() {
        let mut table = Table::new();
        let rows: Vec<Record> = (0..1000i64)
            .map(|i| record([("n", CellValue::Int(i)), ("m", CellValue::Int(i % 7))]))
            .collect();
        table.add_rows(rows, WriteOptions::silent()).unwrap();

        let deleted = table.delete_rows_where(&Predicate::new().and("m", 3), WriteOptions::default());
        assert_eq!(deleted, 143);
        assert_eq!(table.row_count(), 857);
        assert!(table.columns().iter().all(|c| c.len() == 857));
        assert!(table.get_column("m").unwrap().iter().all(|v| v != &CellValue::Int(3)));
        assert_eq!(
            table.get_column("n").unwrap()[..4],
            [CellValue::Int(0), CellValue::Int(1), CellValue::Int(2), CellValue::Int(4)]
        );
    }

    #[test]
    fn test_delete_row_at_index() {
        let mut table = dogs();
        assert_eq!(table.delete_row_at_index(1, WriteOptions::default()), 1);
        assert!(table.get_rows_where(&name_is("snuffles"), RowFormat::Records).is_empty());
        assert_eq!(table.row_count(), 2);

        assert_eq!(table.delete_row_at_index(5, WriteOptions::default()), 0);
        assert_eq!(table.row_count(), 2);
    }
}
