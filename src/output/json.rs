//! Rows as JSON records

use std::io::Write;

use anyhow::Result;
use serde_json::{Map, Value};

use crate::model::{CellValue, Table};

use super::TableRenderer;

/// An array with one object per row; pretty-printed unless `compact`
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Rows as JSON objects; padded cells are left out
    pub fn to_value(&self, table: &Table) -> Value {
        let rows = (0..table.row_count())
            .map(|row| {
                let object: Map<String, Value> = table
                    .columns()
                    .iter()
                    .filter_map(|c| {
                        cell_value_to_json(&c.data[row]).map(|v| (c.header.clone(), v))
                    })
                    .collect();
                Value::Object(object)
            })
            .collect();
        Value::Array(rows)
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a cell to JSON; the padding marker has no JSON form
pub fn cell_value_to_json(value: &CellValue) -> Option<Value> {
    let json = match value {
        CellValue::Empty => return None,
        CellValue::Null => Value::Null,
        CellValue::Bool(b) => Value::Bool(*b),
        CellValue::Int(i) => Value::from(*i),
        // NaN and infinities become null
        CellValue::Float(f) => Value::from(*f),
        CellValue::String(s) => Value::String(s.to_string()),
        CellValue::Date(d) => Value::String(d.to_string()),
        CellValue::DateTime(dt) => Value::String(dt.to_string()),
        CellValue::List(items) => Value::Array(
            items
                .iter()
                .map(|item| cell_value_to_json(item).unwrap_or(Value::Null))
                .collect(),
        ),
    };
    Some(json)
}

impl TableRenderer for JsonOutput {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        let value = self.to_value(table);
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &value)?;
        } else {
            serde_json::to_writer(&mut *writer, &value)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::WriteOptions;
    use crate::model::record;

    #[test]
    fn test_padding_is_omitted() {
        let mut table = Table::new();
        table
            .add_rows(
                vec![
                    record([("name", CellValue::from("rex")), ("age", CellValue::Int(3))]),
                    record([("name", CellValue::from("brian")), ("age", CellValue::Null)]),
                    record([("name", CellValue::from("fido"))]),
                ],
                WriteOptions::default(),
            )
            .unwrap();

        let value = JsonOutput::compact().to_value(&table);
        assert_eq!(
            value,
            serde_json::json!([
                {"name": "rex", "age": 3},
                {"name": "brian", "age": null},
                {"name": "fido"}
            ])
        );
    }

    #[test]
    fn test_render_compact() {
        let mut table = Table::new();
        table
            .add_row(record([("a", 1)]), WriteOptions::default())
            .unwrap();
        let mut buf = Vec::new();
        JsonOutput::compact().render(&table, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "[{\"a\":1}]\n");
    }
}
