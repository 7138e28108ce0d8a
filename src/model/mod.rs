//! Data model for the column store

mod cell;
mod column;
pub mod header;
mod row;
mod table;

pub use cell::CellValue;
pub use column::{CellType, Column};
pub use row::{record, Cell, Record, RowFormat, RowInput, RowView};
pub use table::{RelatedObject, Table, NAME_KEY};
