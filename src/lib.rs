//! taboo - In-memory, column-oriented tables
//!
//! Columns grow as rows arrive and rows are matched by predicate. Two tables
//! join into a third. Registered callbacks hear about every change.
//!
//! ```
//! use taboo::engine::WriteOptions;
//! use taboo::model::{record, Table};
//!
//! let mut dogs = Table::new();
//! dogs.add_rows(
//!     vec![
//!         record([("name", "rex"), ("color", "red")]),
//!         record([("name", "brian"), ("color", "white")]),
//!     ],
//!     WriteOptions::default(),
//! )
//! .unwrap();
//!
//! let mut cats = Table::new();
//! cats.add_row(record([("name", "harvey"), ("color", "red")]), WriteOptions::default())
//!     .unwrap();
//!
//! let joined = dogs.inner_join("color", &cats, "color");
//! assert_eq!(joined.column_headers(), vec!["name", "color", "name-1"]);
//! assert_eq!(joined.row_count(), 1);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod loader;
pub mod model;
pub mod output;

pub use config::Config;
pub use engine::{Predicate, WriteOptions};
pub use error::TableError;
pub use model::{CellValue, Table};
