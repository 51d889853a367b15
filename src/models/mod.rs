//! Models module
//!
//! Defines the values flowing through the export pipeline: the discovered
//! table schema and the sampled rows. All of them are immutable once built.

pub mod row;
pub mod table;

pub use row::{CellValue, Row, RowSet, SAMPLE_SIZE};
pub use table::TableSchema;
