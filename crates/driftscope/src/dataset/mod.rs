//! Typed datasets compared by the drift engine.

mod column;
mod table;
mod types;

pub use column::{Column, ColumnValues};
pub use table::Dataset;
pub use types::{Category, ColumnType};
