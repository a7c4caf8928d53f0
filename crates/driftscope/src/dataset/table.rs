//! Ordered collection of named columns.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use indexmap::IndexMap;

use super::column::Column;
use crate::error::{DriftError, Result};
use crate::input::DataTable;

/// A reference or production snapshot: equally long named columns in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: IndexMap<String, Column>,
    row_count: usize,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a typed dataset from a parsed table.
    pub fn from_table(table: &DataTable) -> Result<Self> {
        let mut dataset = Self::new();
        for (index, header) in table.headers.iter().enumerate() {
            dataset.push(Column::from_raw(header.clone(), table.column_values(index)))?;
        }
        Ok(dataset)
    }

    /// Append a column. The first column fixes the row count.
    pub fn push(&mut self, column: Column) -> Result<()> {
        if self.columns.contains_key(column.name()) {
            return Err(DriftError::DuplicateColumn(column.name().to_string()));
        }

        if self.columns.is_empty() {
            self.row_count = column.len();
        } else if column.len() != self.row_count {
            return Err(DriftError::ColumnLength {
                column: column.name().to_string(),
                expected: self.row_count,
                actual: column.len(),
            });
        }

        self.columns.insert(column.name().to_string(), column);
        Ok(())
    }

    /// Builder form of [`Dataset::push`].
    pub fn with_column(mut self, column: Column) -> Result<Self> {
        self.push(column)?;
        Ok(self)
    }

    /// Append a floating-point column.
    pub fn with_float(self, name: impl Into<String>, values: Vec<Option<f64>>) -> Result<Self> {
        self.with_column(Column::float(name, values))
    }

    /// Append an integer column.
    pub fn with_integer(self, name: impl Into<String>, values: Vec<Option<i64>>) -> Result<Self> {
        self.with_column(Column::integer(name, values))
    }

    /// Append a text column.
    pub fn with_text(self, name: impl Into<String>, values: Vec<Option<String>>) -> Result<Self> {
        self.with_column(Column::text(name, values))
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub(crate) fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Columns in file order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    /// Column names in file order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// True when the dataset has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Write the dataset as comma-separated text with a header row.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| DriftError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let file = File::create(path).map_err(|e| DriftError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut writer = csv::Writer::from_writer(BufWriter::new(file));
        writer.write_record(self.column_names())?;
        for row in 0..self.row_count {
            writer.write_record(self.columns().map(|c| c.render_cell(row)))?;
        }
        writer.flush().map_err(|e| DriftError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }
}
