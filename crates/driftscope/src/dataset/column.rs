//! Typed dataset columns.

use std::collections::BTreeSet;

use super::types::{Category, ColumnType};
use crate::input::DataTable;

/// Cell storage for a column. `None` marks a missing value.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    column_type: ColumnType,
    values: ColumnValues,
}

impl Column {
    /// Create a floating-point column. Non-finite values are stored as missing.
    pub fn float(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Float,
            values: ColumnValues::Numeric(values.into_iter().map(finite).collect()),
        }
    }

    /// Create an integer column.
    pub fn integer(name: impl Into<String>, values: Vec<Option<i64>>) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Integer,
            values: ColumnValues::Numeric(values.into_iter().map(|v| v.map(|i| i as f64)).collect()),
        }
    }

    /// Create a text column.
    pub fn text(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Text,
            values: ColumnValues::Text(values),
        }
    }

    /// Build a column from raw cells, inferring its type.
    pub fn from_raw<'a>(name: impl Into<String>, cells: impl IntoIterator<Item = &'a str>) -> Self {
        let cells: Vec<Option<&str>> = cells
            .into_iter()
            .map(|c| (!DataTable::is_missing_value(c)).then(|| c.trim()))
            .collect();

        let column_type = ColumnType::infer(cells.iter().flatten().copied());
        let values = if column_type.is_numeric() {
            ColumnValues::Numeric(
                cells
                    .iter()
                    .map(|&c| finite(c.and_then(|v| v.parse::<f64>().ok())))
                    .collect(),
            )
        } else {
            ColumnValues::Text(cells.iter().map(|&c| c.map(str::to_string)).collect())
        };

        Self {
            name: name.into(),
            column_type,
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    /// Number of cells, missing ones included.
    pub fn len(&self) -> usize {
        match &self.values {
            ColumnValues::Numeric(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        match &self.values {
            ColumnValues::Numeric(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnValues::Text(v) => v.iter().filter(|x| x.is_none()).count(),
        }
    }

    /// Non-missing values of a numeric column, `None` for text columns.
    pub fn present_numbers(&self) -> Option<Vec<f64>> {
        match &self.values {
            ColumnValues::Numeric(v) => Some(v.iter().flatten().copied().collect()),
            ColumnValues::Text(_) => None,
        }
    }

    /// Non-missing values as categories.
    pub fn categories(&self) -> Vec<Category> {
        match &self.values {
            ColumnValues::Numeric(v) => v.iter().flatten().map(|n| Category::Number(*n)).collect(),
            ColumnValues::Text(v) => v.iter().flatten().map(|s| Category::Text(s.clone())).collect(),
        }
    }

    /// Number of distinct non-missing values.
    pub fn distinct_count(&self) -> usize {
        self.categories().into_iter().collect::<BTreeSet<_>>().len()
    }

    /// Render one cell for delimited output; missing cells render empty.
    pub(crate) fn render_cell(&self, row: usize) -> String {
        match &self.values {
            ColumnValues::Numeric(v) => match v.get(row).copied().flatten() {
                Some(n) if self.column_type == ColumnType::Integer => format!("{}", n.round() as i64),
                Some(n) => format!("{n}"),
                None => String::new(),
            },
            ColumnValues::Text(v) => v.get(row).cloned().flatten().unwrap_or_default(),
        }
    }

    /// Replace numeric values in place, optionally changing the declared type.
    pub(crate) fn map_numeric(&mut self, column_type: ColumnType, f: impl Fn(usize, f64) -> f64) {
        if let ColumnValues::Numeric(values) = &mut self.values {
            for (row, value) in values.iter_mut().enumerate() {
                *value = finite((*value).map(|v| f(row, v)));
            }
            self.column_type = column_type;
        }
    }
}

/// Drops non-finite values and folds `-0.0` into `0.0`.
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite()).map(|v| if v == 0.0 { 0.0 } else { v })
}
