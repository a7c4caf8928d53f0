//! Core value types for dataset columns.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Storage type inferred for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Whole numbers (no decimal point).
    Integer,
    /// Floating-point numbers.
    Float,
    /// Anything that is not uniformly numeric.
    Text,
}

impl ColumnType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    /// Infer the storage type from raw, already non-missing, cell values.
    ///
    /// A column is `Integer` only if every value parses as an integer and
    /// `Float` only if every value parses as a number. A column with no
    /// values at all is `Float`, matching an all-missing numeric column.
    pub fn infer<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut all_integer = true;
        let mut seen = false;

        for value in values {
            seen = true;
            let trimmed = value.trim();
            if all_integer && trimmed.parse::<i64>().is_ok() {
                continue;
            }
            all_integer = false;
            if trimmed.parse::<f64>().is_err() {
                return ColumnType::Text;
            }
        }

        if !seen {
            ColumnType::Float
        } else if all_integer {
            ColumnType::Integer
        } else {
            ColumnType::Float
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Integer => write!(f, "integer"),
            ColumnType::Float => write!(f, "float"),
            ColumnType::Text => write!(f, "text"),
        }
    }
}

/// A single category value, as counted by the chi-square path.
///
/// Categories have a total order (numbers before text, numbers by
/// `f64::total_cmp`) so contingency tables enumerate columns identically
/// on every run.
#[derive(Debug, Clone)]
pub enum Category {
    Number(f64),
    Text(String),
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Category {}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Category {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Category::Number(a), Category::Number(b)) => a.total_cmp(b),
            (Category::Text(a), Category::Text(b)) => a.cmp(b),
            (Category::Number(_), Category::Text(_)) => Ordering::Less,
            (Category::Text(_), Category::Number(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Number(n) => write!(f, "{n}"),
            Category::Text(s) => write!(f, "{s}"),
        }
    }
}
