//! In-memory tabular dataset abstraction.
//!
//! The core never parses files itself; an external loader hands it a
//! [`DataFrame`] of named, typed columns with row-aligned cells. A missing
//! cell is `None`. Construction enforces rectangular shape and unique column
//! names so the other modules can index freely.

use anyhow::{Result, bail, ensure};
use serde::{Deserialize, Serialize};

use crate::data::{ColumnType, Value};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Column {
    pub name: String,
    pub datatype: ColumnType,
    pub values: Vec<Option<Value>>,
}

impl Column {
    pub fn new(name: impl Into<String>, datatype: ColumnType, values: Vec<Option<Value>>) -> Self {
        Column {
            name: name.into(),
            datatype,
            values,
        }
    }

    /// Convenience constructor for string columns; empty input becomes `None`.
    pub fn from_strings<S: AsRef<str>>(name: impl Into<String>, values: &[S]) -> Self {
        let values = values
            .iter()
            .map(|v| {
                let v = v.as_ref();
                if v.is_empty() {
                    None
                } else {
                    Some(Value::String(v.to_string()))
                }
            })
            .collect();
        Column {
            name: name.into(),
            datatype: ColumnType::String,
            values,
        }
    }

    pub fn row_count(&self) -> usize {
        self.values.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataFrame {
    columns: Vec<Column>,
}

impl DataFrame {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let rows = first.row_count();
            for column in &columns {
                ensure!(
                    column.row_count() == rows,
                    "Column '{}' has {} row(s), expected {}",
                    column.name,
                    column.row_count(),
                    rows
                );
            }
        }
        for (idx, column) in columns.iter().enumerate() {
            if columns[..idx].iter().any(|c| c.name == column.name) {
                bail!("Duplicate column name '{}'", column.name);
            }
        }
        Ok(DataFrame { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::row_count)
    }
}
