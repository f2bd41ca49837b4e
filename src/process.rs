//! Dataset normalization pass.
//!
//! Builds a normalized copy of a frame, leaving the source untouched. One bad
//! column never aborts the pass: its original values are kept, the failure is
//! reported in the outcome, and the remaining columns still process.

use anyhow::{Result, anyhow, bail};
use log::{debug, warn};

use crate::data::Value;
use crate::frame::{Column, DataFrame};
use crate::normalize::normalize_text;

/// A column left unnormalized, with the reason it was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedColumn {
    pub column: String,
    pub reason: String,
}

/// Result of a dataset normalization pass.
#[derive(Debug, Clone)]
pub struct NormalizedFrame {
    pub frame: DataFrame,
    pub skipped: Vec<SkippedColumn>,
}

/// Normalizes the named columns of `frame` into a new frame with identical
/// shape and column order. Columns not in `columns` are copied unchanged.
pub fn normalize_dataframe(frame: &DataFrame, columns: &[String]) -> NormalizedFrame {
    let mut skipped = Vec::new();
    for name in columns {
        if frame.column(name).is_none() {
            warn!("Skipping unknown column '{name}'");
            skipped.push(SkippedColumn {
                column: name.clone(),
                reason: format!("column '{name}' not present in frame"),
            });
        }
    }

    let normalized_columns = frame
        .columns()
        .iter()
        .map(|column| {
            if !columns.contains(&column.name) {
                return column.clone();
            }
            match normalize_column(column) {
                Ok(values) => {
                    debug!(
                        "Normalized column '{}' ({} row(s))",
                        column.name,
                        values.len()
                    );
                    Column::new(column.name.clone(), column.datatype, values)
                }
                Err(err) => {
                    warn!("Keeping column '{}' unnormalized: {err:#}", column.name);
                    skipped.push(SkippedColumn {
                        column: column.name.clone(),
                        reason: format!("{err:#}"),
                    });
                    column.clone()
                }
            }
        })
        .collect();

    let frame = DataFrame::new(normalized_columns)
        .expect("normalized columns preserve the source frame's shape");
    NormalizedFrame { frame, skipped }
}

fn normalize_column(column: &Column) -> Result<Vec<Option<Value>>> {
    if !column.datatype.is_string() {
        bail!(
            "column '{}' has type {}, expected string",
            column.name,
            column.datatype
        );
    }
    column
        .values
        .iter()
        .map(|cell| match cell {
            None => Ok(None),
            Some(Value::String(s)) => {
                let normalized = normalize_text(s);
                if normalized.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(Value::String(normalized)))
                }
            }
            Some(other) => Err(anyhow!(
                "column '{}' contains non-string cell '{other}'",
                column.name
            )),
        })
        .collect()
}
