//! Column classification heuristics.
//!
//! Classification decides which columns are worth running through the text
//! normalizer. It is a pure function over a column's declared type and its
//! values, recomputed per dataset; nothing is cached across frames.

use std::collections::HashSet;

use itertools::Itertools;

use crate::data::Value;
use crate::frame::{Column, DataFrame};

/// Single-token values at or below this length are treated as code-shaped
/// regardless of cardinality (state abbreviations, unit codes).
const CODE_SHORT_LEN: usize = 4;
/// Uniform-length single-token values up to this length qualify as codes when
/// cardinality is high enough (order numbers, SKUs).
const CODE_UNIFORM_MAX_LEN: usize = 8;
/// Distinct-to-populated ratio above which uniform short values are assumed
/// to be identifiers rather than vocabulary.
const CODE_DISTINCT_RATIO: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnClass {
    /// Free-form string content worth normalizing and alias-expanding.
    Text,
    /// Short enumerated codes; normalized but never alias-expanded.
    CategoricalCode,
    /// Numeric, temporal, or boolean content; excluded from normalization.
    NonText,
}

/// Shape evidence accumulated over a column's non-empty string values.
struct CodeShape {
    populated: usize,
    single_token: bool,
    lengths: Vec<usize>,
    distinct: HashSet<String>,
}

impl CodeShape {
    fn new() -> Self {
        Self {
            populated: 0,
            single_token: true,
            lengths: Vec::new(),
            distinct: HashSet::new(),
        }
    }

    fn observe(&mut self, value: &str) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return;
        }
        self.populated += 1;
        if trimmed.split_whitespace().nth(1).is_some() {
            self.single_token = false;
        }
        self.lengths.push(trimmed.chars().count());
        self.distinct.insert(trimmed.to_string());
    }

    fn decide(&self) -> ColumnClass {
        if self.populated == 0 {
            // Nothing to judge; normalizing an empty column is a no-op.
            return ColumnClass::Text;
        }
        if !self.single_token || !self.lengths.iter().all_equal() {
            return ColumnClass::Text;
        }
        let len = self.lengths[0];
        if len > CODE_UNIFORM_MAX_LEN {
            return ColumnClass::Text;
        }
        let distinct_ratio = self.distinct.len() as f64 / self.populated as f64;
        if len <= CODE_SHORT_LEN || distinct_ratio >= CODE_DISTINCT_RATIO {
            ColumnClass::CategoricalCode
        } else {
            ColumnClass::Text
        }
    }
}

/// Classifies one column from its declared type plus value-shape heuristics.
/// Deterministic: the same column always yields the same class.
pub fn classify_column(column: &Column) -> ColumnClass {
    if !column.datatype.is_string() {
        return ColumnClass::NonText;
    }
    let mut shape = CodeShape::new();
    for cell in &column.values {
        if let Some(s) = cell.as_ref().and_then(Value::as_str) {
            shape.observe(s);
        }
    }
    shape.decide()
}

/// Returns the names of `Text` columns in the frame's original column order.
/// These are the columns eligible for alias expansion.
pub fn identify_text_columns(frame: &DataFrame) -> Vec<String> {
    frame
        .columns()
        .iter()
        .filter(|column| classify_column(column) == ColumnClass::Text)
        .map(|column| column.name.clone())
        .collect()
}

/// Returns the names of all columns worth normalizing, in the frame's
/// original column order: free text plus categorical codes. Code columns are
/// normalized like any other string column but never alias-expanded, so this
/// is the selection to hand to `normalize_dataframe` while
/// [`identify_text_columns`] scopes the alias mapping.
pub fn identify_normalizable_columns(frame: &DataFrame) -> Vec<String> {
    frame
        .columns()
        .iter()
        .filter(|column| classify_column(column) != ColumnClass::NonText)
        .map(|column| column.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ColumnType;
    use crate::frame::Column;

    fn int_column(name: &str, values: &[i64]) -> Column {
        Column::new(
            name,
            ColumnType::Integer,
            values.iter().map(|v| Some(Value::Integer(*v))).collect(),
        )
    }

    #[test]
    fn non_string_columns_are_non_text() {
        let column = int_column("total", &[1, 2, 3]);
        assert_eq!(classify_column(&column), ColumnClass::NonText);
    }

    #[test]
    fn free_text_columns_are_text() {
        let column = Column::from_strings(
            "city",
            &["Sao Paulo", "Rio de Janeiro", "Belo Horizonte", "Curitiba"],
        );
        assert_eq!(classify_column(&column), ColumnClass::Text);
    }

    #[test]
    fn state_abbreviations_are_categorical_codes() {
        let column = Column::from_strings("uf", &["SP", "RJ", "MG", "SP", "SC", "RJ"]);
        assert_eq!(classify_column(&column), ColumnClass::CategoricalCode);
    }

    #[test]
    fn uniform_identifiers_are_categorical_codes() {
        let column = Column::from_strings("code", &["AB123456", "CD987654", "EF555444"]);
        assert_eq!(classify_column(&column), ColumnClass::CategoricalCode);
    }

    #[test]
    fn repeated_short_words_stay_text() {
        // Uniform length 5 but low cardinality and not code-short: vocabulary,
        // not identifiers.
        let column = Column::from_strings("tier", &["prata", "prata", "prata", "ouro2"]);
        assert_eq!(classify_column(&column), ColumnClass::Text);
    }

    #[test]
    fn empty_string_column_defaults_to_text() {
        let column = Column::from_strings("notes", &["", "", ""]);
        assert_eq!(classify_column(&column), ColumnClass::Text);
    }

    #[test]
    fn identify_normalizable_columns_includes_codes() {
        let frame = DataFrame::new(vec![
            Column::from_strings("empresa", &["Matriz SC", "Filial RJ"]),
            int_column("total", &[10, 20]),
            Column::from_strings("uf", &["SC", "RJ"]),
        ])
        .unwrap();
        assert_eq!(identify_normalizable_columns(&frame), vec!["empresa", "uf"]);
        assert_eq!(identify_text_columns(&frame), vec!["empresa"]);
    }

    #[test]
    fn identify_text_columns_preserves_frame_order() {
        let frame = DataFrame::new(vec![
            Column::from_strings("empresa", &["Matriz SC", "Filial RJ"]),
            int_column("total", &[10, 20]),
            Column::from_strings("uf", &["SC", "RJ"]),
            Column::from_strings("municipio", &["Florianopolis", "Niteroi"]),
        ])
        .unwrap();
        assert_eq!(identify_text_columns(&frame), vec!["empresa", "municipio"]);
    }
}
