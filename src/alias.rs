//! Alias mapping: canonical value per column plus its known surface variants.
//!
//! The store is built once from a YAML source at session start and is
//! read-only afterwards, so it can be shared across concurrent rewrite calls
//! without locking. Every canonical value and alias is run through
//! [`normalize_text`] before storage; lookups therefore expect
//! already-normalized terms and resolve with a single hash probe.
//!
//! Configuration shape (declaration order is significant, see [`AliasStore::resolve`]):
//!
//! ```yaml
//! - column: municipio
//!   groups:
//!     - canonical: Rio de Janeiro
//!       aliases: [RJ, Rio]
//!     - canonical: Sao Paulo
//!       aliases: [SP, Sampa]
//! ```

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::frame::DataFrame;
use crate::normalize::normalize_text;

#[derive(Debug, Error)]
pub enum AliasError {
    /// One normalized alias bound to two different canonical values.
    #[error("duplicate alias '{alias}' in column '{column}'")]
    DuplicateAlias { column: String, alias: String },
    /// The source file exists but is not a valid alias configuration.
    #[error("parsing alias configuration {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// One synonym group: a designated canonical spelling plus its variants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AliasGroup {
    pub canonical: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Alias groups for one dataset column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnAliasConfig {
    pub column: String,
    #[serde(default)]
    pub groups: Vec<AliasGroup>,
}

pub type AliasConfig = Vec<ColumnAliasConfig>;

#[derive(Debug, Clone)]
struct ColumnAliases {
    name: String,
    canonical_by_alias: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct AliasStore {
    columns: Vec<ColumnAliases>,
    max_alias_tokens: usize,
}

impl AliasStore {
    pub fn empty() -> Self {
        AliasStore::default()
    }

    /// Builds the store from a parsed configuration, normalizing every
    /// canonical value and alias. Each canonical value is registered as an
    /// alias of itself. A column declared in several blocks is merged into
    /// one mapping (it keeps the position of its first declaration), so a
    /// normalized alias bound to two different canonical values within one
    /// column is a configuration error no matter how the blocks are split;
    /// repeating an identical alias/canonical pair is tolerated.
    pub fn from_config(config: AliasConfig) -> Result<Self, AliasError> {
        let mut columns: Vec<ColumnAliases> = Vec::with_capacity(config.len());
        let mut max_alias_tokens = 0;
        for entry in config {
            let column_index = match columns.iter().position(|c| c.name == entry.column) {
                Some(idx) => idx,
                None => {
                    columns.push(ColumnAliases {
                        name: entry.column.clone(),
                        canonical_by_alias: HashMap::new(),
                    });
                    columns.len() - 1
                }
            };
            let canonical_by_alias = &mut columns[column_index].canonical_by_alias;
            for group in entry.groups {
                let canonical = normalize_text(&group.canonical);
                if canonical.is_empty() {
                    warn!(
                        "Ignoring empty canonical value in column '{}'",
                        entry.column
                    );
                    continue;
                }
                let mut terms = vec![canonical.clone()];
                terms.extend(group.aliases.iter().map(|alias| normalize_text(alias)));
                for term in terms {
                    if term.is_empty() {
                        continue;
                    }
                    max_alias_tokens = max_alias_tokens.max(term.split(' ').count());
                    match canonical_by_alias.insert(term.clone(), canonical.clone()) {
                        Some(previous) if previous != canonical => {
                            return Err(AliasError::DuplicateAlias {
                                column: entry.column,
                                alias: term,
                            });
                        }
                        _ => {}
                    }
                }
            }
        }
        Ok(AliasStore {
            columns,
            max_alias_tokens,
        })
    }

    /// Loads the store from a YAML file. A missing or unreadable file is
    /// non-fatal: the caller gets an empty store and runs without alias
    /// expansion. A present-but-malformed file is a configuration error.
    pub fn load(path: &Path) -> Result<Self, AliasError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!("Alias configuration {path:?} not found; continuing without aliases");
                return Ok(AliasStore::empty());
            }
            Err(err) => {
                warn!("Alias configuration {path:?} unreadable ({err}); continuing without aliases");
                return Ok(AliasStore::empty());
            }
        };
        let config: AliasConfig = serde_yaml::from_str(&raw).map_err(|source| AliasError::Parse {
            path: format!("{path:?}"),
            source,
        })?;
        let store = Self::from_config(config)?;
        info!(
            "Loaded alias mapping for {} column(s) from {path:?}",
            store.column_count()
        );
        Ok(store)
    }

    /// Drops mapping entries for columns the frame does not have. Unknown
    /// columns are a warning, never an error.
    pub fn validate_against(&mut self, frame: &DataFrame) {
        self.columns.retain(|column| {
            let known = frame.column(&column.name).is_some();
            if !known {
                warn!(
                    "Alias mapping references unknown column '{}'; ignoring it",
                    column.name
                );
            }
            known
        });
    }

    /// Resolves an already-normalized term within one column.
    pub fn lookup(&self, column: &str, term: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.name == column)?
            .canonical_by_alias
            .get(term)
            .map(String::as_str)
    }

    /// Resolves an already-normalized term across all columns, in declaration
    /// order. When a term is an alias in more than one column, the first
    /// declared column wins; keep the most specific columns first in the
    /// configuration.
    pub fn resolve(&self, term: &str) -> Option<(&str, &str)> {
        self.columns.iter().find_map(|column| {
            column
                .canonical_by_alias
                .get(term)
                .map(|canonical| (column.name.as_str(), canonical.as_str()))
        })
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(|c| c.canonical_by_alias.is_empty())
    }

    /// Token length of the longest known alias phrase; bounds the rewriter's
    /// scan window.
    pub fn max_alias_tokens(&self) -> usize {
        self.max_alias_tokens
    }
}
