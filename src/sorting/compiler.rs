//! Sort validation and compilation against a mapping table

use serde::Serialize;

use super::expression::{self, ParsedTerm};
use super::mapping::SortMappingTable;

/// Storage field used when an expression yields no clauses
pub const DEFAULT_SORT_FIELD: &str = "Id";

/// One storage-level ordering instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortClause {
    pub storage_field: String,
    pub descending: bool,
}

impl SortClause {
    pub fn ascending(storage_field: impl Into<String>) -> Self {
        Self {
            storage_field: storage_field.into(),
            descending: false,
        }
    }

    pub fn descending(storage_field: impl Into<String>) -> Self {
        Self {
            storage_field: storage_field.into(),
            descending: true,
        }
    }
}

impl SortMappingTable {
    /// Whether every term of the expression names a mapped field
    ///
    /// Missing or blank expressions are valid and mean "default order".
    /// Malformed terms make the expression invalid.
    pub fn validate(&self, expression: Option<&str>) -> bool {
        let Some(expression) = expression.filter(|e| !e.trim().is_empty()) else {
            return true;
        };

        expression::parse(expression).all(|term| match term {
            ParsedTerm::Valid(term) => self.find(term.field).is_some(),
            ParsedTerm::Malformed(_) => false,
        })
    }

    /// Compile an expression into storage clauses
    ///
    /// Unknown or malformed terms are dropped. The final direction of each
    /// clause is the requested direction flipped by the mapping's `reverse`
    /// flag. When nothing survives, orders ascending on `default_field`.
    pub fn compile(&self, expression: Option<&str>, default_field: &str) -> Vec<SortClause> {
        let clauses: Vec<SortClause> = expression
            .map(expression::parse)
            .into_iter()
            .flatten()
            .filter_map(|term| match term {
                ParsedTerm::Valid(term) => self.find(term.field).map(|mapping| SortClause {
                    storage_field: mapping.storage_field.to_string(),
                    descending: term.descending ^ mapping.reverse,
                }),
                ParsedTerm::Malformed(raw) => {
                    tracing::debug!(term = raw, "dropping malformed sort term");
                    None
                }
            })
            .collect();

        if clauses.is_empty() {
            vec![SortClause::ascending(default_field)]
        } else {
            clauses
        }
    }
}
