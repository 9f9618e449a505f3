//! Client sort expressions mapped onto storage ordering
//!
//! Each public output type registers a [`SortMappingTable`] per storage type.
//! Handlers validate the raw `sort` parameter against it before querying and
//! compile it into [`SortClause`]s that the storage collaborator executes.

pub mod compiler;
pub mod expression;
pub mod mapping;

pub use compiler::{DEFAULT_SORT_FIELD, SortClause};
pub use mapping::{SortMapping, SortMappingRegistry, SortMappingTable};

use crate::core::error::{ApiResult, ValidationError};

/// Validate a sort expression and compile it in one step
///
/// Invalid expressions are rejected with the raw expression echoed back.
pub fn validated_clauses(
    table: &SortMappingTable,
    expression: Option<&str>,
) -> ApiResult<Vec<SortClause>> {
    if !table.validate(expression) {
        return Err(ValidationError::InvalidSort {
            expression: expression.unwrap_or_default().to_string(),
        }
        .into());
    }
    Ok(table.compile(expression, DEFAULT_SORT_FIELD))
}
