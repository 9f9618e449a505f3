//! Storage query abstraction
//!
//! Handlers describe what they want from the storage collaborator with a
//! [`StorageQuery`]: an optional text search, equality filters on storage
//! paths, an ordered list of [`SortClause`]s and a skip/take window. The
//! collaborator applies them in that order, counts the filtered set, then
//! pages it.

use crate::core::field::FieldValue;
use crate::sorting::SortClause;

/// Equality predicate on a storage path
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub path: String,
    pub value: FieldValue,
}

/// Storage-agnostic query description
#[derive(Debug, Clone, Default)]
pub struct StorageQuery {
    /// Free-text search term
    pub search: Option<String>,

    /// Equality filters, all of which must match
    pub filters: Vec<Filter>,

    /// Multi-key ordering; first clause is the primary key
    pub order_by: Vec<SortClause>,

    /// Number of records to skip after ordering
    pub skip: usize,

    /// Maximum number of records to return
    pub take: Option<usize>,
}

impl StorageQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term; blank terms are ignored
    pub fn search(mut self, term: Option<&str>) -> Self {
        self.search = term
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        self
    }

    /// Add an equality filter
    pub fn filter(mut self, path: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.filters.push(Filter {
            path: path.into(),
            value: value.into(),
        });
        self
    }

    /// Add an equality filter only when a value is present
    pub fn filter_opt<V: Into<FieldValue>>(self, path: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.filter(path, value),
            None => self,
        }
    }

    pub fn order_by(mut self, clauses: Vec<SortClause>) -> Self {
        self.order_by = clauses;
        self
    }

    /// Page window (pages start at 1)
    ///
    /// Windows past `usize::MAX` saturate and simply match nothing.
    pub fn paginate(mut self, page: usize, page_size: usize) -> Self {
        self.skip = page.saturating_sub(1).saturating_mul(page_size);
        self.take = Some(page_size);
        self
    }
}

/// One page of records plus the size of the full filtered set
#[derive(Debug, Clone)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total_count: usize,
}
