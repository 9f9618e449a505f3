//! Collection query parameters and the paged response envelope

use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;
use crate::links::Link;

/// Query parameters shared by every list endpoint
///
/// ```text
/// GET /habits?page=2&pageSize=5&sort=name desc,createdAtUtc&fields=id,name&q=run
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionQuery {
    /// Page number (starts at 1)
    pub page: Option<usize>,

    /// Items per page, clamped to the configured maximum
    pub page_size: Option<usize>,

    /// Comma-separated `field[ asc|desc]` or `field[:asc|desc]` terms
    pub sort: Option<String>,

    /// Comma-separated field names to include
    pub fields: Option<String>,

    /// Free-text search term
    pub q: Option<String>,
}

impl CollectionQuery {
    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    /// Get page size within the configured limits
    pub fn page_size(&self, pagination: &PaginationConfig) -> usize {
        self.page_size
            .unwrap_or(pagination.default_page_size)
            .clamp(1, pagination.max_page_size.max(1))
    }
}

/// Query parameters for single-resource reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemQuery {
    pub fields: Option<String>,
}

/// One page of shaped items
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,

    /// Collection links, present only for hypermedia requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
}

impl<T> PageEnvelope<T> {
    pub fn new(items: Vec<T>, page: usize, page_size: usize, total_count: usize) -> Self {
        Self {
            items,
            page,
            page_size,
            total_count,
            links: None,
        }
    }

    pub fn has_next_page(&self) -> bool {
        self.page.saturating_mul(self.page_size) < self.total_count
    }

    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }

    pub fn with_links(mut self, links: Vec<Link>) -> Self {
        self.links = Some(links);
        self
    }
}
