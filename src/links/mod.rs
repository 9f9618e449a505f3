//! Hypermedia link synthesis
//!
//! Resource descriptors register named operations (grouped per resource)
//! with their route templates in a [`RouteRegistry`]. Per request, handlers
//! build a [`LinkFactory`] over the inbound request context and resolve
//! operations plus a [`LinkParams`] bag into [`Link`]s.

pub mod factory;
pub mod registry;

pub use factory::LinkFactory;
pub use registry::{OperationRoute, ResolvedRoute, RouteRegistry};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Media type that switches responses to the hypermedia representation
pub const HATEOAS_MEDIA_TYPE: &str = "application/vnd.dev-habit.hateoas+json";

/// A related action or resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    pub rel: String,
    pub method: String,
}

impl Link {
    pub fn new(href: impl Into<String>, rel: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            method: method.into(),
        }
    }
}

/// Route and query values substituted into an operation's template
///
/// Values matching a `{placeholder}` fill the path; the rest become
/// query parameters in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkParams(IndexMap<String, String>);

impl LinkParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing query pairs (later duplicates win)
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = &'a (String, String)>) -> Self {
        Self(pairs.into_iter().cloned().collect())
    }

    /// Set a value, keeping its position if the key already exists
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.0.insert(key.to_string(), value.to_string());
        self
    }

    /// Set a value only when present
    pub fn with_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
