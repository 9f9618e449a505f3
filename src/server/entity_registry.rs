//! Resource registry collecting descriptors and their routes

use axum::Router;

use super::context::ApiContext;
use crate::core::error::ConfigError;
use crate::links::RouteRegistry;
use crate::sorting::SortMappingRegistry;

/// Trait that describes how to wire one resource into the API
///
/// Each resource (habits, tags, users...) registers its named operations
/// for link generation, its sort mapping tables, and builds its routes.
pub trait ResourceDescriptor: Send + Sync {
    /// The resource type name (singular, e.g., "habit")
    fn resource_type(&self) -> &str;

    /// The plural form (e.g., "habits")
    fn plural(&self) -> &str;

    /// Register named operations and their route templates
    fn register_operations(&self, routes: &mut RouteRegistry) -> Result<(), ConfigError>;

    /// Register sort mapping tables for the resource's output types
    fn register_sort_mappings(&self, _sorts: &mut SortMappingRegistry) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Build the routes for this resource
    fn build_routes(&self, ctx: &ApiContext) -> Router;
}

/// Registry for all resources in the application
#[derive(Default)]
pub struct ResourceRegistry {
    descriptors: Vec<Box<dyn ResourceDescriptor>>,
}

impl ResourceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource descriptor
    pub fn register(&mut self, descriptor: Box<dyn ResourceDescriptor>) {
        tracing::debug!(
            resource = descriptor.resource_type(),
            plural = descriptor.plural(),
            "registered resource"
        );
        self.descriptors.push(descriptor);
    }

    /// Collect every descriptor's operations
    pub fn register_operations(&self, routes: &mut RouteRegistry) -> Result<(), ConfigError> {
        self.descriptors
            .iter()
            .try_for_each(|d| d.register_operations(routes))
    }

    /// Collect every descriptor's sort mapping tables
    pub fn register_sort_mappings(&self, sorts: &mut SortMappingRegistry) -> Result<(), ConfigError> {
        self.descriptors
            .iter()
            .try_for_each(|d| d.register_sort_mappings(sorts))
    }

    /// Build a router with all registered resource routes
    pub fn build_routes(&self, ctx: &ApiContext) -> Router {
        self.descriptors
            .iter()
            .fold(Router::new(), |router, d| router.merge(d.build_routes(ctx)))
    }

    /// Get all registered resource types, in registration order
    pub fn resource_types(&self) -> Vec<&str> {
        self.descriptors.iter().map(|d| d.resource_type()).collect()
    }
}
