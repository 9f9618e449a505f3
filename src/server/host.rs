//! Server host for API exposure
//!
//! The host owns the frozen registries and the resource descriptors. An
//! exposure (REST) consumes it to produce a router.

use super::context::ApiContext;
use super::entity_registry::ResourceRegistry;
use crate::config::AppConfig;
use crate::core::error::ConfigError;
use crate::links::RouteRegistry;
use crate::sorting::SortMappingRegistry;

/// Host context containing all application state
pub struct ServerHost {
    /// Frozen registries and configuration shared by handlers
    pub context: ApiContext,

    /// Resource descriptors
    pub resource_registry: ResourceRegistry,
}

impl ServerHost {
    /// Collect operations and sort mappings from every descriptor, then
    /// freeze them
    ///
    /// Duplicate names are configuration errors and abort startup.
    pub fn from_registry(
        resource_registry: ResourceRegistry,
        config: AppConfig,
    ) -> Result<Self, ConfigError> {
        let mut routes = RouteRegistry::new();
        resource_registry.register_operations(&mut routes)?;

        let mut sorts = SortMappingRegistry::new();
        resource_registry.register_sort_mappings(&mut sorts)?;

        tracing::info!(
            resources = resource_registry.resource_types().len(),
            operations = routes.len(),
            sort_tables = sorts.len(),
            "registries frozen"
        );

        Ok(Self {
            context: ApiContext::new(sorts, routes, config),
            resource_registry,
        })
    }

    /// Get all registered resource types
    pub fn resource_types(&self) -> Vec<&str> {
        self.resource_registry.resource_types()
    }

    /// Check if the host has any resources to serve
    pub fn is_ready(&self) -> bool {
        !self.resource_registry.resource_types().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_host_is_not_ready() {
        let host = ServerHost::from_registry(ResourceRegistry::new(), AppConfig::default()).unwrap();
        assert!(!host.is_ready());
        assert!(host.context.routes.is_empty());
        assert!(host.context.sort_mappings.is_empty());
    }
}
