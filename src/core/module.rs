//! Module system
//!
//! A module groups related resources and hands their descriptors to the
//! server builder.

use crate::server::entity_registry::ResourceRegistry;

/// Trait for application modules
pub trait Module: Send + Sync {
    /// Unique name of the module
    fn name(&self) -> &str;

    /// Resource types provided by this module
    fn resource_types(&self) -> Vec<&str>;

    /// Register resource descriptors
    fn register_resources(&self, registry: &mut ResourceRegistry);
}
