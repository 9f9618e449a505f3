//! Server module for building HTTP servers with auto-registered routes
//!
//! The `ServerBuilder` collects modules, freezes the operation and sort
//! mapping registries into an [`ApiContext`], and exposes every resource
//! over REST.

pub mod builder;
pub mod context;
pub mod entity_registry;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use context::ApiContext;
pub use entity_registry::{ResourceDescriptor, ResourceRegistry};
pub use exposure::RestExposure;
pub use host::ServerHost;
