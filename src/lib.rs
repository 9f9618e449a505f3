//! # DevHabit
//!
//! A habit-tracking REST API built around a reusable response-shaping engine.
//!
//! ## Features
//!
//! - **Sort Mapping**: client sort expressions (`name desc,age`) are validated
//!   against per-type mapping tables and compiled into storage ordering
//! - **Sparse Fieldsets**: `fields=id,name` returns only the selected fields
//! - **Hypermedia**: `Accept: application/vnd.dev-habit.hateoas+json` adds
//!   `self`/`update`/`delete`/paging links to items and collections
//! - **Problem Details**: every error renders as `application/problem+json`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use devhabit::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::from_env()?;
//!     ServerBuilder::new()
//!         .with_config(config)
//!         .register_module(DevHabitModule::new())
//!         .serve()
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod links;
pub mod resources;
pub mod server;
pub mod shaping;
pub mod sorting;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ApiError, ApiResult, CollectionQuery, DataService, Entity, FieldValue, ItemQuery, Module,
        PageEnvelope, PagedResult, RequestContext, StorageQuery,
    };

    // === Engine ===
    pub use crate::links::{HATEOAS_MEDIA_TYPE, Link, LinkFactory, LinkParams, RouteRegistry};
    pub use crate::shaping::{FieldMap, Shapeable, ShapedRecord, shape, shape_many};
    pub use crate::sorting::{SortClause, SortMapping, SortMappingRegistry, SortMappingTable};

    // === Macros ===
    pub use crate::shapeable;

    // === Resources ===
    pub use crate::resources::{DevHabitModule, Stores, seed::seed_demo_data};

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{ServerBuilder, ServerHost};

    // === Storage ===
    pub use crate::storage::InMemoryDataService;
}
