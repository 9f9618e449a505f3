//! Service trait for storage operations

use crate::core::entity::Entity;
use crate::core::store::{PagedResult, StorageQuery};
use anyhow::Result;
use async_trait::async_trait;

/// Service trait for managing entities of one type
///
/// Implementations provide CRUD operations plus paged querying.
/// Handlers are agnostic to the underlying storage mechanism.
#[async_trait]
pub trait DataService<T: Entity>: Send + Sync {
    /// Create a new entity
    async fn create(&self, entity: T) -> Result<T>;

    /// Get an entity by ID
    async fn get(&self, id: &str) -> Result<Option<T>>;

    /// Replace an existing entity (last writer wins)
    async fn update(&self, id: &str, entity: T) -> Result<T>;

    /// Create an entity unless a stored one matches `conflict`
    ///
    /// The check and the insert happen atomically; `Ok(None)` means a
    /// conflicting entity exists and nothing was written.
    async fn create_unless(&self, entity: T, conflict: &StorageQuery) -> Result<Option<T>>;

    /// Replace an entity unless another stored entity matches `conflict`
    ///
    /// The entity being replaced never conflicts with itself.
    async fn update_unless(&self, id: &str, entity: T, conflict: &StorageQuery)
    -> Result<Option<T>>;

    /// Delete an entity, returning whether it existed
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Run a search/filter/sort/page query
    async fn query(&self, query: &StorageQuery) -> Result<PagedResult<T>>;
}
