//! In-memory implementation of DataService for testing and development

use crate::core::error::{ApiError, EntityError};
use crate::core::field::FieldValue;
use crate::core::store::{PagedResult, StorageQuery};
use crate::core::{DataService, Entity};
use crate::sorting::SortClause;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::sync::{Arc, RwLock};

/// In-memory data service implementation
///
/// Keeps insertion order so unsorted reads are stable. Uses RwLock for
/// thread-safe access.
#[derive(Clone)]
pub struct InMemoryDataService<T: Entity> {
    entities: Arc<RwLock<IndexMap<String, T>>>,
}

impl<T: Entity> InMemoryDataService<T> {
    /// Create a new empty in-memory data service
    pub fn new() -> Self {
        Self {
            entities: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Number of stored entities
    pub fn len(&self) -> usize {
        self.entities.read().map(|e| e.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Entity> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found<T: Entity>(id: &str) -> anyhow::Error {
    ApiError::from(EntityError::not_found(T::resource_name_singular(), id)).into()
}

fn value_at<T: Entity>(entity: &T, path: &str) -> FieldValue {
    entity.field_value(path).unwrap_or(FieldValue::Null)
}

fn compare_by<T: Entity>(a: &T, b: &T, clauses: &[SortClause]) -> Ordering {
    for clause in clauses {
        let ordering = value_at(a, &clause.storage_field)
            .compare(&value_at(b, &clause.storage_field));
        let ordering = if clause.descending {
            ordering.reverse()
        } else {
            ordering
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn matches_query<T: Entity>(entity: &T, query: &StorageQuery) -> bool {
    let search_matches = query
        .search
        .as_deref()
        .is_none_or(|term| entity.matches_search(term));

    search_matches
        && query.filters.iter().all(|filter| {
            value_at(entity, &filter.path).compare(&filter.value) == Ordering::Equal
        })
}

fn insert_new<T: Entity>(entities: &mut IndexMap<String, T>, entity: T) -> Result<T> {
    if entities.contains_key(entity.id()) {
        return Err(ApiError::from(EntityError::AlreadyExists {
            entity_type: T::resource_name_singular().to_string(),
            message: format!(
                "{} with id '{}' already exists",
                T::resource_name_singular(),
                entity.id()
            ),
        })
        .into());
    }

    entities.insert(entity.id().to_string(), entity.clone());
    Ok(entity)
}

#[async_trait]
impl<T: Entity> DataService<T> for InMemoryDataService<T> {
    async fn create(&self, entity: T) -> Result<T> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        insert_new(&mut entities, entity)
    }

    async fn create_unless(&self, entity: T, conflict: &StorageQuery) -> Result<Option<T>> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if entities.values().any(|e| matches_query(e, conflict)) {
            return Ok(None);
        }
        insert_new(&mut entities, entity).map(Some)
    }

    async fn get(&self, id: &str) -> Result<Option<T>> {
        let entities = self
            .entities
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(entities.get(id).cloned())
    }

    async fn update(&self, id: &str, entity: T) -> Result<T> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let slot = entities.get_mut(id).ok_or_else(|| not_found::<T>(id))?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn update_unless(
        &self,
        id: &str,
        entity: T,
        conflict: &StorageQuery,
    ) -> Result<Option<T>> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if !entities.contains_key(id) {
            return Err(not_found::<T>(id));
        }
        if entities
            .iter()
            .any(|(key, e)| key != id && matches_query(e, conflict))
        {
            return Ok(None);
        }

        let slot = entities.get_mut(id).ok_or_else(|| not_found::<T>(id))?;
        *slot = entity.clone();
        Ok(Some(entity))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(entities.shift_remove(id).is_some())
    }

    async fn query(&self, query: &StorageQuery) -> Result<PagedResult<T>> {
        let entities = self
            .entities
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut matched: Vec<&T> = entities
            .values()
            .filter(|entity| matches_query(*entity, query))
            .collect();

        if !query.order_by.is_empty() {
            matched.sort_by(|a, b| compare_by(*a, *b, &query.order_by));
        }

        let total_count = matched.len();
        let items = matched
            .into_iter()
            .skip(query.skip)
            .take(query.take.unwrap_or(usize::MAX))
            .cloned()
            .collect();

        tracing::trace!(
            resource = T::resource_name(),
            total_count,
            skip = query.skip,
            "in-memory query"
        );

        Ok(PagedResult { items, total_count })
    }
}
