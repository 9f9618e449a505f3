//! DevHabit resources: habits, habit tags, tags and users
//!
//! [`DevHabitModule`] owns the stores and registers one descriptor per
//! resource. Handlers share an [`AppState`] holding the stores and the
//! frozen [`ApiContext`].

pub mod habit_tags;
pub mod habits;
pub mod seed;
pub mod tags;
pub mod users;

use std::sync::Arc;

use axum::http::Method;

use crate::core::error::ConfigError;
use crate::core::extractors::RequestContext;
use crate::core::module::Module;
use crate::core::query::PageEnvelope;
use crate::core::service::DataService;
use crate::links::{Link, LinkFactory, LinkParams};
use crate::server::context::ApiContext;
use crate::server::entity_registry::ResourceRegistry;
use crate::storage::InMemoryDataService;

use habits::model::Habit;
use tags::model::Tag;
use users::model::User;

/// Storage collaborators for every resource
#[derive(Clone)]
pub struct Stores {
    pub habits: Arc<dyn DataService<Habit>>,
    pub tags: Arc<dyn DataService<Tag>>,
    pub users: Arc<dyn DataService<User>>,
}

impl Stores {
    /// Empty in-memory stores
    pub fn in_memory() -> Self {
        Self {
            habits: Arc::new(InMemoryDataService::<Habit>::new()),
            tags: Arc::new(InMemoryDataService::<Tag>::new()),
            users: Arc::new(InMemoryDataService::<User>::new()),
        }
    }
}

/// State shared by every resource handler
#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    pub api: ApiContext,
}

/// The DevHabit module
pub struct DevHabitModule {
    stores: Stores,
}

impl DevHabitModule {
    /// Module backed by empty in-memory stores
    pub fn new() -> Self {
        Self::with_stores(Stores::in_memory())
    }

    pub fn with_stores(stores: Stores) -> Self {
        Self { stores }
    }

    /// Handles to the module's stores
    pub fn stores(&self) -> &Stores {
        &self.stores
    }
}

impl Default for DevHabitModule {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for DevHabitModule {
    fn name(&self) -> &str {
        "devhabit"
    }

    fn resource_types(&self) -> Vec<&str> {
        vec!["habit", "habit-tag", "tag", "user"]
    }

    fn register_resources(&self, registry: &mut ResourceRegistry) {
        registry.register(Box::new(habits::HabitDescriptor::new(self.stores.clone())));
        registry.register(Box::new(habit_tags::HabitTagDescriptor::new(
            self.stores.clone(),
        )));
        registry.register(Box::new(tags::TagDescriptor::new(self.stores.clone())));
        registry.register(Box::new(users::UserDescriptor::new(self.stores.clone())));
    }
}

/// Operations a paged collection links to
pub(crate) struct CollectionOperations {
    pub list: &'static str,
    pub create: &'static str,
}

/// Standard collection links: self, create, next-page and previous-page
///
/// Page links replay the current query with only `page` changed.
pub(crate) fn collection_links<T>(
    factory: &LinkFactory<'_>,
    request: &RequestContext,
    operations: &CollectionOperations,
    envelope: &PageEnvelope<T>,
) -> Result<Vec<Link>, ConfigError> {
    let current = LinkParams::from_pairs(&request.query);

    let mut links = vec![
        factory.create(operations.list, "self", Method::GET, &current, None)?,
        factory.create(operations.create, "create", Method::POST, &LinkParams::new(), None)?,
    ];

    if envelope.has_next_page() {
        let params = current.clone().with("page", envelope.page.saturating_add(1));
        links.push(factory.create(operations.list, "next-page", Method::GET, &params, None)?);
    }

    if envelope.has_previous_page() {
        let params = current.with("page", envelope.page - 1);
        links.push(factory.create(operations.list, "previous-page", Method::GET, &params, None)?);
    }

    Ok(links)
}

/// Generate a prefixed, time-ordered identifier
pub(crate) fn new_id(prefix: &str) -> String {
    format!("{prefix}_{}", uuid::Uuid::now_v7())
}
