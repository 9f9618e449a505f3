//! Habit tag wiring

use axum::Router;
use axum::http::Method;
use axum::routing::{delete, put};

use super::handlers;
use crate::core::error::ConfigError;
use crate::links::RouteRegistry;
use crate::resources::{AppState, Stores};
use crate::server::context::ApiContext;
use crate::server::entity_registry::ResourceDescriptor;

pub const HABIT_TAGS_GROUP: &str = "habit-tags";

pub const HABIT_TAGS_PATH: &str = "/habits/{id}/tags";
pub const HABIT_TAG_PATH: &str = "/habits/{id}/tags/{tagId}";

pub const UPSERT_HABIT_TAGS: &str = "UpsertHabitTags";
pub const DELETE_HABIT_TAG: &str = "DeleteHabitTag";

pub struct HabitTagDescriptor {
    stores: Stores,
}

impl HabitTagDescriptor {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }
}

impl ResourceDescriptor for HabitTagDescriptor {
    fn resource_type(&self) -> &str {
        "habit-tag"
    }

    fn plural(&self) -> &str {
        "habit-tags"
    }

    fn register_operations(&self, routes: &mut RouteRegistry) -> Result<(), ConfigError> {
        routes.register(HABIT_TAGS_GROUP, UPSERT_HABIT_TAGS, Method::PUT, HABIT_TAGS_PATH)?;
        routes.register(HABIT_TAGS_GROUP, DELETE_HABIT_TAG, Method::DELETE, HABIT_TAG_PATH)?;
        Ok(())
    }

    fn build_routes(&self, ctx: &ApiContext) -> Router {
        Router::new()
            .route(HABIT_TAGS_PATH, put(handlers::upsert_habit_tags))
            .route(HABIT_TAG_PATH, delete(handlers::delete_habit_tag))
            .with_state(AppState {
                stores: self.stores.clone(),
                api: ctx.clone(),
            })
    }
}
