//! Habit resource wiring

use axum::Router;
use axum::http::Method;
use axum::routing::get;

use super::dto::{HabitDto, sort_mappings};
use super::handlers;
use super::model::Habit;
use crate::core::error::ConfigError;
use crate::links::RouteRegistry;
use crate::resources::{AppState, Stores};
use crate::server::context::ApiContext;
use crate::server::entity_registry::ResourceDescriptor;
use crate::sorting::SortMappingRegistry;

pub const HABITS_GROUP: &str = "habits";

pub const HABITS_PATH: &str = "/habits";
pub const HABIT_PATH: &str = "/habits/{id}";

pub const GET_HABITS: &str = "GetHabits";
pub const GET_HABIT: &str = "GetHabit";
pub const CREATE_HABIT: &str = "CreateHabit";
pub const UPDATE_HABIT: &str = "UpdateHabit";
pub const PATCH_HABIT: &str = "PatchHabit";
pub const DELETE_HABIT: &str = "DeleteHabit";

pub struct HabitDescriptor {
    stores: Stores,
}

impl HabitDescriptor {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }
}

impl ResourceDescriptor for HabitDescriptor {
    fn resource_type(&self) -> &str {
        "habit"
    }

    fn plural(&self) -> &str {
        "habits"
    }

    fn register_operations(&self, routes: &mut RouteRegistry) -> Result<(), ConfigError> {
        routes.register(HABITS_GROUP, GET_HABITS, Method::GET, HABITS_PATH)?;
        routes.register(HABITS_GROUP, GET_HABIT, Method::GET, HABIT_PATH)?;
        routes.register(HABITS_GROUP, CREATE_HABIT, Method::POST, HABITS_PATH)?;
        routes.register(HABITS_GROUP, UPDATE_HABIT, Method::PUT, HABIT_PATH)?;
        routes.register(HABITS_GROUP, PATCH_HABIT, Method::PATCH, HABIT_PATH)?;
        routes.register(HABITS_GROUP, DELETE_HABIT, Method::DELETE, HABIT_PATH)?;
        Ok(())
    }

    fn register_sort_mappings(&self, sorts: &mut SortMappingRegistry) -> Result<(), ConfigError> {
        sorts.register::<HabitDto, Habit>(sort_mappings())
    }

    fn build_routes(&self, ctx: &ApiContext) -> Router {
        Router::new()
            .route(
                HABITS_PATH,
                get(handlers::get_habits).post(handlers::create_habit),
            )
            .route(
                HABIT_PATH,
                get(handlers::get_habit)
                    .put(handlers::update_habit)
                    .patch(handlers::patch_habit)
                    .delete(handlers::delete_habit),
            )
            .with_state(AppState {
                stores: self.stores.clone(),
                api: ctx.clone(),
            })
    }
}
