//! Tag resource wiring

use axum::Router;
use axum::http::Method;
use axum::routing::get;

use super::dto::{TagDto, sort_mappings};
use super::handlers;
use super::model::Tag;
use crate::core::error::ConfigError;
use crate::links::RouteRegistry;
use crate::resources::{AppState, Stores};
use crate::server::context::ApiContext;
use crate::server::entity_registry::ResourceDescriptor;
use crate::sorting::SortMappingRegistry;

pub const TAGS_GROUP: &str = "tags";

pub const TAGS_PATH: &str = "/tags";
pub const TAG_PATH: &str = "/tags/{id}";

pub const GET_TAGS: &str = "GetTags";
pub const GET_TAG: &str = "GetTag";
pub const CREATE_TAG: &str = "CreateTag";
pub const UPDATE_TAG: &str = "UpdateTag";
pub const DELETE_TAG: &str = "DeleteTag";

pub struct TagDescriptor {
    stores: Stores,
}

impl TagDescriptor {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }
}

impl ResourceDescriptor for TagDescriptor {
    fn resource_type(&self) -> &str {
        "tag"
    }

    fn plural(&self) -> &str {
        "tags"
    }

    fn register_operations(&self, routes: &mut RouteRegistry) -> Result<(), ConfigError> {
        routes.register(TAGS_GROUP, GET_TAGS, Method::GET, TAGS_PATH)?;
        routes.register(TAGS_GROUP, GET_TAG, Method::GET, TAG_PATH)?;
        routes.register(TAGS_GROUP, CREATE_TAG, Method::POST, TAGS_PATH)?;
        routes.register(TAGS_GROUP, UPDATE_TAG, Method::PUT, TAG_PATH)?;
        routes.register(TAGS_GROUP, DELETE_TAG, Method::DELETE, TAG_PATH)?;
        Ok(())
    }

    fn register_sort_mappings(&self, sorts: &mut SortMappingRegistry) -> Result<(), ConfigError> {
        sorts.register::<TagDto, Tag>(sort_mappings())
    }

    fn build_routes(&self, ctx: &ApiContext) -> Router {
        Router::new()
            .route(TAGS_PATH, get(handlers::get_tags).post(handlers::create_tag))
            .route(
                TAG_PATH,
                get(handlers::get_tag)
                    .put(handlers::update_tag)
                    .delete(handlers::delete_tag),
            )
            .with_state(AppState {
                stores: self.stores.clone(),
                api: ctx.clone(),
            })
    }
}
