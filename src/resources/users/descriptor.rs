//! User resource wiring

use axum::Router;
use axum::http::Method;
use axum::routing::get;

use super::handlers;
use crate::core::error::ConfigError;
use crate::links::RouteRegistry;
use crate::resources::{AppState, Stores};
use crate::server::context::ApiContext;
use crate::server::entity_registry::ResourceDescriptor;

pub const USERS_GROUP: &str = "users";

pub const USER_PATH: &str = "/users/{id}";

pub const GET_USER: &str = "GetUser";

pub struct UserDescriptor {
    stores: Stores,
}

impl UserDescriptor {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }
}

impl ResourceDescriptor for UserDescriptor {
    fn resource_type(&self) -> &str {
        "user"
    }

    fn plural(&self) -> &str {
        "users"
    }

    fn register_operations(&self, routes: &mut RouteRegistry) -> Result<(), ConfigError> {
        routes.register(USERS_GROUP, GET_USER, Method::GET, USER_PATH)
    }

    fn build_routes(&self, ctx: &ApiContext) -> Router {
        Router::new()
            .route(USER_PATH, get(handlers::get_user))
            .with_state(AppState {
                stores: self.stores.clone(),
                api: ctx.clone(),
            })
    }
}
