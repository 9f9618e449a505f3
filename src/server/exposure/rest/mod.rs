//! REST API exposure
//!
//! Consumes a `ServerHost` and produces an Axum `Router` with resource
//! routes, health checks, request tracing and the process-wide 500 fallback.

use super::super::host::ServerHost;
use crate::core::error::{ApiError, EntityError, ProblemDetails};
use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::any::Any;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// Returns a router with:
    /// - Health check routes at the root
    /// - Resource and custom routes, nested under `server.base_path` when set
    /// - A problem-details 404 fallback
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Router {
        let resource_routes = host.resource_registry.build_routes(&host.context);

        let api = custom_routes
            .into_iter()
            .fold(resource_routes, |app, routes| app.merge(routes));

        let app = match host.context.config.server.route_prefix() {
            Some(prefix) => {
                tracing::info!(prefix = %prefix, "mounting API under base path");
                Self::health_routes().nest(&prefix, api)
            }
            None => Self::health_routes().merge(api),
        };

        app.fallback(Self::not_found).layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(Self::handle_panic)),
        )
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "devhabit"
        }))
    }

    async fn not_found(uri: Uri) -> ApiError {
        EntityError::not_found("route", uri.path()).into()
    }

    /// Last-resort handler: a panicking request gets the generic 500
    fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
        let message = panic
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| panic.downcast_ref::<&str>().copied())
            .unwrap_or("unknown panic");
        tracing::error!(panic = message, "request handler panicked");
        ProblemDetails::internal().into_response()
    }
}
