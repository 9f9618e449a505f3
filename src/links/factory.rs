//! Per-request link construction

use axum::http::Method;
use url::{Position, Url};

use super::{Link, LinkParams, RouteRegistry};
use crate::core::error::ConfigError;
use crate::core::extractors::RequestContext;

/// Builds links for one request
///
/// Resolves named operations against the route registry and renders them
/// under the request's scheme, host and the configured base path.
#[derive(Debug, Clone)]
pub struct LinkFactory<'a> {
    routes: &'a RouteRegistry,
    base: Url,
    base_segments: Vec<String>,
    absolute: bool,
    group: &'a str,
}

impl<'a> LinkFactory<'a> {
    /// Create a factory whose operations default to `group`
    pub fn new(
        routes: &'a RouteRegistry,
        ctx: &RequestContext,
        base_path: &str,
        absolute: bool,
        group: &'a str,
    ) -> Result<Self, ConfigError> {
        let origin = format!("{}://{}", ctx.scheme, ctx.host);
        let base = Url::parse(&origin).map_err(|e| ConfigError::InvalidBaseUri {
            uri: origin.clone(),
            message: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUri {
                uri: origin,
                message: "cannot be a base".to_string(),
            });
        }

        let base_segments = base_path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            routes,
            base,
            base_segments,
            absolute,
            group,
        })
    }

    /// Default operation group of this factory
    pub fn group(&self) -> &str {
        self.group
    }

    /// Resolve an operation into a link
    ///
    /// `group` overrides the factory's default group. An operation that
    /// cannot be resolved is a wiring defect and is returned as a
    /// [`ConfigError`].
    pub fn create(
        &self,
        operation: &str,
        rel: &str,
        method: Method,
        params: &LinkParams,
        group: Option<&str>,
    ) -> Result<Link, ConfigError> {
        let group = group.unwrap_or(self.group);
        let resolved = self.routes.resolve(group, operation, params)?;

        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ConfigError::InvalidBaseUri {
                uri: self.base.to_string(),
                message: "cannot be a base".to_string(),
            })?
            .clear()
            .extend(&self.base_segments)
            .extend(&resolved.segments);

        if !resolved.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&resolved.query);
        }

        let href = if self.absolute {
            url.to_string()
        } else {
            url[Position::BeforePath..].to_string()
        };

        Ok(Link::new(href, rel, method.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes() -> RouteRegistry {
        let mut routes = RouteRegistry::new();
        routes
            .register("habits", "GetHabits", Method::GET, "/habits")
            .unwrap();
        routes
            .register("habits", "GetHabit", Method::GET, "/habits/{id}")
            .unwrap();
        routes
            .register("habit-tags", "UpsertHabitTags", Method::PUT, "/habits/{habitId}/tags")
            .unwrap();
        routes
    }

    fn ctx() -> RequestContext {
        RequestContext::new("http", "localhost:3000")
    }

    #[test]
    fn test_absolute_link() {
        let routes = routes();
        let factory = LinkFactory::new(&routes, &ctx(), "", true, "habits").unwrap();
        let link = factory
            .create("GetHabit", "self", Method::GET, &LinkParams::new().with("id", "h_1"), None)
            .unwrap();
        assert_eq!(link, Link::new("http://localhost:3000/habits/h_1", "self", "GET"));
    }

    #[test]
    fn test_relative_link_with_base_path_and_query() {
        let routes = routes();
        let factory = LinkFactory::new(&routes, &ctx(), "/api/v1/", false, "habits").unwrap();
        let params = LinkParams::new().with("page", 2).with("sort", "name desc");
        let link = factory
            .create("GetHabits", "next-page", Method::GET, &params, None)
            .unwrap();
        assert_eq!(link.href, "/api/v1/habits?page=2&sort=name+desc");
    }

    #[test]
    fn test_explicit_group() {
        let routes = routes();
        let factory = LinkFactory::new(&routes, &ctx(), "", true, "habits").unwrap();
        let link = factory
            .create(
                "UpsertHabitTags",
                "upsert-tags",
                Method::PUT,
                &LinkParams::new().with("habitId", "h_1"),
                Some("habit-tags"),
            )
            .unwrap();
        assert_eq!(link.href, "http://localhost:3000/habits/h_1/tags");
        assert_eq!(link.method, "PUT");
    }

    #[test]
    fn test_path_values_are_encoded() {
        let routes = routes();
        let factory = LinkFactory::new(&routes, &ctx(), "", false, "habits").unwrap();
        let link = factory
            .create("GetHabit", "self", Method::GET, &LinkParams::new().with("id", "a b/c"), None)
            .unwrap();
        assert_eq!(link.href, "/habits/a%20b%2Fc");
    }

    #[test]
    fn test_unresolved_operation_fails() {
        let routes = routes();
        let factory = LinkFactory::new(&routes, &ctx(), "", true, "habits").unwrap();
        let err = factory
            .create("UpsertHabitTags", "upsert-tags", Method::PUT, &LinkParams::new(), None)
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnresolvedOperation { .. }));
    }

    #[test]
    fn test_invalid_host_is_config_error() {
        let routes = routes();
        let bad = RequestContext::new("http", "bad host");
        assert!(LinkFactory::new(&routes, &bad, "", true, "habits").is_err());
    }
}
