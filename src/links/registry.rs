//! Registry of named operations and their route templates
//!
//! Operations are keyed by (group, name), e.g. `("habits", "GetHabit")`.
//! Templates use axum's `{param}` placeholder syntax so the same constant
//! serves both the router and link resolution.

use axum::http::Method;
use std::collections::HashMap;

use super::LinkParams;
use crate::core::error::ConfigError;

/// A registered operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRoute {
    pub method: Method,
    pub template: &'static str,
}

/// An operation resolved against a parameter bag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// Path segments, already substituted and not yet percent-encoded
    pub segments: Vec<String>,
    /// Parameters not consumed by the template
    pub query: Vec<(String, String)>,
}

/// Operation route table, frozen after startup
#[derive(Debug, Default)]
pub struct RouteRegistry {
    routes: HashMap<(String, String), OperationRoute>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an operation; names are unique within a group
    pub fn register(
        &mut self,
        group: &str,
        operation: &str,
        method: Method,
        template: &'static str,
    ) -> Result<(), ConfigError> {
        let key = (group.to_string(), operation.to_string());
        if self.routes.contains_key(&key) {
            return Err(ConfigError::DuplicateOperation {
                group: group.to_string(),
                operation: operation.to_string(),
            });
        }

        tracing::debug!(group, operation, %method, template, "registered operation");
        self.routes.insert(key, OperationRoute { method, template });
        Ok(())
    }

    /// Look up an operation
    pub fn route(&self, group: &str, operation: &str) -> Result<&OperationRoute, ConfigError> {
        self.routes
            .get(&(group.to_string(), operation.to_string()))
            .ok_or_else(|| ConfigError::UnresolvedOperation {
                group: group.to_string(),
                operation: operation.to_string(),
            })
    }

    /// Substitute parameters into an operation's template
    pub fn resolve(
        &self,
        group: &str,
        operation: &str,
        params: &LinkParams,
    ) -> Result<ResolvedRoute, ConfigError> {
        let route = self.route(group, operation)?;
        let mut used = Vec::new();

        let segments = route
            .template
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|segment| -> Result<String, ConfigError> {
                let Some(name) = placeholder(segment) else {
                    return Ok(segment.to_string());
                };
                let value = params
                    .get(name)
                    .ok_or_else(|| ConfigError::MissingRouteValue {
                        operation: operation.to_string(),
                        parameter: name.to_string(),
                    })?;
                used.push(name);
                Ok(value.to_string())
            })
            .collect::<Result<Vec<_>, _>>()?;

        let query = params
            .iter()
            .filter(|(key, _)| !used.contains(key))
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        Ok(ResolvedRoute { segments, query })
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn placeholder(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> RouteRegistry {
        let mut routes = RouteRegistry::new();
        routes
            .register("habits", "GetHabits", Method::GET, "/habits")
            .unwrap();
        routes
            .register("habits", "GetHabit", Method::GET, "/habits/{id}")
            .unwrap();
        routes
            .register("habit-tags", "DeleteHabitTag", Method::DELETE, "/habits/{habitId}/tags/{tagId}")
            .unwrap();
        routes
    }

    #[test]
    fn test_resolve_path_values() {
        let resolved = registry()
            .resolve("habits", "GetHabit", &LinkParams::new().with("id", "h_1"))
            .unwrap();
        assert_eq!(resolved.segments, vec!["habits", "h_1"]);
        assert!(resolved.query.is_empty());
    }

    #[test]
    fn test_unused_params_become_query() {
        let params = LinkParams::new()
            .with("id", "h_1")
            .with("fields", "id,name");
        let resolved = registry().resolve("habits", "GetHabit", &params).unwrap();
        assert_eq!(
            resolved.query,
            vec![("fields".to_string(), "id,name".to_string())]
        );
    }

    #[test]
    fn test_multiple_placeholders() {
        let params = LinkParams::new().with("habitId", "h_1").with("tagId", "t_9");
        let resolved = registry()
            .resolve("habit-tags", "DeleteHabitTag", &params)
            .unwrap();
        assert_eq!(resolved.segments, vec!["habits", "h_1", "tags", "t_9"]);
    }

    #[test]
    fn test_unknown_operation_is_config_error() {
        let err = registry()
            .resolve("habits", "ArchiveHabit", &LinkParams::new())
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnresolvedOperation { .. }));
        let err = registry()
            .resolve("tags", "GetHabit", &LinkParams::new())
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnresolvedOperation { .. }));
    }

    #[test]
    fn test_missing_route_value() {
        let err = registry()
            .resolve("habits", "GetHabit", &LinkParams::new())
            .unwrap_err();
        assert_eq!(err.error_code(), "ROUTE_VALUE_MISSING");
    }

    #[test]
    fn test_duplicate_operation_rejected() {
        let mut routes = registry();
        let err = routes
            .register("habits", "GetHabit", Method::GET, "/habits/{id}")
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateOperation { .. }));
    }
}
