//! Configuration loading and management

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding `server.bind`
pub const BIND_ENV: &str = "DEVHABIT_BIND";

/// Environment variable naming the configuration file
pub const CONFIG_ENV: &str = "DEVHABIT_CONFIG";

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind: String,

    /// Path prefix the API is mounted under (e.g. "/api")
    ///
    /// Resource routes are nested under it and generated links carry it.
    /// Health checks stay at the root.
    pub base_path: String,
}

impl ServerConfig {
    /// Normalized mount prefix, `None` when the API lives at the root
    pub fn route_prefix(&self) -> Option<String> {
        let segments: Vec<&str> = self
            .base_path
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        (!segments.is_empty()).then(|| format!("/{}", segments.join("/")))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            base_path: String::new(),
        }
    }
}

/// Hypermedia link settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Emit absolute hrefs (scheme and host) instead of relative paths
    pub absolute: bool,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self { absolute: true }
    }
}

/// Paging limits for collection endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub links: LinksConfig,
    pub pagination: PaginationConfig,

    /// Default `tracing` filter when `RUST_LOG` is unset
    pub log_level: String,

    /// Populate the in-memory stores with sample data at startup
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            links: LinksConfig::default(),
            pagination: PaginationConfig::default(),
            log_level: "info".to_string(),
            seed_demo_data: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content).map_err(|e| match e {
            ConfigError::ParseError { message, .. } => ConfigError::ParseError {
                file: Some(path.display().to_string()),
                message,
            },
            other => other,
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `DEVHABIT_CONFIG` when set, otherwise defaults, then apply
    /// environment overrides
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_yaml_file(path.trim())?,
            _ => Self::default(),
        };
        Ok(config.with_env_overrides())
    }

    /// Apply `DEVHABIT_BIND`
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(bind) = std::env::var(BIND_ENV)
            .ok()
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
        {
            self.server.bind = bind;
        }
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let pagination = &self.pagination;
        if pagination.max_page_size == 0
            || pagination.default_page_size == 0
            || pagination.default_page_size > pagination.max_page_size
        {
            return Err(ConfigError::ParseError {
                file: None,
                message: format!(
                    "pagination.default_page_size ({}) must be between 1 and pagination.max_page_size ({})",
                    pagination.default_page_size, pagination.max_page_size
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert_eq!(config.server.base_path, "");
        assert!(config.links.absolute);
        assert_eq!(config.pagination.default_page_size, 10);
        assert_eq!(config.pagination.max_page_size, 100);
        assert_eq!(config.log_level, "info");
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
server:
  base_path: /api
links:
  absolute: false
"#;
        let config = AppConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.server.base_path, "/api");
        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert!(!config.links.absolute);
        assert_eq!(config.pagination.max_page_size, 100);
    }

    #[test]
    fn test_route_prefix_is_normalized() {
        let mut server = ServerConfig::default();
        assert_eq!(server.route_prefix(), None);

        server.base_path = "/".to_string();
        assert_eq!(server.route_prefix(), None);

        server.base_path = "api/v1/".to_string();
        assert_eq!(server.route_prefix().as_deref(), Some("/api/v1"));
    }

    #[test]
    fn test_invalid_pagination_rejected() {
        let yaml = "pagination:\n  default_page_size: 500\n  max_page_size: 100\n";
        let err = AppConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_from_yaml_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server: 42").unwrap();

        let err = AppConfig::from_yaml_file(file.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_from_yaml_file_reads_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed_demo_data: true\nlog_level: debug").unwrap();

        let config = AppConfig::from_yaml_file(file.path()).unwrap();
        assert!(config.seed_demo_data);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AppConfig::from_yaml_file("/nonexistent/devhabit.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
    }
}
