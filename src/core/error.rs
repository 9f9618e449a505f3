//! Typed error handling for the DevHabit API
//!
//! Every failure a handler can produce is an [`ApiError`]. Each category maps
//! to an HTTP status code and a stable machine-readable code, and renders as
//! an `application/problem+json` body.
//!
//! # Error Categories
//!
//! - [`EntityError`]: lookups and conflicts on stored resources
//! - [`ValidationError`]: invalid client input (payloads, sort and field expressions)
//! - [`ConfigError`]: wiring defects (missing sort mappings, unresolvable operations)
//! - [`StorageError`]: failures reported by the storage collaborator
//! - [`RequestError`]: malformed requests rejected before reaching a handler
//!
//! Client errors (4xx) echo the offending input. Server errors (5xx) are logged
//! and answered with a generic problem body so no internal detail leaks.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Title used for every 5xx problem response
pub const INTERNAL_ERROR_TITLE: &str = "Internal Server error occurred!";

/// Detail used for every 5xx problem response
pub const INTERNAL_ERROR_DETAIL: &str =
    "An error occurred while processing your request, please try again.";

/// The main error type of the API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Entity-related errors (lookups, conflicts)
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Invalid client input
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration or wiring defects
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Malformed HTTP requests
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Problem details body (RFC 9457) returned for every error
#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    /// Problem type URI
    #[serde(rename = "type")]
    pub problem_type: String,
    /// Short human-readable summary
    pub title: String,
    /// HTTP status code
    pub status: u16,
    /// Human-readable explanation specific to this occurrence
    pub detail: String,
    /// Stable error code for programmatic handling
    pub code: String,
    /// Optional structured details (field errors, offending ids)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
}

impl ProblemDetails {
    /// Generic 500 problem that carries no internal detail
    pub fn internal() -> Self {
        Self {
            problem_type: problem_type_for(StatusCode::INTERNAL_SERVER_ERROR),
            title: INTERNAL_ERROR_TITLE.to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            detail: INTERNAL_ERROR_DETAIL.to_string(),
            code: "INTERNAL_ERROR".to_string(),
            errors: None,
        }
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(self)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}

fn problem_type_for(status: StatusCode) -> String {
    match status {
        StatusCode::BAD_REQUEST => "https://tools.ietf.org/html/rfc9110#section-15.5.1",
        StatusCode::NOT_FOUND => "https://tools.ietf.org/html/rfc9110#section-15.5.5",
        StatusCode::CONFLICT => "https://tools.ietf.org/html/rfc9110#section-15.5.10",
        _ => "https://tools.ietf.org/html/rfc9110#section-15.6.1",
    }
    .to_string()
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Entity(e) => e.status_code(),
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Request(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Entity(e) => e.error_code(),
            ApiError::Validation(e) => e.error_code(),
            ApiError::Config(e) => e.error_code(),
            ApiError::Storage(_) => "STORAGE_ERROR",
            ApiError::Request(e) => e.error_code(),
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this error is a server-side defect rather than a client mistake
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Convert to a problem response body
    ///
    /// Server errors collapse to [`ProblemDetails::internal`].
    pub fn to_problem(&self) -> ProblemDetails {
        if self.is_server_error() {
            return ProblemDetails::internal();
        }

        let status = self.status_code();
        ProblemDetails {
            problem_type: problem_type_for(status),
            title: status
                .canonical_reason()
                .unwrap_or("Bad Request")
                .to_string(),
            status: status.as_u16(),
            detail: self.to_string(),
            code: self.error_code().to_string(),
            errors: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({ "entityType": entity_type, "id": id }))
            }
            ApiError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            ApiError::Validation(ValidationError::UnknownReferences { ids, .. }) => {
                Some(serde_json::json!({ "ids": ids }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }
        self.to_problem().into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to stored resources
#[derive(Debug, Error)]
pub enum EntityError {
    /// Entity was not found
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: String },

    /// Entity conflicts with an existing one
    #[error("{message}")]
    AlreadyExists {
        entity_type: String,
        message: String,
    },
}

impl EntityError {
    pub fn not_found(entity_type: &str, id: impl Into<String>) -> Self {
        EntityError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::AlreadyExists { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::AlreadyExists { .. } => "ENTITY_ALREADY_EXISTS",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to client input
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Multiple field validation errors
    #[error("Validation errors: {}", join_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Sort expression references a field without a sort mapping
    #[error("The provided sort parameter isn't valid: '{expression}'")]
    InvalidSort { expression: String },

    /// Field list references a field the resource does not expose
    #[error("The provided data shaping fields aren't valid: '{expression}'")]
    InvalidFields { expression: String },

    /// Invalid JSON body
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },

    /// JSON Patch document could not be applied
    #[error("Invalid patch document: {message}")]
    InvalidPatch { message: String },

    /// Request references ids that do not exist
    #[error("{message}")]
    UnknownReferences { message: String, ids: Vec<String> },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

fn join_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::FieldErrors(_) => "VALIDATION_ERROR",
            ValidationError::InvalidSort { .. } => "INVALID_SORT",
            ValidationError::InvalidFields { .. } => "INVALID_FIELDS",
            ValidationError::InvalidJson { .. } => "INVALID_JSON",
            ValidationError::InvalidPatch { .. } => "INVALID_PATCH",
            ValidationError::UnknownReferences { .. } => "UNKNOWN_REFERENCES",
        }
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = Vec::new();
        collect_field_errors("", &errors, &mut fields);
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::FieldErrors(fields)
    }
}

/// Flatten nested validation errors into dotted field paths (`target.unit`)
fn collect_field_errors(
    prefix: &str,
    errors: &validator::ValidationErrors,
    out: &mut Vec<FieldValidationError>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| FieldValidationError {
                    field: path.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect_field_errors(&path, nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_field_errors(&format!("{path}[{index}]"), nested, out);
                }
            }
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.into())
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Configuration and wiring defects
///
/// These never stem from user input. At request time they surface as a
/// generic 500.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No sort mapping table registered for a (output, storage) type pair
    #[error("No sort mapping table registered for output '{output}' and storage '{storage}'")]
    MissingSortMapping { output: String, storage: String },

    /// Two mappings in one table share a sort field name
    #[error("Duplicate sort field '{field}' in mapping table for '{output}'")]
    DuplicateSortField { output: String, field: String },

    /// A sort mapping table was registered twice for the same type pair
    #[error("Sort mapping table for output '{output}' and storage '{storage}' registered twice")]
    DuplicateSortTable { output: String, storage: String },

    /// A named operation cannot be resolved in the route registry
    #[error("Could not generate link for operation '{operation}' in group '{group}'")]
    UnresolvedOperation { group: String, operation: String },

    /// An operation was registered twice in the same group
    #[error("Operation '{operation}' registered twice in group '{group}'")]
    DuplicateOperation { group: String, operation: String },

    /// A route template placeholder has no value in the parameter bag
    #[error("Missing route value '{parameter}' for operation '{operation}'")]
    MissingRouteValue {
        operation: String,
        parameter: String,
    },

    /// Request context cannot form a valid base URI
    #[error("Invalid base URI '{uri}': {message}")]
    InvalidBaseUri { uri: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", file_suffix(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" file '{f}'"))
        .unwrap_or_default()
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::MissingSortMapping { .. } => "SORT_MAPPING_MISSING",
            ConfigError::DuplicateSortField { .. } => "SORT_FIELD_DUPLICATE",
            ConfigError::DuplicateSortTable { .. } => "SORT_TABLE_DUPLICATE",
            ConfigError::UnresolvedOperation { .. } => "OPERATION_UNRESOLVED",
            ConfigError::DuplicateOperation { .. } => "OPERATION_DUPLICATE",
            ConfigError::MissingRouteValue { .. } => "ROUTE_VALUE_MISSING",
            ConfigError::InvalidBaseUri { .. } => "INVALID_BASE_URI",
            ConfigError::ParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors reported by the storage collaborator
#[derive(Debug, Error)]
pub enum StorageError {
    /// Query execution error
    #[error("{backend} query error: {message}")]
    QueryError { backend: String, message: String },

    /// Backend not available
    #[error("Storage backend '{backend}' is unavailable")]
    Unavailable { backend: String },
}

// =============================================================================
// Request Errors
// =============================================================================

/// Requests rejected before reaching handler logic
#[derive(Debug, Error)]
pub enum RequestError {
    /// Query string could not be deserialized
    #[error("Invalid query string: {message}")]
    InvalidQuery { message: String },

    /// Request body could not be read
    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },
}

impl RequestError {
    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidQuery { .. } => "INVALID_QUERY",
            RequestError::InvalidBody { .. } => "INVALID_BODY",
        }
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError {
            message: err.to_string(),
        }
    }
}

/// Storage services report `anyhow` errors; they surface as storage failures
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ApiError>() {
            Ok(api_err) => api_err,
            Err(err) => ApiError::Storage(StorageError::QueryError {
                backend: "storage".to_string(),
                message: format!("{err:#}"),
            }),
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_error_display() {
        let err = EntityError::not_found("habit", "h_123");
        assert!(err.to_string().contains("habit"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_entity_error_status_code() {
        assert_eq!(
            EntityError::not_found("habit", "h_1").status_code(),
            StatusCode::NOT_FOUND
        );
        let err = EntityError::AlreadyExists {
            entity_type: "tag".to_string(),
            message: "The tag 'x' already exists".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_invalid_sort_names_expression() {
        let err: ApiError = ValidationError::InvalidSort {
            expression: "bogus desc".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "INVALID_SORT");
        let problem = err.to_problem();
        assert!(problem.detail.contains("bogus desc"));
    }

    #[test]
    fn test_config_error_is_opaque_server_error() {
        let err: ApiError = ConfigError::MissingSortMapping {
            output: "HabitDto".to_string(),
            storage: "Habit".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let problem = err.to_problem();
        assert_eq!(problem.title, INTERNAL_ERROR_TITLE);
        assert!(!problem.detail.contains("HabitDto"));
        assert!(problem.errors.is_none());
    }

    #[test]
    fn test_field_errors_display_and_details() {
        let err = ApiError::Validation(ValidationError::FieldErrors(vec![
            FieldValidationError {
                field: "name".to_string(),
                message: "required".to_string(),
            },
            FieldValidationError {
                field: "description".to_string(),
                message: "too long".to_string(),
            },
        ]));
        let display = err.to_string();
        assert!(display.contains("name"));
        assert!(display.contains("description"));
        assert!(err.to_problem().errors.is_some());
    }

    #[test]
    fn test_anyhow_becomes_storage_error() {
        let err: ApiError = anyhow::anyhow!("lock poisoned").into();
        assert!(matches!(err, ApiError::Storage(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_anyhow_preserves_wrapped_api_error() {
        let inner: ApiError = EntityError::not_found("habit", "h_9").into();
        let err: ApiError = anyhow::Error::new(inner).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: ApiError = json_err.into();
        assert!(matches!(
            err,
            ApiError::Validation(ValidationError::InvalidJson { .. })
        ));
    }

    #[test]
    fn test_config_parse_error_mentions_file() {
        let err = ConfigError::ParseError {
            file: Some("devhabit.yaml".to_string()),
            message: "bad indent".to_string(),
        };
        assert!(err.to_string().contains("devhabit.yaml"));
    }
}
