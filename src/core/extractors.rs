//! Axum extractors shared by every resource handler
//!
//! - [`RequestContext`]: scheme, host, query pairs and the hypermedia switch
//! - [`ApiQuery`]: query string deserialization with problem-style rejections
//! - [`ApiJson`]: JSON bodies with problem-style rejections
//! - [`ValidatedJson`]: JSON bodies checked with `validator` before the handler runs

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::core::error::{ApiError, RequestError, ValidationError};
use crate::links::HATEOAS_MEDIA_TYPE;

const FORWARDED_PROTO: &str = "x-forwarded-proto";
const FORWARDED_HOST: &str = "x-forwarded-host";

/// What handlers need to know about the inbound request to build links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub scheme: String,
    pub host: String,
    /// Decoded query pairs in request order
    pub query: Vec<(String, String)>,
    /// Whether the client asked for the hypermedia representation
    pub hypermedia: bool,
}

impl RequestContext {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            query: Vec::new(),
            hypermedia: false,
        }
    }

    pub fn with_query(mut self, raw: &str) -> Self {
        self.query = url::form_urlencoded::parse(raw.as_bytes())
            .into_owned()
            .collect();
        self
    }

    pub fn with_hypermedia(mut self, hypermedia: bool) -> Self {
        self.hypermedia = hypermedia;
        self
    }

    /// Build the context from request parts
    pub fn from_parts(parts: &Parts) -> Self {
        let headers = &parts.headers;
        let scheme = header_str(headers, FORWARDED_PROTO)
            .or_else(|| parts.uri.scheme_str())
            .unwrap_or("http");
        let host = header_str(headers, FORWARDED_HOST)
            .or_else(|| header_str(headers, header::HOST.as_str()))
            .or_else(|| parts.uri.authority().map(|a| a.as_str()))
            .unwrap_or("localhost");

        Self::new(scheme, host)
            .with_query(parts.uri.query().unwrap_or_default())
            .with_hypermedia(accepts_hypermedia(headers))
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Whether any Accept entry names the hypermedia media type
pub fn accepts_hypermedia(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|entry| entry.split(';').next())
        .any(|media| media.trim().eq_ignore_ascii_case(HATEOAS_MEDIA_TYPE))
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

/// Query string extractor whose rejection is an [`ApiError`]
#[derive(Debug, Clone, Default)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| RequestError::InvalidQuery {
                message: rejection.body_text(),
            })?;
        Ok(Self(value))
    }
}

/// JSON body extractor whose rejection is an [`ApiError`]
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ValidationError::InvalidJson {
                message: rejection.body_text(),
            })?;
        Ok(Self(value))
    }
}

/// JSON body extractor that runs `validator` rules
///
/// Malformed JSON and rule violations both surface as 400 problems.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let ApiJson(value) = ApiJson::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}
