//! Core module containing fundamental traits and types

pub mod entity;
pub mod error;
pub mod extractors;
pub mod field;
pub mod module;
pub mod query;
pub mod service;
pub mod store;

pub use entity::Entity;
pub use error::{ApiError, ApiResult};
pub use extractors::{ApiJson, ApiQuery, RequestContext, ValidatedJson};
pub use field::FieldValue;
pub use module::Module;
pub use query::{CollectionQuery, ItemQuery, PageEnvelope};
pub use service::DataService;
pub use store::{PagedResult, StorageQuery};
