//! Sparse fieldsets and record shaping
//!
//! Output types describe their fields once through [`Shapeable`]; the
//! resulting [`FieldMap`] is cached for the life of the process. Handlers
//! validate the raw `fields` parameter, select descriptors, and shape
//! records into [`ShapedRecord`]s, optionally carrying links.

pub mod field_map;
pub mod selector;
pub mod shaper;

pub use field_map::{FieldDescriptor, FieldMap, Shapeable};
pub use selector::{select_fields, validate_fields};
pub use shaper::{LINKS_KEY, ShapedRecord, shape, shape_many, shape_many_with_links};

use crate::core::error::{ApiResult, ValidationError};

/// Validate a fields expression and select its descriptors in one step
pub fn validated_fields<T: Shapeable>(expression: Option<&str>) -> ApiResult<Vec<FieldDescriptor<T>>> {
    if !validate_fields::<T>(expression) {
        return Err(ValidationError::InvalidFields {
            expression: expression.unwrap_or_default().to_string(),
        }
        .into());
    }
    Ok(select_fields::<T>(expression))
}
