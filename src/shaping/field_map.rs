//! Per-type field descriptors, built once and cached process-wide

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use serde::Serialize;
use serde_json::Value;

/// A named, readable field of an output record
pub struct FieldDescriptor<T> {
    pub name: &'static str,
    pub accessor: fn(&T) -> Value,
}

impl<T> FieldDescriptor<T> {
    pub const fn new(name: &'static str, accessor: fn(&T) -> Value) -> Self {
        Self { name, accessor }
    }

    /// Read this field from a record
    pub fn read(&self, record: &T) -> Value {
        (self.accessor)(record)
    }
}

impl<T> Clone for FieldDescriptor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldDescriptor<T> {}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Output records that can be shaped field by field
///
/// Implement with the [`shapeable!`](crate::shapeable) macro.
pub trait Shapeable: Send + Sync + 'static {
    /// Every addressable field, in output order
    fn field_descriptors() -> Vec<FieldDescriptor<Self>>
    where
        Self: Sized;
}

/// Serialize a field value, falling back to `null`
pub fn to_value<V: Serialize>(value: &V) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Implement [`Shapeable`] by listing public names and struct fields
///
/// ```rust,ignore
/// shapeable!(TagDto {
///     "id" => id,
///     "name" => name,
///     "createdAtUtc" => created_at_utc,
/// });
/// ```
#[macro_export]
macro_rules! shapeable {
    ($type:ty { $($name:literal => $field:ident),+ $(,)? }) => {
        impl $crate::shaping::Shapeable for $type {
            fn field_descriptors() -> Vec<$crate::shaping::FieldDescriptor<Self>> {
                vec![$(
                    $crate::shaping::FieldDescriptor::new($name, |record: &Self| {
                        $crate::shaping::field_map::to_value(&record.$field)
                    })
                ),+]
            }
        }
    };
}

/// The cached descriptor set of one output type
pub struct FieldMap<T> {
    descriptors: Vec<FieldDescriptor<T>>,
}

impl<T: Shapeable> FieldMap<T> {
    fn build() -> Self {
        let descriptors = T::field_descriptors();
        tracing::debug!(
            output = std::any::type_name::<T>(),
            fields = descriptors.len(),
            "built field map"
        );
        Self { descriptors }
    }

    /// Get the shared field map of `T`, building it on first access
    ///
    /// Concurrent first accesses converge on a single instance.
    pub fn of() -> Arc<Self> {
        static CACHE: LazyLock<DashMap<TypeId, Arc<dyn Any + Send + Sync>>> =
            LazyLock::new(DashMap::new);

        let entry = CACHE
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Arc::new(Self::build()))
            .clone();

        // Slots are keyed by `TypeId::of::<T>()` and only ever hold `FieldMap<T>`.
        match entry.downcast::<Self>() {
            Ok(map) => map,
            Err(_) => unreachable!("field map slot holds another type"),
        }
    }
}

impl<T> FieldMap<T> {
    pub fn descriptors(&self) -> &[FieldDescriptor<T>] {
        &self.descriptors
    }

    /// Case-insensitive lookup by field name
    pub fn find(&self, name: &str) -> Option<&FieldDescriptor<T>> {
        self.descriptors
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }
}
