//! Sort mapping tables and their process-wide registry

use std::any::{TypeId, type_name};
use std::collections::HashMap;

use crate::core::error::ConfigError;

/// Translates a public sort field into a storage field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortMapping {
    /// Externally visible field name, possibly dotted (`frequency.type`)
    pub sort_field: &'static str,
    /// Storage path the field sorts on
    pub storage_field: &'static str,
    /// Ascending on `storage_field` means descending intent on `sort_field`
    pub reverse: bool,
}

impl SortMapping {
    pub const fn new(sort_field: &'static str, storage_field: &'static str) -> Self {
        Self {
            sort_field,
            storage_field,
            reverse: false,
        }
    }

    pub const fn reversed(sort_field: &'static str, storage_field: &'static str) -> Self {
        Self {
            sort_field,
            storage_field,
            reverse: true,
        }
    }
}

/// Ordered mappings for one (output type, storage type) pair
#[derive(Debug, Clone, Default)]
pub struct SortMappingTable {
    mappings: Vec<SortMapping>,
}

impl SortMappingTable {
    /// Build a table, rejecting duplicate sort field names (case-insensitive)
    pub fn new(output: &str, mappings: Vec<SortMapping>) -> Result<Self, ConfigError> {
        for (index, mapping) in mappings.iter().enumerate() {
            let duplicate = mappings[..index]
                .iter()
                .any(|m| m.sort_field.eq_ignore_ascii_case(mapping.sort_field));
            if duplicate {
                return Err(ConfigError::DuplicateSortField {
                    output: output.to_string(),
                    field: mapping.sort_field.to_string(),
                });
            }
        }
        Ok(Self { mappings })
    }

    /// Case-insensitive lookup by public sort field name
    pub fn find(&self, sort_field: &str) -> Option<&SortMapping> {
        self.mappings
            .iter()
            .find(|m| m.sort_field.eq_ignore_ascii_case(sort_field))
    }

    pub fn mappings(&self) -> &[SortMapping] {
        &self.mappings
    }
}

/// Registry of sort mapping tables keyed by (output type, storage type)
///
/// Populated once at startup, then frozen behind an `Arc` and only read.
#[derive(Debug, Default)]
pub struct SortMappingRegistry {
    tables: HashMap<(TypeId, TypeId), SortMappingTable>,
}

impl SortMappingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the table for an (output, storage) pair
    pub fn register<O: 'static, S: 'static>(
        &mut self,
        mappings: Vec<SortMapping>,
    ) -> Result<(), ConfigError> {
        let key = (TypeId::of::<O>(), TypeId::of::<S>());
        if self.tables.contains_key(&key) {
            return Err(ConfigError::DuplicateSortTable {
                output: type_name::<O>().to_string(),
                storage: type_name::<S>().to_string(),
            });
        }

        let table = SortMappingTable::new(type_name::<O>(), mappings)?;
        tracing::debug!(
            output = type_name::<O>(),
            storage = type_name::<S>(),
            mappings = table.mappings().len(),
            "registered sort mapping table"
        );
        self.tables.insert(key, table);
        Ok(())
    }

    /// Look up the table for an (output, storage) pair
    ///
    /// A missing table is a wiring defect, never a client error.
    pub fn table<O: 'static, S: 'static>(&self) -> Result<&SortMappingTable, ConfigError> {
        self.tables
            .get(&(TypeId::of::<O>(), TypeId::of::<S>()))
            .ok_or_else(|| ConfigError::MissingSortMapping {
                output: type_name::<O>().to_string(),
                storage: type_name::<S>().to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
