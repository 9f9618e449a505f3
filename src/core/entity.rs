//! Entity trait defining how storage records expose themselves to queries

use crate::core::field::FieldValue;

/// Base trait for every record held by the storage layer.
///
/// The storage collaborator knows nothing about concrete resource types.
/// Entities make themselves queryable by resolving storage field paths
/// (dotted for nested groups, e.g. `Frequency.Type`) to comparable values.
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g., "habits", "tags")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "habit", "tag")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> &str;

    /// Get the value stored at a field path
    ///
    /// Paths are matched case-insensitively. Returns `None` for unknown paths.
    fn field_value(&self, path: &str) -> Option<FieldValue>;

    /// Storage paths scanned by free-text search
    fn searchable_fields() -> &'static [&'static str] {
        &[]
    }

    /// Whether any searchable field contains the term (case-insensitive)
    fn matches_search(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        Self::searchable_fields().iter().any(|path| {
            self.field_value(path)
                .is_some_and(|value| value.contains_ignore_case(&needle))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct TestEntity {
        id: String,
        name: String,
        notes: Option<String>,
    }

    impl Entity for TestEntity {
        fn resource_name() -> &'static str {
            "test_entities"
        }

        fn resource_name_singular() -> &'static str {
            "test_entity"
        }

        fn id(&self) -> &str {
            &self.id
        }

        fn field_value(&self, path: &str) -> Option<FieldValue> {
            match path.to_ascii_lowercase().as_str() {
                "id" => Some(self.id.clone().into()),
                "name" => Some(self.name.clone().into()),
                "notes" => Some(self.notes.clone().into()),
                _ => None,
            }
        }

        fn searchable_fields() -> &'static [&'static str] {
            &["Name", "Notes"]
        }
    }

    #[test]
    fn test_entity_metadata() {
        assert_eq!(TestEntity::resource_name(), "test_entities");
        assert_eq!(TestEntity::resource_name_singular(), "test_entity");
    }

    #[test]
    fn test_matches_search_across_fields() {
        let entity = TestEntity {
            id: "x_1".to_string(),
            name: "Evening Walk".to_string(),
            notes: Some("with the dog".to_string()),
        };
        assert!(entity.matches_search("walk"));
        assert!(entity.matches_search("DOG"));
        assert!(!entity.matches_search("swim"));
    }

    #[test]
    fn test_matches_search_skips_null_fields() {
        let entity = TestEntity {
            id: "x_2".to_string(),
            name: "Read".to_string(),
            notes: None,
        };
        assert!(!entity.matches_search("dog"));
    }
}
