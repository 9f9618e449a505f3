//! Shaping typed records into ordered key/value documents

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::field_map::{FieldDescriptor, to_value};
use crate::links::Link;

/// Key under which hypermedia links are injected
pub const LINKS_KEY: &str = "links";

/// An ordered, field-filtered representation of a record
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ShapedRecord(IndexMap<String, Value>);

impl ShapedRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_links(&self) -> bool {
        self.0.contains_key(LINKS_KEY)
    }

    /// Attach links as the last entry
    pub fn with_links(mut self, links: Vec<Link>) -> Self {
        self.0.shift_remove(LINKS_KEY);
        self.0.insert(LINKS_KEY.to_string(), to_value(&links));
        self
    }
}

/// Shape one record, preserving descriptor order
pub fn shape<T>(record: &T, descriptors: &[FieldDescriptor<T>]) -> ShapedRecord {
    ShapedRecord(
        descriptors
            .iter()
            .map(|d| (d.name.to_string(), d.read(record)))
            .collect(),
    )
}

/// Shape every record without links
pub fn shape_many<T>(records: &[T], descriptors: &[FieldDescriptor<T>]) -> Vec<ShapedRecord> {
    records.iter().map(|r| shape(r, descriptors)).collect()
}

/// Shape every record and attach the links produced for it
///
/// `links_for` receives the original record, so it can read fields that
/// field selection excluded from the output.
pub fn shape_many_with_links<T, E, F>(
    records: &[T],
    descriptors: &[FieldDescriptor<T>],
    mut links_for: F,
) -> Result<Vec<ShapedRecord>, E>
where
    F: FnMut(&T) -> Result<Vec<Link>, E>,
{
    records
        .iter()
        .map(|record| Ok(shape(record, descriptors).with_links(links_for(record)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shaping::select_fields;

    #[derive(Debug, Clone, Serialize)]
    struct Item {
        id: String,
        name: String,
        status: i32,
    }

    crate::shapeable!(Item {
        "id" => id,
        "name" => name,
        "status" => status,
    });

    fn items() -> Vec<Item> {
        vec![
            Item {
                id: "i_1".into(),
                name: "Run".into(),
                status: 1,
            },
            Item {
                id: "i_2".into(),
                name: "Read".into(),
                status: 2,
            },
        ]
    }

    fn self_link(item: &Item) -> Result<Vec<Link>, std::convert::Infallible> {
        Ok(vec![Link::new(format!("/items/{}", item.id), "self", "GET")])
    }

    #[test]
    fn test_shape_selected_fields_only() {
        let record = shape(&items()[0], &select_fields::<Item>(Some("status,id")));
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["id", "status"]);
        assert_eq!(record.get("status"), Some(&Value::from(1)));
    }

    #[test]
    fn test_shape_many_without_links() {
        let shaped = shape_many(&items(), &select_fields::<Item>(None));
        assert_eq!(shaped.len(), 2);
        assert!(shaped.iter().all(|r| !r.has_links()));
    }

    #[test]
    fn test_links_callback_sees_excluded_fields() {
        let shaped =
            shape_many_with_links(&items(), &select_fields::<Item>(Some("name")), self_link)
                .unwrap();

        assert!(shaped.iter().all(ShapedRecord::has_links));
        assert_eq!(shaped[0].keys().collect::<Vec<_>>(), vec!["name", "links"]);
        assert_eq!(
            shaped[1].get("links").unwrap()[0]["href"],
            Value::from("/items/i_2")
        );
    }

    #[test]
    fn test_links_callback_error_propagates() {
        let result: Result<Vec<ShapedRecord>, &str> =
            shape_many_with_links(&items(), &select_fields::<Item>(None), |_| Err("boom"));
        assert_eq!(result.unwrap_err(), "boom");
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let record = shape(&items()[1], &select_fields::<Item>(Some("id,name")));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"id":"i_2","name":"Read"}"#);
    }
}
