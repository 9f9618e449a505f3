//! Tag storage record

use chrono::{DateTime, Utc};

use crate::core::{Entity, FieldValue};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: Option<DateTime<Utc>>,
}

impl Entity for Tag {
    fn resource_name() -> &'static str {
        "tags"
    }

    fn resource_name_singular() -> &'static str {
        "tag"
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, path: &str) -> Option<FieldValue> {
        let value: FieldValue = match path.to_ascii_lowercase().as_str() {
            "id" => self.id.clone().into(),
            "name" => self.name.clone().into(),
            "description" => self.description.clone().into(),
            "createdatutc" => self.created_at_utc.into(),
            "updatedatutc" => self.updated_at_utc.into(),
            _ => return None,
        };
        Some(value)
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["Name", "Description"]
    }
}
