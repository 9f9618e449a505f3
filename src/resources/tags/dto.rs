//! Tag request and response representations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::model::Tag;
use crate::resources::new_id;
use crate::shapeable;
use crate::sorting::SortMapping;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: Option<DateTime<Utc>>,
}

shapeable!(TagDto {
    "id" => id,
    "name" => name,
    "description" => description,
    "createdAtUtc" => created_at_utc,
    "updatedAtUtc" => updated_at_utc,
});

impl From<&Tag> for TagDto {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id.clone(),
            name: tag.name.clone(),
            description: tag.description.clone(),
            created_at_utc: tag.created_at_utc,
            updated_at_utc: tag.updated_at_utc,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTagDto {
    #[validate(length(min = 3, max = 50, message = "Name must be between 3 and 50 characters."))]
    pub name: String,
    #[validate(length(max = 200, message = "Description must not exceed 200 characters."))]
    pub description: Option<String>,
}

impl CreateTagDto {
    pub fn into_tag(self) -> Tag {
        Tag {
            id: new_id("t"),
            name: self.name,
            description: self.description,
            created_at_utc: Utc::now(),
            updated_at_utc: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTagDto {
    #[validate(length(min = 3, max = 50, message = "Name must be between 3 and 50 characters."))]
    pub name: String,
    #[validate(length(max = 200, message = "Description must not exceed 200 characters."))]
    pub description: Option<String>,
}

impl Tag {
    pub fn apply_update(&mut self, dto: UpdateTagDto) {
        self.name = dto.name;
        self.description = dto.description;
        self.updated_at_utc = Some(Utc::now());
    }
}

pub fn sort_mappings() -> Vec<SortMapping> {
    vec![
        SortMapping::new("name", "Name"),
        SortMapping::new("description", "Description"),
        SortMapping::new("createdAtUtc", "CreatedAtUtc"),
        SortMapping::new("updatedAtUtc", "UpdatedAtUtc"),
        SortMapping::reversed("age", "CreatedAtUtc"),
    ]
}
