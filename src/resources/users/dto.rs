use chrono::{DateTime, Utc};
use serde::Serialize;

use super::model::User;
use crate::shapeable;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: Option<DateTime<Utc>>,
}

shapeable!(UserDto {
    "id" => id,
    "email" => email,
    "name" => name,
    "createdAtUtc" => created_at_utc,
    "updatedAtUtc" => updated_at_utc,
});

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            created_at_utc: user.created_at_utc,
            updated_at_utc: user.updated_at_utc,
        }
    }
}
