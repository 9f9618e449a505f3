//! HTTP handlers for habit tag assignments

use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;

use super::dto::UpsertHabitTagsDto;
use crate::core::ApiJson;
use crate::core::error::{ApiResult, EntityError, ValidationError};
use crate::resources::AppState;

/// `PUT /habits/{id}/tags`
///
/// Answers 204 when the habit already carries exactly the requested tags and
/// 200 after replacing its assignments.
pub async fn upsert_habit_tags(
    State(state): State<AppState>,
    Path(habit_id): Path<String>,
    ApiJson(payload): ApiJson<UpsertHabitTagsDto>,
) -> ApiResult<StatusCode> {
    let mut habit = state
        .stores
        .habits
        .get(&habit_id)
        .await?
        .ok_or_else(|| EntityError::not_found("habit", habit_id.as_str()))?;

    let requested = payload.distinct_ids();
    if habit.has_exact_tags(&requested) {
        return Ok(StatusCode::NO_CONTENT);
    }

    let mut unknown = Vec::new();
    for id in &requested {
        if state.stores.tags.get(id).await?.is_none() {
            unknown.push(id.clone());
        }
    }
    if !unknown.is_empty() {
        return Err(ValidationError::UnknownReferences {
            message: "One or more tag IDs is invalid".to_string(),
            ids: unknown,
        }
        .into());
    }

    habit.replace_tags(&requested, Utc::now());
    state.stores.habits.update(&habit_id, habit).await?;
    tracing::info!(habit_id = %habit_id, tags = requested.len(), "habit tags replaced");
    Ok(StatusCode::OK)
}

/// `DELETE /habits/{id}/tags/{tagId}`
pub async fn delete_habit_tag(
    State(state): State<AppState>,
    Path((habit_id, tag_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let mut habit = state
        .stores
        .habits
        .get(&habit_id)
        .await?
        .ok_or_else(|| EntityError::not_found("habit", habit_id.as_str()))?;

    if !habit.remove_tag(&tag_id) {
        return Err(EntityError::not_found("habit tag", tag_id).into());
    }

    state.stores.habits.update(&habit_id, habit).await?;
    tracing::info!(habit_id = %habit_id, tag_id = %tag_id, "habit tag removed");
    Ok(StatusCode::NO_CONTENT)
}
