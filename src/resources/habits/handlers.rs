//! HTTP handlers for the habits collection

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};

use super::descriptor::{
    CREATE_HABIT, DELETE_HABIT, GET_HABIT, GET_HABITS, HABITS_GROUP, PATCH_HABIT, UPDATE_HABIT,
};
use super::dto::{CreateHabitDto, HabitDto, HabitFilters, HabitWithTagsDto, UpdateHabitDto};
use super::model::Habit;
use super::patch::{PatchOperation, apply_patch};
use crate::core::error::{ApiResult, ConfigError, EntityError};
use crate::core::{
    ApiJson, ApiQuery, CollectionQuery, ItemQuery, PageEnvelope, RequestContext, StorageQuery,
    ValidatedJson,
};
use crate::links::{Link, LinkFactory, LinkParams};
use crate::resources::habit_tags::descriptor::{HABIT_TAGS_GROUP, UPSERT_HABIT_TAGS};
use crate::resources::{AppState, CollectionOperations, Stores, collection_links};
use crate::shaping::{self, FieldMap, ShapedRecord, shape, shape_many, shape_many_with_links};
use crate::sorting;

const COLLECTION: CollectionOperations = CollectionOperations {
    list: GET_HABITS,
    create: CREATE_HABIT,
};

/// Links describing what can be done with one habit
pub(crate) fn item_links(
    factory: &LinkFactory<'_>,
    id: &str,
    fields: Option<&str>,
) -> Result<Vec<Link>, ConfigError> {
    let by_id = LinkParams::new().with("id", id);
    Ok(vec![
        factory.create(
            GET_HABIT,
            "self",
            Method::GET,
            &by_id.clone().with_opt("fields", fields),
            None,
        )?,
        factory.create(UPDATE_HABIT, "update", Method::PUT, &by_id, None)?,
        factory.create(PATCH_HABIT, "partial-update", Method::PATCH, &by_id, None)?,
        factory.create(DELETE_HABIT, "delete", Method::DELETE, &by_id, None)?,
        factory.create(
            UPSERT_HABIT_TAGS,
            "upsert-tags",
            Method::PUT,
            &by_id,
            Some(HABIT_TAGS_GROUP),
        )?,
    ])
}

async fn find_habit(stores: &Stores, id: &str) -> ApiResult<Habit> {
    stores
        .habits
        .get(id)
        .await?
        .ok_or_else(|| EntityError::not_found("habit", id).into())
}

/// Names of the tags assigned to a habit, in assignment order
async fn tag_names(stores: &Stores, habit: &Habit) -> ApiResult<Vec<String>> {
    let mut names = Vec::with_capacity(habit.tags.len());
    for tag_id in habit.tag_ids() {
        if let Some(tag) = stores.tags.get(tag_id).await? {
            names.push(tag.name);
        }
    }
    Ok(names)
}

/// `GET /habits`
pub async fn get_habits(
    State(state): State<AppState>,
    request: RequestContext,
    ApiQuery(query): ApiQuery<CollectionQuery>,
    ApiQuery(filters): ApiQuery<HabitFilters>,
) -> ApiResult<Json<PageEnvelope<ShapedRecord>>> {
    let table = state.api.sort_table::<HabitDto, Habit>()?;
    let order_by = sorting::validated_clauses(table, query.sort.as_deref())?;
    let descriptors = shaping::validated_fields::<HabitDto>(query.fields.as_deref())?;

    let page = query.page();
    let page_size = query.page_size(&state.api.config.pagination);
    let storage_query = StorageQuery::new()
        .search(query.q.as_deref())
        .filter_opt("Type", filters.habit_type)
        .filter_opt("Status", filters.status)
        .order_by(order_by)
        .paginate(page, page_size);

    let result = state.stores.habits.query(&storage_query).await?;
    let dtos: Vec<HabitDto> = result.items.iter().map(HabitDto::from).collect();
    tracing::debug!(total = result.total_count, page, page_size, "listed habits");

    if !request.hypermedia {
        let items = shape_many(&dtos, &descriptors);
        return Ok(Json(PageEnvelope::new(items, page, page_size, result.total_count)));
    }

    let factory = state.api.link_factory(&request, HABITS_GROUP)?;
    let items = shape_many_with_links(&dtos, &descriptors, |dto| {
        item_links(&factory, &dto.id, query.fields.as_deref())
    })?;
    let envelope = PageEnvelope::new(items, page, page_size, result.total_count);
    let links = collection_links(&factory, &request, &COLLECTION, &envelope)?;
    Ok(Json(envelope.with_links(links)))
}

/// `GET /habits/{id}`
pub async fn get_habit(
    State(state): State<AppState>,
    request: RequestContext,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<ItemQuery>,
) -> ApiResult<Json<ShapedRecord>> {
    let descriptors = shaping::validated_fields::<HabitWithTagsDto>(query.fields.as_deref())?;

    let habit = find_habit(&state.stores, &id).await?;
    let tags = tag_names(&state.stores, &habit).await?;
    let shaped = shape(&HabitWithTagsDto::new(&habit, tags), &descriptors);

    if !request.hypermedia {
        return Ok(Json(shaped));
    }

    let factory = state.api.link_factory(&request, HABITS_GROUP)?;
    let links = item_links(&factory, &habit.id, query.fields.as_deref())?;
    Ok(Json(shaped.with_links(links)))
}

/// `POST /habits`
pub async fn create_habit(
    State(state): State<AppState>,
    request: RequestContext,
    ValidatedJson(payload): ValidatedJson<CreateHabitDto>,
) -> ApiResult<Response> {
    let habit = state.stores.habits.create(payload.into_habit()).await?;
    tracing::info!(habit_id = %habit.id, "habit created");

    let factory = state.api.link_factory(&request, HABITS_GROUP)?;
    let location = factory.create(
        GET_HABIT,
        "self",
        Method::GET,
        &LinkParams::new().with("id", &habit.id),
        None,
    )?;

    let mut shaped = shape(&HabitDto::from(&habit), FieldMap::<HabitDto>::of().descriptors());
    if request.hypermedia {
        shaped = shaped.with_links(item_links(&factory, &habit.id, None)?);
    }

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location.href)],
        Json(shaped),
    )
        .into_response())
}

/// `PUT /habits/{id}`
pub async fn update_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateHabitDto>,
) -> ApiResult<StatusCode> {
    let mut habit = find_habit(&state.stores, &id).await?;
    habit.apply_update(payload);
    state.stores.habits.update(&id, habit).await?;
    tracing::info!(habit_id = %id, "habit updated");
    Ok(StatusCode::NO_CONTENT)
}

/// `PATCH /habits/{id}`
pub async fn patch_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(operations): ApiJson<Vec<PatchOperation>>,
) -> ApiResult<StatusCode> {
    let mut habit = find_habit(&state.stores, &id).await?;
    apply_patch(&mut habit, &operations)?;
    state.stores.habits.update(&id, habit).await?;
    tracing::info!(habit_id = %id, operations = operations.len(), "habit patched");
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /habits/{id}`
pub async fn delete_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if !state.stores.habits.delete(&id).await? {
        return Err(EntityError::not_found("habit", id).into());
    }
    tracing::info!(habit_id = %id, "habit deleted");
    Ok(StatusCode::NO_CONTENT)
}
