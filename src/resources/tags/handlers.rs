//! HTTP handlers for the tags collection

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};

use super::descriptor::{CREATE_TAG, DELETE_TAG, GET_TAG, GET_TAGS, TAGS_GROUP, UPDATE_TAG};
use super::dto::{CreateTagDto, TagDto, UpdateTagDto};
use super::model::Tag;
use crate::core::error::{ApiError, ApiResult, ConfigError, EntityError};
use crate::core::{
    ApiQuery, CollectionQuery, ItemQuery, PageEnvelope, RequestContext, StorageQuery,
    ValidatedJson,
};
use crate::links::{Link, LinkFactory, LinkParams};
use crate::resources::{AppState, CollectionOperations, Stores, collection_links};
use crate::shaping::{self, FieldMap, ShapedRecord, shape, shape_many, shape_many_with_links};
use crate::sorting;

const COLLECTION: CollectionOperations = CollectionOperations {
    list: GET_TAGS,
    create: CREATE_TAG,
};

fn item_links(
    factory: &LinkFactory<'_>,
    id: &str,
    fields: Option<&str>,
) -> Result<Vec<Link>, ConfigError> {
    let by_id = LinkParams::new().with("id", id);
    Ok(vec![
        factory.create(
            GET_TAG,
            "self",
            Method::GET,
            &by_id.clone().with_opt("fields", fields),
            None,
        )?,
        factory.create(UPDATE_TAG, "update", Method::PUT, &by_id, None)?,
        factory.create(DELETE_TAG, "delete", Method::DELETE, &by_id, None)?,
    ])
}

async fn find_tag(stores: &Stores, id: &str) -> ApiResult<Tag> {
    stores
        .tags
        .get(id)
        .await?
        .ok_or_else(|| EntityError::not_found("tag", id).into())
}

fn same_name(name: &str) -> StorageQuery {
    StorageQuery::new().filter("Name", name)
}

fn name_taken(name: &str) -> ApiError {
    EntityError::AlreadyExists {
        entity_type: "tag".to_string(),
        message: format!("The tag '{name}' already exists"),
    }
    .into()
}

/// `GET /tags`
pub async fn get_tags(
    State(state): State<AppState>,
    request: RequestContext,
    ApiQuery(query): ApiQuery<CollectionQuery>,
) -> ApiResult<Json<PageEnvelope<ShapedRecord>>> {
    let table = state.api.sort_table::<TagDto, Tag>()?;
    let order_by = sorting::validated_clauses(table, query.sort.as_deref())?;
    let descriptors = shaping::validated_fields::<TagDto>(query.fields.as_deref())?;

    let page = query.page();
    let page_size = query.page_size(&state.api.config.pagination);
    let storage_query = StorageQuery::new()
        .search(query.q.as_deref())
        .order_by(order_by)
        .paginate(page, page_size);

    let result = state.stores.tags.query(&storage_query).await?;
    let dtos: Vec<TagDto> = result.items.iter().map(TagDto::from).collect();

    if !request.hypermedia {
        let items = shape_many(&dtos, &descriptors);
        return Ok(Json(PageEnvelope::new(items, page, page_size, result.total_count)));
    }

    let factory = state.api.link_factory(&request, TAGS_GROUP)?;
    let items = shape_many_with_links(&dtos, &descriptors, |dto| {
        item_links(&factory, &dto.id, query.fields.as_deref())
    })?;
    let envelope = PageEnvelope::new(items, page, page_size, result.total_count);
    let links = collection_links(&factory, &request, &COLLECTION, &envelope)?;
    Ok(Json(envelope.with_links(links)))
}

/// `GET /tags/{id}`
pub async fn get_tag(
    State(state): State<AppState>,
    request: RequestContext,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<ItemQuery>,
) -> ApiResult<Json<ShapedRecord>> {
    let descriptors = shaping::validated_fields::<TagDto>(query.fields.as_deref())?;
    let tag = find_tag(&state.stores, &id).await?;
    let shaped = shape(&TagDto::from(&tag), &descriptors);

    if !request.hypermedia {
        return Ok(Json(shaped));
    }

    let factory = state.api.link_factory(&request, TAGS_GROUP)?;
    let links = item_links(&factory, &tag.id, query.fields.as_deref())?;
    Ok(Json(shaped.with_links(links)))
}

/// `POST /tags`
pub async fn create_tag(
    State(state): State<AppState>,
    request: RequestContext,
    ValidatedJson(payload): ValidatedJson<CreateTagDto>,
) -> ApiResult<Response> {
    let name = payload.name.clone();
    let tag = state
        .stores
        .tags
        .create_unless(payload.into_tag(), &same_name(&name))
        .await?
        .ok_or_else(|| name_taken(&name))?;
    tracing::info!(tag_id = %tag.id, name = %tag.name, "tag created");

    let factory = state.api.link_factory(&request, TAGS_GROUP)?;
    let location = factory.create(
        GET_TAG,
        "self",
        Method::GET,
        &LinkParams::new().with("id", &tag.id),
        None,
    )?;

    let mut shaped = shape(&TagDto::from(&tag), FieldMap::<TagDto>::of().descriptors());
    if request.hypermedia {
        shaped = shaped.with_links(item_links(&factory, &tag.id, None)?);
    }

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location.href)],
        Json(shaped),
    )
        .into_response())
}

/// `PUT /tags/{id}`
pub async fn update_tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateTagDto>,
) -> ApiResult<StatusCode> {
    let mut tag = find_tag(&state.stores, &id).await?;
    let name = payload.name.clone();

    tag.apply_update(payload);
    state
        .stores
        .tags
        .update_unless(&id, tag, &same_name(&name))
        .await?
        .ok_or_else(|| name_taken(&name))?;
    tracing::info!(tag_id = %id, "tag updated");
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /tags/{id}`
///
/// Assignments of the tag are removed from every habit carrying it.
pub async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if !state.stores.tags.delete(&id).await? {
        return Err(EntityError::not_found("tag", id).into());
    }

    let habits = state.stores.habits.query(&StorageQuery::new()).await?;
    let mut detached = 0usize;
    for mut habit in habits.items.into_iter().filter(|h| h.has_tag(&id)) {
        habit.remove_tag(&id);
        let habit_id = habit.id.clone();
        state.stores.habits.update(&habit_id, habit).await?;
        detached += 1;
    }

    tracing::info!(tag_id = %id, detached, "tag deleted");
    Ok(StatusCode::NO_CONTENT)
}
