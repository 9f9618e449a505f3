use axum::Json;
use axum::extract::{Path, State};
use axum::http::Method;

use super::descriptor::{GET_USER, USERS_GROUP};
use super::dto::UserDto;
use crate::core::error::{ApiResult, EntityError};
use crate::core::{ApiQuery, ItemQuery, RequestContext};
use crate::links::LinkParams;
use crate::resources::AppState;
use crate::shaping::{self, ShapedRecord, shape};

/// `GET /users/{id}`
pub async fn get_user(
    State(state): State<AppState>,
    request: RequestContext,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<ItemQuery>,
) -> ApiResult<Json<ShapedRecord>> {
    let descriptors = shaping::validated_fields::<UserDto>(query.fields.as_deref())?;
    let user = state
        .stores
        .users
        .get(&id)
        .await?
        .ok_or_else(|| EntityError::not_found("user", id.as_str()))?;

    let shaped = shape(&UserDto::from(&user), &descriptors);
    if !request.hypermedia {
        return Ok(Json(shaped));
    }

    let factory = state.api.link_factory(&request, USERS_GROUP)?;
    let params = LinkParams::new()
        .with("id", &user.id)
        .with_opt("fields", query.fields.as_deref());
    let link = factory.create(GET_USER, "self", Method::GET, &params, None)?;
    Ok(Json(shaped.with_links(vec![link])))
}
