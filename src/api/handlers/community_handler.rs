//! Community group directory handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::Value;

use super::{to_value, AttributeQuery, NearestQuery, TypeQuery, UpdateAttributeRequest};
use crate::api::state::AppState;
use crate::domain::{CommunityGroup, CommunityType, NewCommunityGroup};
use crate::errors::{AppError, AppResult, EntityKind};
use crate::types::MessageResponse;

/// Create community group routes
pub fn community_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_communities).post(create_community))
        .route("/nearest", get(closest_community))
        .route(
            "/:id",
            get(get_community)
                .patch(update_community)
                .delete(delete_community),
        )
}

/// List community groups, optionally filtered by category
#[utoipa::path(
    get,
    path = "/communities",
    tag = "Communities",
    params(TypeQuery),
    responses(
        (status = 200, description = "Matching community groups", body = Vec<CommunityGroup>),
        (status = 400, description = "Unknown category"),
        (status = 404, description = "No groups exist, or none serve the category")
    )
)]
pub async fn list_communities(
    State(state): State<AppState>,
    Query(query): Query<TypeQuery>,
) -> AppResult<Json<Vec<CommunityGroup>>> {
    let groups = match query.category.as_deref() {
        Some(raw) => {
            let community_type: CommunityType = raw.parse()?;
            state.community_service.list_by_type(community_type).await?
        }
        None => {
            let groups = state.community_service.list_communities().await?;
            if groups.is_empty() {
                return Err(AppError::NoneFound(EntityKind::CommunityGroup));
            }
            groups
        }
    };
    Ok(Json(groups))
}

/// The community group of a category nearest to a reference point
#[utoipa::path(
    get,
    path = "/communities/nearest",
    tag = "Communities",
    params(NearestQuery),
    responses(
        (status = 200, description = "The closest matching group", body = CommunityGroup),
        (status = 400, description = "Unknown category"),
        (status = 404, description = "No groups serve the category")
    )
)]
pub async fn closest_community(
    State(state): State<AppState>,
    Query(query): Query<NearestQuery>,
) -> AppResult<Json<CommunityGroup>> {
    let community_type: CommunityType = query.category.parse()?;
    let group = state
        .community_service
        .closest_community(community_type, query.latitude, query.longitude)
        .await?;
    Ok(Json(group))
}

/// Get a community group, or one of its attributes
#[utoipa::path(
    get,
    path = "/communities/{id}",
    tag = "Communities",
    params(
        ("id" = i32, Path, description = "Community group ID"),
        AttributeQuery
    ),
    responses(
        (status = 200, description = "The group, or the selected attribute value"),
        (status = 404, description = "Group or attribute not found")
    )
)]
pub async fn get_community(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<AttributeQuery>,
) -> AppResult<Json<Value>> {
    let value = match query.attribute.as_deref() {
        Some(attribute) => {
            state
                .community_service
                .read_attribute(id, attribute)
                .await?
        }
        None => to_value(state.community_service.get_community(id).await?)?,
    };
    Ok(Json(value))
}

/// Create a new community group
#[utoipa::path(
    post,
    path = "/communities",
    tag = "Communities",
    request_body = NewCommunityGroup,
    responses(
        (status = 201, description = "Community group created", body = CommunityGroup),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_community(
    State(state): State<AppState>,
    Json(payload): Json<NewCommunityGroup>,
) -> AppResult<(StatusCode, Json<CommunityGroup>)> {
    let group = state.community_service.create_community(payload).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

/// Update one attribute of a community group
#[utoipa::path(
    patch,
    path = "/communities/{id}",
    tag = "Communities",
    params(
        ("id" = i32, Path, description = "Community group ID")
    ),
    request_body = UpdateAttributeRequest,
    responses(
        (status = 200, description = "Community group updated", body = CommunityGroup),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Group or attribute not found")
    )
)]
pub async fn update_community(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAttributeRequest>,
) -> AppResult<Json<CommunityGroup>> {
    let group = state
        .community_service
        .update_attribute(id, &payload.attribute, &payload.value)
        .await?;
    Ok(Json(group))
}

/// Delete a community group and its membership records
#[utoipa::path(
    delete,
    path = "/communities/{id}",
    tag = "Communities",
    params(
        ("id" = i32, Path, description = "Community group ID")
    ),
    responses(
        (status = 200, description = "Community group deleted", body = MessageResponse),
        (status = 404, description = "Group not found")
    )
)]
pub async fn delete_community(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.community_service.delete_community(id).await?;
    Ok(Json(MessageResponse::new(
        "Community Group Deleted Successfully",
    )))
}
