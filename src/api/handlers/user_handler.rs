//! User directory handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::Value;

use super::{to_value, AttributeQuery, UpdateAttributeRequest};
use crate::api::state::AppState;
use crate::domain::{NewUser, User};
use crate::errors::{AppError, AppResult, EntityKind};
use crate::types::MessageResponse;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).patch(update_user).delete(delete_user))
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "List of all users", body = Vec<User>),
        (status = 404, description = "The directory has no users")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = state.user_service.list_users().await?;
    if users.is_empty() {
        return Err(AppError::NoneFound(EntityKind::User));
    }
    Ok(Json(users))
}

/// Get a user, or one of its attributes
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID"),
        AttributeQuery
    ),
    responses(
        (status = 200, description = "The user, or the selected attribute value"),
        (status = 404, description = "User or attribute not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<AttributeQuery>,
) -> AppResult<Json<Value>> {
    let value = match query.attribute.as_deref() {
        Some(attribute) => state.user_service.read_attribute(id, attribute).await?,
        None => to_value(state.user_service.get_user(id).await?)?,
    };
    Ok(Json(value))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = NewUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = state.user_service.create_user(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Update one attribute of a user
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateAttributeRequest,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User or attribute not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAttributeRequest>,
) -> AppResult<Json<User>> {
    let user = state
        .user_service
        .update_attribute(id, &payload.attribute, &payload.value)
        .await?;
    Ok(Json(user))
}

/// Delete a user and their memberships
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.user_service.delete_user(id).await?;
    Ok(Json(MessageResponse::new("User Deleted Successfully")))
}
