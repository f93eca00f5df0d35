//! Membership handlers, nested under the community group routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};

use crate::api::state::AppState;
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// Create membership routes
pub fn membership_routes() -> Router<AppState> {
    Router::new().route(
        "/:id/members/:user_id",
        post(add_member).delete(remove_member),
    )
}

/// Enroll a user in a community group
#[utoipa::path(
    post,
    path = "/communities/{id}/members/{user_id}",
    tag = "Membership",
    params(
        ("id" = i32, Path, description = "Community group ID"),
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 201, description = "User enrolled", body = MessageResponse),
        (status = 404, description = "User or group not found"),
        (status = 409, description = "User already a member")
    )
)]
pub async fn add_member(
    State(state): State<AppState>,
    Path((community_id, user_id)): Path<(i32, i32)>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state
        .membership_service
        .add_member(user_id, community_id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "User added to community group successfully",
        )),
    ))
}

/// Withdraw a user from a community group
#[utoipa::path(
    delete,
    path = "/communities/{id}/members/{user_id}",
    tag = "Membership",
    params(
        ("id" = i32, Path, description = "Community group ID"),
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User withdrawn", body = MessageResponse),
        (status = 404, description = "User, group, or membership not found")
    )
)]
pub async fn remove_member(
    State(state): State<AppState>,
    Path((community_id, user_id)): Path<(i32, i32)>,
) -> AppResult<Json<MessageResponse>> {
    state
        .membership_service
        .remove_member(user_id, community_id)
        .await?;
    Ok(Json(MessageResponse::new(
        "User removed from community group successfully",
    )))
}
