//! Resource directory handlers.

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
use crate::domain::{NewResource, Resource, ResourceType};
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// Create resource routes
pub fn resource_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_resources).post(create_resource))
        .route("/nearest", get(closest_resource))
        .route(
            "/:id",
            get(get_resource)
                .patch(update_resource)
                .delete(delete_resource),
        )
}

/// List resources, optionally filtered by category
#[utoipa::path(
    get,
    path = "/resources",
    tag = "Resources",
    params(TypeQuery),
    responses(
        (status = 200, description = "Matching resources", body = Vec<Resource>),
        (status = 400, description = "Unknown category"),
        (status = 404, description = "No resources serve the category")
    )
)]
pub async fn list_resources(
    State(state): State<AppState>,
    Query(query): Query<TypeQuery>,
) -> AppResult<Json<Vec<Resource>>> {
    let resources = match query.category.as_deref() {
        Some(raw) => {
            let resource_type: ResourceType = raw.parse()?;
            state.resource_service.list_by_type(resource_type).await?
        }
        None => state.resource_service.list_resources().await?,
    };
    Ok(Json(resources))
}

/// The resource of a category nearest to a reference point
#[utoipa::path(
    get,
    path = "/resources/nearest",
    tag = "Resources",
    params(NearestQuery),
    responses(
        (status = 200, description = "The closest matching resource", body = Resource),
        (status = 400, description = "Unknown category"),
        (status = 404, description = "No resources serve the category")
    )
)]
pub async fn closest_resource(
    State(state): State<AppState>,
    Query(query): Query<NearestQuery>,
) -> AppResult<Json<Resource>> {
    let resource_type: ResourceType = query.category.parse()?;
    let resource = state
        .resource_service
        .closest_resource(resource_type, query.latitude, query.longitude)
        .await?;
    Ok(Json(resource))
}

/// Get a resource, or one of its attributes
#[utoipa::path(
    get,
    path = "/resources/{id}",
    tag = "Resources",
    params(
        ("id" = i32, Path, description = "Resource ID"),
        AttributeQuery
    ),
    responses(
        (status = 200, description = "The resource, or the selected attribute value"),
        (status = 404, description = "Resource or attribute not found")
    )
)]
pub async fn get_resource(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<AttributeQuery>,
) -> AppResult<Json<Value>> {
    let value = match query.attribute.as_deref() {
        Some(attribute) => state.resource_service.read_attribute(id, attribute).await?,
        None => to_value(state.resource_service.get_resource(id).await?)?,
    };
    Ok(Json(value))
}

/// Create a new resource
#[utoipa::path(
    post,
    path = "/resources",
    tag = "Resources",
    request_body = NewResource,
    responses(
        (status = 201, description = "Resource created", body = Resource),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_resource(
    State(state): State<AppState>,
    Json(payload): Json<NewResource>,
) -> AppResult<(StatusCode, Json<Resource>)> {
    let resource = state.resource_service.create_resource(payload).await?;
    Ok((StatusCode::CREATED, Json(resource)))
}

/// Update one attribute of a resource
#[utoipa::path(
    patch,
    path = "/resources/{id}",
    tag = "Resources",
    params(
        ("id" = i32, Path, description = "Resource ID")
    ),
    request_body = UpdateAttributeRequest,
    responses(
        (status = 200, description = "Resource updated", body = Resource),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Resource or attribute not found")
    )
)]
pub async fn update_resource(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAttributeRequest>,
) -> AppResult<Json<Resource>> {
    let resource = state
        .resource_service
        .update_attribute(id, &payload.attribute, &payload.value)
        .await?;
    Ok(Json(resource))
}

/// Delete a resource
#[utoipa::path(
    delete,
    path = "/resources/{id}",
    tag = "Resources",
    params(
        ("id" = i32, Path, description = "Resource ID")
    ),
    responses(
        (status = 200, description = "Resource deleted", body = MessageResponse),
        (status = 404, description = "Resource not found")
    )
)]
pub async fn delete_resource(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.resource_service.delete_resource(id).await?;
    Ok(Json(MessageResponse::new("Resource Deleted Successfully")))
}
