//! HTTP request handlers.
//!
//! Handlers translate HTTP requests into service calls. The three entity
//! surfaces share the attribute-selector query and the attribute-update
//! body; each handler module owns its own routes.

pub mod community_handler;
pub mod membership_handler;
pub mod resource_handler;
pub mod user_handler;

pub use community_handler::community_routes;
pub use membership_handler::membership_routes;
pub use resource_handler::resource_routes;
pub use user_handler::user_routes;

use serde::Deserialize;
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::errors::{AppError, AppResult};

/// Optional single-attribute selector for entity reads.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttributeQuery {
    /// Attribute name (case-insensitive); omit for the whole entity
    pub attribute: Option<String>,
}

/// Optional service-category filter for entity listings.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TypeQuery {
    /// Service category; omit for the full listing
    #[serde(rename = "type")]
    #[param(rename = "type")]
    pub category: Option<String>,
}

/// Reference point and category for proximity searches.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NearestQuery {
    /// Service category to search within
    #[serde(rename = "type")]
    #[param(rename = "type")]
    pub category: String,
    /// Reference latitude in decimal degrees
    pub latitude: f64,
    /// Reference longitude in decimal degrees
    pub longitude: f64,
}

/// Attribute update request: parse `value` into the named attribute.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAttributeRequest {
    /// Attribute name (case-insensitive)
    #[schema(example = "age")]
    pub attribute: String,
    /// Raw value; numeric and category attributes are parsed from it
    #[schema(example = "45")]
    pub value: String,
}

/// Serialize a response entity into a JSON value.
pub(crate) fn to_value<T: serde::Serialize>(value: T) -> AppResult<Value> {
    serde_json::to_value(value).map_err(|e| AppError::internal(e.to_string()))
}
