//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::attributes::AttributeError;
use crate::domain::validation::ValidationError;

/// The kind of directory entity an operation was addressed to.
///
/// Lookup failures name the entity, so errors carry this alongside
/// nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    CommunityGroup,
    Resource,
}

impl EntityKind {
    /// Title-case singular, as used in not-found messages.
    pub fn title(self) -> &'static str {
        match self {
            EntityKind::User => "User",
            EntityKind::CommunityGroup => "Community Group",
            EntityKind::Resource => "Resource",
        }
    }

    /// Title-case plural, as used in empty-directory messages.
    pub fn title_plural(self) -> &'static str {
        match self {
            EntityKind::User => "Users",
            EntityKind::CommunityGroup => "Community Groups",
            EntityKind::Resource => "Resources",
        }
    }

    /// Lowercase plural, as used in by-type lookup messages.
    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::User => "users",
            EntityKind::CommunityGroup => "community groups",
            EntityKind::Resource => "resources",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Application error types
/// SOLID - Open/Closed: Extend via new variants without modifying behavior
#[derive(Error, Debug)]
pub enum AppError {
    // Lookup errors
    #[error("{} Not Found", .0.title())]
    NotFound(EntityKind),

    #[error("No {} Found", .0.title_plural())]
    NoneFound(EntityKind),

    #[error("No {} were found for type: {type_name}", .kind.plural())]
    NoMatchesForType {
        kind: EntityKind,
        type_name: String,
    },

    #[error("Attribute Not Found")]
    AttributeNotFound,

    // Membership state errors
    #[error("User is already a member of the community group")]
    AlreadyMember,

    #[error("User is not a member of the community group")]
    NotAMember,

    // Validation
    #[error("{0}")]
    Validation(#[from] ValidationError),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

impl AppError {
    /// Get error code for client
    fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) | AppError::NoneFound(_) | AppError::NoMatchesForType { .. } => {
                "NOT_FOUND"
            }
            AppError::AttributeNotFound => "ATTRIBUTE_NOT_FOUND",
            AppError::AlreadyMember => "CONFLICT",
            AppError::NotAMember => "NOT_A_MEMBER",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_)
            | AppError::NoneFound(_)
            | AppError::NoMatchesForType { .. }
            | AppError::AttributeNotFound
            | AppError::NotAMember => StatusCode::NOT_FOUND,
            AppError::AlreadyMember => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            // Hide details for internal errors
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Client errors serve their full message
            _ => self.to_string(),
        }
    }

    /// The offending attribute for validation failures, if any.
    fn field(&self) -> Option<&'static str> {
        match self {
            AppError::Validation(e) => Some(e.field),
            _ => None,
        }
    }
}

impl From<AttributeError> for AppError {
    fn from(err: AttributeError) -> Self {
        match err {
            AttributeError::NotFound => AppError::AttributeNotFound,
            AttributeError::Invalid(e) => AppError::Validation(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
                field: self.field(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, kind: EntityKind) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, kind: EntityKind) -> AppResult<T> {
        self.ok_or(AppError::NotFound(kind))
    }
}

/// Convenience constructors
impl AppError {
    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn no_matches_for_type(kind: EntityKind, type_name: impl Into<String>) -> Self {
        AppError::NoMatchesForType {
            kind,
            type_name: type_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_messages_name_the_entity() {
        assert_eq!(AppError::NotFound(EntityKind::User).to_string(), "User Not Found");
        assert_eq!(
            AppError::NotFound(EntityKind::CommunityGroup).to_string(),
            "Community Group Not Found"
        );
        assert_eq!(
            AppError::NoneFound(EntityKind::Resource).to_string(),
            "No Resources Found"
        );
        assert_eq!(
            AppError::no_matches_for_type(EntityKind::CommunityGroup, "MENTAL_HEALTH").to_string(),
            "No community groups were found for type: MENTAL_HEALTH"
        );
    }

    #[test]
    fn membership_errors_keep_their_distinct_statuses() {
        assert_eq!(AppError::AlreadyMember.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::NotAMember.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::AlreadyMember.to_string(),
            "User is already a member of the community group"
        );
        assert_eq!(
            AppError::NotAMember.to_string(),
            "User is not a member of the community group"
        );
    }

    #[test]
    fn attribute_errors_split_into_not_found_and_validation() {
        use crate::domain::validation::ValidationError;

        let not_found: AppError = AttributeError::NotFound.into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.to_string(), "Attribute Not Found");

        let invalid: AppError =
            AttributeError::Invalid(ValidationError::new("age", "Age cannot be negative")).into();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.to_string(), "Age cannot be negative");
    }
}
