//! User service - Handles user directory business logic.
//!
//! SOLID (SRP): Handles user-related use cases only.
//! Deleting a user cascades through the membership service before the row
//! itself is removed.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::{AttributeModel, NewUser, Sex, User};
use crate::errors::{AppError, AppResult, EntityKind, OptionExt};
use crate::infra::UserRepository;
use crate::services::MembershipService;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users.
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Get a user by ID.
    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// Read one named attribute of a user.
    async fn read_attribute(&self, id: i32, attribute: &str) -> AppResult<Value>;

    /// Validate and store a new user.
    async fn create_user(&self, new_user: NewUser) -> AppResult<User>;

    /// Parse `value` into the named attribute and persist the result.
    async fn update_attribute(&self, id: i32, attribute: &str, value: &str) -> AppResult<User>;

    /// Delete a user along with their memberships.
    async fn delete_user(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of UserService
pub struct UserManager {
    users: Arc<dyn UserRepository>,
    memberships: Arc<dyn MembershipService>,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(users: Arc<dyn UserRepository>, memberships: Arc<dyn MembershipService>) -> Self {
        Self { users, memberships }
    }

    async fn fetch(&self, id: i32) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_not_found(EntityKind::User)
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.find_all().await
    }

    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.fetch(id).await
    }

    async fn read_attribute(&self, id: i32, attribute: &str) -> AppResult<Value> {
        let user = self.fetch(id).await?;
        Ok(user.read_attribute(attribute)?)
    }

    async fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        let sex: Sex = new_user.sex.parse()?;
        let user = User::new(
            new_user.name,
            new_user.email,
            new_user.age,
            sex,
            new_user.latitude,
            new_user.longitude,
        )?;

        let saved = self.users.save(&user).await?;
        tracing::info!(user_id = saved.id(), "user created");
        Ok(saved)
    }

    async fn update_attribute(&self, id: i32, attribute: &str, value: &str) -> AppResult<User> {
        let mut user = self.fetch(id).await?;
        user.write_attribute(attribute, value)?;
        self.users.save(&user).await
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        if !self.users.exists(id).await? {
            return Err(AppError::NotFound(EntityKind::User));
        }

        // Membership records go first; the row deletion must not strand them
        let removed = self.memberships.remove_all_for_user(id).await?;
        if removed > 0 {
            tracing::debug!(user_id = id, memberships = removed, "memberships removed");
        }

        self.users.delete(id).await?;
        tracing::info!(user_id = id, "user deleted");
        Ok(())
    }
}
