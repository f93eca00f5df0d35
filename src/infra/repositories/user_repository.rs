//! User repository backed by SeaORM.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::entities::membership;
use super::entities::user::{ActiveModel, Column, Entity as UserEntity};
use crate::domain::User;
use crate::errors::{AppError, AppResult, EntityKind};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id.
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// List all users.
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Insert when the id is unassigned, update otherwise. Returns the
    /// stored entity with its identity and derived count loaded.
    async fn save(&self, user: &User) -> AppResult<User>;

    /// Remove a user row. Membership cleanup is the caller's job.
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Whether a user row exists.
    async fn exists(&self, id: i32) -> AppResult<bool>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn community_count(&self, user_id: i32) -> AppResult<i64> {
        let count = membership::Entity::find()
            .filter(membership::Column::UserId.eq(user_id))
            .count(&self.db)
            .await?;
        Ok(count as i64)
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let Some(model) = UserEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let count = self.community_count(id).await?;
        Ok(Some(model.into_domain(count)?))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;
        let mut users = Vec::with_capacity(models.len());
        for model in models {
            let count = self.community_count(model.id).await?;
            users.push(model.into_domain(count)?);
        }
        Ok(users)
    }

    async fn save(&self, user: &User) -> AppResult<User> {
        let active = ActiveModel {
            id: if user.is_persisted() { Set(user.id()) } else { NotSet },
            name: Set(user.name().to_string()),
            email: Set(user.email().to_string()),
            age: Set(user.age()),
            sex: Set(user.sex().as_str().to_string()),
            latitude: Set(user.latitude()),
            longitude: Set(user.longitude()),
            created_at: Set(user.created_at()),
            updated_at: Set(user.updated_at()),
        };

        let model = if user.is_persisted() {
            active.update(&self.db).await?
        } else {
            active.insert(&self.db).await?
        };

        let count = self.community_count(model.id).await?;
        model.into_domain(count)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(EntityKind::User));
        }

        Ok(())
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        let count = UserEntity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }
}
