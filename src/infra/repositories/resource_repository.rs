//! Resource repository backed by SeaORM.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::entities::resource::{self, ActiveModel, Entity as ResourceEntity};
use crate::domain::{Resource, ResourceType};
use crate::errors::{AppError, AppResult, EntityKind};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Resource repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// Find a resource by id.
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Resource>>;

    /// List all resources.
    async fn find_all(&self) -> AppResult<Vec<Resource>>;

    /// List resources of one service category.
    async fn find_by_type(&self, resource_type: ResourceType) -> AppResult<Vec<Resource>>;

    /// Insert when the id is unassigned, update otherwise.
    async fn save(&self, resource: &Resource) -> AppResult<Resource>;

    /// Remove a resource row.
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Whether a resource row exists.
    async fn exists(&self, id: i32) -> AppResult<bool>;
}

/// Concrete implementation of ResourceRepository
pub struct ResourceStore {
    db: DatabaseConnection,
}

impl ResourceStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ResourceRepository for ResourceStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Resource>> {
        let result = ResourceEntity::find_by_id(id).one(&self.db).await?;
        result.map(resource::Model::into_domain).transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<Resource>> {
        let models = ResourceEntity::find()
            .order_by_asc(resource::Column::Id)
            .all(&self.db)
            .await?;
        models.into_iter().map(resource::Model::into_domain).collect()
    }

    /// Ordered by id so that proximity ties resolve to the oldest entry.
    async fn find_by_type(&self, resource_type: ResourceType) -> AppResult<Vec<Resource>> {
        let models = ResourceEntity::find()
            .filter(resource::Column::ResourceType.eq(resource_type.as_str()))
            .order_by_asc(resource::Column::Id)
            .all(&self.db)
            .await?;
        models.into_iter().map(resource::Model::into_domain).collect()
    }

    async fn save(&self, resource: &Resource) -> AppResult<Resource> {
        let active = ActiveModel {
            id: if resource.is_persisted() { Set(resource.id()) } else { NotSet },
            name: Set(resource.name().to_string()),
            resource_type: Set(resource.resource_type().as_str().to_string()),
            latitude: Set(resource.latitude()),
            longitude: Set(resource.longitude()),
            hours: Set(resource.hours().to_string()),
            description: Set(resource.description().map(str::to_string)),
            created_at: Set(resource.created_at()),
            updated_at: Set(resource.updated_at()),
        };

        let model = if resource.is_persisted() {
            active.update(&self.db).await?
        } else {
            active.insert(&self.db).await?
        };

        model.into_domain()
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = ResourceEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(EntityKind::Resource));
        }

        Ok(())
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        let count = ResourceEntity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }
}
