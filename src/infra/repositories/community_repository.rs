//! Community group repository backed by SeaORM.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::entities::community_group::{self, ActiveModel, Entity as CommunityGroupEntity};
use super::entities::membership;
use crate::domain::{CommunityGroup, CommunityType};
use crate::errors::{AppError, AppResult, EntityKind};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Community group repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CommunityRepository: Send + Sync {
    /// Find a group by id.
    async fn find_by_id(&self, id: i32) -> AppResult<Option<CommunityGroup>>;

    /// List all groups.
    async fn find_all(&self) -> AppResult<Vec<CommunityGroup>>;

    /// List groups of one service category.
    async fn find_by_type(&self, community_type: CommunityType) -> AppResult<Vec<CommunityGroup>>;

    /// Insert when the id is unassigned, update otherwise.
    async fn save(&self, group: &CommunityGroup) -> AppResult<CommunityGroup>;

    /// Remove a group row. Membership cleanup is the caller's job.
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Whether a group row exists.
    async fn exists(&self, id: i32) -> AppResult<bool>;
}

/// Concrete implementation of CommunityRepository
pub struct CommunityStore {
    db: DatabaseConnection,
}

impl CommunityStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn user_count(&self, community_id: i32) -> AppResult<i64> {
        let count = membership::Entity::find()
            .filter(membership::Column::CommunityId.eq(community_id))
            .count(&self.db)
            .await?;
        Ok(count as i64)
    }

    async fn hydrate(&self, models: Vec<community_group::Model>) -> AppResult<Vec<CommunityGroup>> {
        let mut groups = Vec::with_capacity(models.len());
        for model in models {
            let count = self.user_count(model.id).await?;
            groups.push(model.into_domain(count)?);
        }
        Ok(groups)
    }
}

#[async_trait]
impl CommunityRepository for CommunityStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<CommunityGroup>> {
        let Some(model) = CommunityGroupEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let count = self.user_count(id).await?;
        Ok(Some(model.into_domain(count)?))
    }

    async fn find_all(&self) -> AppResult<Vec<CommunityGroup>> {
        let models = CommunityGroupEntity::find()
            .order_by_asc(community_group::Column::Id)
            .all(&self.db)
            .await?;
        self.hydrate(models).await
    }

    /// Ordered by id so that proximity ties resolve to the oldest entry.
    async fn find_by_type(&self, community_type: CommunityType) -> AppResult<Vec<CommunityGroup>> {
        let models = CommunityGroupEntity::find()
            .filter(community_group::Column::CommunityType.eq(community_type.as_str()))
            .order_by_asc(community_group::Column::Id)
            .all(&self.db)
            .await?;
        self.hydrate(models).await
    }

    async fn save(&self, group: &CommunityGroup) -> AppResult<CommunityGroup> {
        let active = ActiveModel {
            id: if group.is_persisted() { Set(group.id()) } else { NotSet },
            name: Set(group.name().to_string()),
            community_type: Set(group.community_type().as_str().to_string()),
            latitude: Set(group.latitude()),
            longitude: Set(group.longitude()),
            capacity: Set(group.capacity()),
            description: Set(group.description().map(str::to_string)),
            created_at: Set(group.created_at()),
            updated_at: Set(group.updated_at()),
        };

        let model = if group.is_persisted() {
            active.update(&self.db).await?
        } else {
            active.insert(&self.db).await?
        };

        let count = self.user_count(model.id).await?;
        model.into_domain(count)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = CommunityGroupEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(EntityKind::CommunityGroup));
        }

        Ok(())
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        let count = CommunityGroupEntity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }
}
