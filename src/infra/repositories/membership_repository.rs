//! Membership repository backed by SeaORM.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use super::entities::membership::{self, ActiveModel, Entity as MembershipEntity};
use crate::domain::Membership;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Membership repository trait for dependency injection.
///
/// Pure pair storage. The membership service owns the state machine; the
/// store only answers existence questions and mutates rows.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Find the record for one pair.
    async fn find_pair(&self, user_id: i32, community_id: i32) -> AppResult<Option<Membership>>;

    /// Whether the pair has a record.
    async fn pair_exists(&self, user_id: i32, community_id: i32) -> AppResult<bool>;

    /// Insert the pair record.
    async fn save(&self, membership: &Membership) -> AppResult<Membership>;

    /// Remove the pair record. A no-op when the pair is absent.
    async fn delete_pair(&self, user_id: i32, community_id: i32) -> AppResult<()>;

    /// Remove every record for a user; returns the removed count.
    async fn delete_for_user(&self, user_id: i32) -> AppResult<u64>;

    /// Remove every record for a community group; returns the removed count.
    async fn delete_for_community(&self, community_id: i32) -> AppResult<u64>;

    /// Number of groups a user belongs to.
    async fn count_for_user(&self, user_id: i32) -> AppResult<i64>;

    /// Number of members a community group has.
    async fn count_for_community(&self, community_id: i32) -> AppResult<i64>;
}

/// Concrete implementation of MembershipRepository
pub struct MembershipStore {
    db: DatabaseConnection,
}

impl MembershipStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MembershipRepository for MembershipStore {
    async fn find_pair(&self, user_id: i32, community_id: i32) -> AppResult<Option<Membership>> {
        let result = MembershipEntity::find_by_id((user_id, community_id))
            .one(&self.db)
            .await?;
        Ok(result.map(Membership::from))
    }

    async fn pair_exists(&self, user_id: i32, community_id: i32) -> AppResult<bool> {
        let count = MembershipEntity::find_by_id((user_id, community_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn save(&self, membership: &Membership) -> AppResult<Membership> {
        let active = ActiveModel {
            user_id: Set(membership.user_id),
            community_id: Set(membership.community_id),
        };

        let model = active.insert(&self.db).await?;
        Ok(Membership::from(model))
    }

    async fn delete_pair(&self, user_id: i32, community_id: i32) -> AppResult<()> {
        MembershipEntity::delete_by_id((user_id, community_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn delete_for_user(&self, user_id: i32) -> AppResult<u64> {
        let result = MembershipEntity::delete_many()
            .filter(membership::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn delete_for_community(&self, community_id: i32) -> AppResult<u64> {
        let result = MembershipEntity::delete_many()
            .filter(membership::Column::CommunityId.eq(community_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn count_for_user(&self, user_id: i32) -> AppResult<i64> {
        let count = MembershipEntity::find()
            .filter(membership::Column::UserId.eq(user_id))
            .count(&self.db)
            .await?;
        Ok(count as i64)
    }

    async fn count_for_community(&self, community_id: i32) -> AppResult<i64> {
        let count = MembershipEntity::find()
            .filter(membership::Column::CommunityId.eq(community_id))
            .count(&self.db)
            .await?;
        Ok(count as i64)
    }
}
