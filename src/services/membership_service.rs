//! Membership service - Owns the user/community association lifecycle.
//!
//! The pair state is re-read immediately before every mutation, and the
//! mutation is the final write of its operation. Both sides of the pair
//! must exist; when both are missing, the user is reported first.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::Membership;
use crate::errors::{AppError, AppResult, EntityKind};
use crate::infra::{CommunityRepository, MembershipRepository, UserRepository};
use crate::services::container::parallel;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Membership service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MembershipService: Send + Sync {
    /// Enroll a user in a community group.
    async fn add_member(&self, user_id: i32, community_id: i32) -> AppResult<Membership>;

    /// Withdraw a user from a community group.
    async fn remove_member(&self, user_id: i32, community_id: i32) -> AppResult<()>;

    /// Whether the user currently belongs to the group.
    async fn is_member(&self, user_id: i32, community_id: i32) -> AppResult<bool>;

    /// Cascade hook for user deletion; returns the removed count.
    async fn remove_all_for_user(&self, user_id: i32) -> AppResult<u64>;

    /// Cascade hook for community deletion; returns the removed count.
    async fn remove_all_for_community(&self, community_id: i32) -> AppResult<u64>;
}

/// Concrete implementation of MembershipService
pub struct MembershipManager {
    users: Arc<dyn UserRepository>,
    communities: Arc<dyn CommunityRepository>,
    memberships: Arc<dyn MembershipRepository>,
}

impl MembershipManager {
    /// Create new membership service instance
    pub fn new(
        users: Arc<dyn UserRepository>,
        communities: Arc<dyn CommunityRepository>,
        memberships: Arc<dyn MembershipRepository>,
    ) -> Self {
        Self {
            users,
            communities,
            memberships,
        }
    }

    /// Both sides of the pair must exist. The user check is reported
    /// first, so a request where both are missing names the user.
    async fn check_pair(&self, user_id: i32, community_id: i32) -> AppResult<()> {
        let (user_exists, community_exists) = parallel::join2(
            self.users.exists(user_id),
            self.communities.exists(community_id),
        )
        .await?;

        if !user_exists {
            return Err(AppError::NotFound(EntityKind::User));
        }
        if !community_exists {
            return Err(AppError::NotFound(EntityKind::CommunityGroup));
        }
        Ok(())
    }
}

#[async_trait]
impl MembershipService for MembershipManager {
    async fn add_member(&self, user_id: i32, community_id: i32) -> AppResult<Membership> {
        self.check_pair(user_id, community_id).await?;

        if self.memberships.pair_exists(user_id, community_id).await? {
            return Err(AppError::AlreadyMember);
        }

        let membership = self
            .memberships
            .save(&Membership::new(user_id, community_id))
            .await?;
        tracing::info!(user_id, community_id, "user joined community group");
        Ok(membership)
    }

    async fn remove_member(&self, user_id: i32, community_id: i32) -> AppResult<()> {
        self.check_pair(user_id, community_id).await?;

        if !self.memberships.pair_exists(user_id, community_id).await? {
            return Err(AppError::NotAMember);
        }

        self.memberships.delete_pair(user_id, community_id).await?;
        tracing::info!(user_id, community_id, "user left community group");
        Ok(())
    }

    async fn is_member(&self, user_id: i32, community_id: i32) -> AppResult<bool> {
        self.memberships.pair_exists(user_id, community_id).await
    }

    async fn remove_all_for_user(&self, user_id: i32) -> AppResult<u64> {
        self.memberships.delete_for_user(user_id).await
    }

    async fn remove_all_for_community(&self, community_id: i32) -> AppResult<u64> {
        self.memberships.delete_for_community(community_id).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::infra::{
        MockCommunityRepository, MockMembershipRepository, MockUserRepository,
    };

    struct Fixture {
        users: MockUserRepository,
        communities: MockCommunityRepository,
        memberships: MockMembershipRepository,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                users: MockUserRepository::new(),
                communities: MockCommunityRepository::new(),
                memberships: MockMembershipRepository::new(),
            }
        }

        fn with_pair_present(mut self, user_id: i32, community_id: i32) -> Self {
            self.users
                .expect_exists()
                .with(eq(user_id))
                .returning(|_| Ok(true));
            self.communities
                .expect_exists()
                .with(eq(community_id))
                .returning(|_| Ok(true));
            self
        }

        fn build(self) -> MembershipManager {
            MembershipManager::new(
                Arc::new(self.users),
                Arc::new(self.communities),
                Arc::new(self.memberships),
            )
        }
    }

    #[tokio::test]
    async fn first_add_creates_the_pair_record() {
        let mut fx = Fixture::new().with_pair_present(1, 4);
        fx.memberships
            .expect_pair_exists()
            .with(eq(1), eq(4))
            .returning(|_, _| Ok(false));
        fx.memberships
            .expect_save()
            .withf(|m: &Membership| m.user_id == 1 && m.community_id == 4)
            .times(1)
            .returning(|m| Ok(*m));

        let service = fx.build();
        let membership = service.add_member(1, 4).await.unwrap();
        assert_eq!(membership, Membership::new(1, 4));
    }

    #[tokio::test]
    async fn repeated_add_conflicts_without_saving() {
        let mut fx = Fixture::new().with_pair_present(1, 4);
        fx.memberships
            .expect_pair_exists()
            .with(eq(1), eq(4))
            .returning(|_, _| Ok(true));
        fx.memberships.expect_save().times(0);

        let service = fx.build();
        let err = service.add_member(1, 4).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyMember));
    }

    #[tokio::test]
    async fn remove_of_a_non_member_reports_not_a_member() {
        let mut fx = Fixture::new().with_pair_present(1, 4);
        fx.memberships
            .expect_pair_exists()
            .with(eq(1), eq(4))
            .returning(|_, _| Ok(false));
        fx.memberships.expect_delete_pair().times(0);

        let service = fx.build();
        let err = service.remove_member(1, 4).await.unwrap_err();
        assert!(matches!(err, AppError::NotAMember));
    }

    #[tokio::test]
    async fn remove_deletes_an_existing_pair_record() {
        let mut fx = Fixture::new().with_pair_present(1, 4);
        fx.memberships
            .expect_pair_exists()
            .with(eq(1), eq(4))
            .returning(|_, _| Ok(true));
        fx.memberships
            .expect_delete_pair()
            .with(eq(1), eq(4))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = fx.build();
        service.remove_member(1, 4).await.unwrap();
    }

    #[tokio::test]
    async fn missing_user_is_reported_before_a_missing_community() {
        let mut fx = Fixture::new();
        fx.users.expect_exists().with(eq(9)).returning(|_| Ok(false));
        fx.communities
            .expect_exists()
            .with(eq(9))
            .returning(|_| Ok(false));
        fx.memberships.expect_pair_exists().times(0);

        let service = fx.build();
        let err = service.add_member(9, 9).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(EntityKind::User)));
    }

    #[tokio::test]
    async fn missing_community_alone_is_reported_as_such() {
        let mut fx = Fixture::new();
        fx.users.expect_exists().with(eq(1)).returning(|_| Ok(true));
        fx.communities
            .expect_exists()
            .with(eq(9))
            .returning(|_| Ok(false));

        let service = fx.build();
        let err = service.remove_member(1, 9).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(EntityKind::CommunityGroup)));
    }

    #[tokio::test]
    async fn cascade_hooks_pass_through_removed_counts() {
        let mut fx = Fixture::new();
        fx.memberships
            .expect_delete_for_user()
            .with(eq(1))
            .returning(|_| Ok(2));
        fx.memberships
            .expect_delete_for_community()
            .with(eq(4))
            .returning(|_| Ok(5));

        let service = fx.build();
        assert_eq!(service.remove_all_for_user(1).await.unwrap(), 2);
        assert_eq!(service.remove_all_for_community(4).await.unwrap(), 5);
    }
}
