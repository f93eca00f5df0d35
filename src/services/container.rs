//! Service Container - Centralized service access with parallel execution support.
//!
//! SOLID (SRP): Manages service lifecycle and access.
//! SOLID (DIP): Depends on service traits, not implementations.
//!
//! Features:
//! - Centralized access to all application services
//! - Thread-safe concurrent access via Arc
//! - Parallel execution utilities for independent operations

use std::sync::Arc;

use super::{CommunityService, MembershipService, ResourceService, UserService};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get community group service
    fn communities(&self) -> Arc<dyn CommunityService>;

    /// Get resource service
    fn resources(&self) -> Arc<dyn ResourceService>;

    /// Get membership service
    fn memberships(&self) -> Arc<dyn MembershipService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    user_service: Arc<dyn UserService>,
    community_service: Arc<dyn CommunityService>,
    resource_service: Arc<dyn ResourceService>,
    membership_service: Arc<dyn MembershipService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        user_service: Arc<dyn UserService>,
        community_service: Arc<dyn CommunityService>,
        resource_service: Arc<dyn ResourceService>,
        membership_service: Arc<dyn MembershipService>,
    ) -> Self {
        Self {
            user_service,
            community_service,
            resource_service,
            membership_service,
        }
    }

    /// Create service container from a database connection.
    ///
    /// The membership service is shared: the user and community services
    /// delegate their deletion cascades to it.
    pub fn from_connection(db: sea_orm::DatabaseConnection) -> Self {
        use super::{CommunityManager, MembershipManager, ResourceManager, UserManager};
        use crate::infra::repositories::{
            CommunityRepository, CommunityStore, MembershipRepository, MembershipStore,
            ResourceRepository, ResourceStore, UserRepository, UserStore,
        };

        let users: Arc<dyn UserRepository> = Arc::new(UserStore::new(db.clone()));
        let communities: Arc<dyn CommunityRepository> = Arc::new(CommunityStore::new(db.clone()));
        let resources: Arc<dyn ResourceRepository> = Arc::new(ResourceStore::new(db.clone()));
        let memberships: Arc<dyn MembershipRepository> = Arc::new(MembershipStore::new(db));

        let membership_service: Arc<dyn MembershipService> = Arc::new(MembershipManager::new(
            users.clone(),
            communities.clone(),
            memberships,
        ));
        let user_service = Arc::new(UserManager::new(users, membership_service.clone()));
        let community_service = Arc::new(CommunityManager::new(
            communities,
            membership_service.clone(),
        ));
        let resource_service = Arc::new(ResourceManager::new(resources));

        Self {
            user_service,
            community_service,
            resource_service,
            membership_service,
        }
    }
}

impl ServiceContainer for Services {
    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn communities(&self) -> Arc<dyn CommunityService> {
        self.community_service.clone()
    }

    fn resources(&self) -> Arc<dyn ResourceService> {
        self.resource_service.clone()
    }

    fn memberships(&self) -> Arc<dyn MembershipService> {
        self.membership_service.clone()
    }
}

/// Parallel execution utilities for running independent operations concurrently.
///
/// These functions leverage tokio's async runtime to execute multiple
/// independent operations in parallel, improving throughput.
pub mod parallel {
    use std::future::Future;

    use tokio::try_join;

    use crate::errors::AppResult;

    /// Execute two independent async operations in parallel.
    ///
    /// Both operations run concurrently and the function returns when both
    /// complete. If either operation fails, the error is returned
    /// immediately.
    ///
    /// # Example
    /// ```ignore
    /// let (user_exists, group_exists) = parallel::join2(
    ///     users.exists(user_id),
    ///     communities.exists(community_id),
    /// ).await?;
    /// ```
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }

    /// Execute three independent async operations in parallel.
    pub async fn join3<F1, F2, F3, T1, T2, T3>(f1: F1, f2: F2, f3: F3) -> AppResult<(T1, T2, T3)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
        F3: Future<Output = AppResult<T3>>,
    {
        try_join!(f1, f2, f3)
    }
}
