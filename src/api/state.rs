//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{
    CommunityService, MembershipService, ResourceService, ServiceContainer, Services, UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Community group service
    pub community_service: Arc<dyn CommunityService>,
    /// Resource service
    pub resource_service: Arc<dyn ResourceService>,
    /// Membership service
    pub membership_service: Arc<dyn MembershipService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from an initialized service container.
    pub fn from_services(services: &Services, database: Arc<Database>) -> Self {
        Self {
            user_service: services.users(),
            community_service: services.communities(),
            resource_service: services.resources(),
            membership_service: services.memberships(),
            database,
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(
        user_service: Arc<dyn UserService>,
        community_service: Arc<dyn CommunityService>,
        resource_service: Arc<dyn ResourceService>,
        membership_service: Arc<dyn MembershipService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            user_service,
            community_service,
            resource_service,
            membership_service,
            database,
        }
    }
}
