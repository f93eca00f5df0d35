//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! The membership service is the single owner of the user/community
//! association; the user and community services call into it for their
//! deletion cascades.

mod community_service;
pub mod container;
mod membership_service;
mod resource_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use community_service::{CommunityManager, CommunityService};
pub use membership_service::{MembershipManager, MembershipService};
pub use resource_service::{ResourceManager, ResourceService};
pub use user_service::{UserManager, UserService};

// Parallel execution utilities
pub use container::parallel;

#[cfg(any(test, feature = "test-utils"))]
pub use community_service::MockCommunityService;
#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use membership_service::MockMembershipService;
#[cfg(any(test, feature = "test-utils"))]
pub use resource_service::MockResourceService;
#[cfg(any(test, feature = "test-utils"))]
pub use user_service::MockUserService;
