//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod community_repository;
pub(crate) mod entities;
mod membership_repository;
mod resource_repository;
mod user_repository;

pub use community_repository::{CommunityRepository, CommunityStore};
pub use membership_repository::{MembershipRepository, MembershipStore};
pub use resource_repository::{ResourceRepository, ResourceStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use community_repository::MockCommunityRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use membership_repository::MockMembershipRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use resource_repository::MockResourceRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
