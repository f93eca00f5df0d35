//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and migrations
//! - SeaORM-backed repositories for the directory tables

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{
    CommunityRepository, CommunityStore, MembershipRepository, MembershipStore,
    ResourceRepository, ResourceStore, UserRepository, UserStore,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockCommunityRepository, MockMembershipRepository, MockResourceRepository,
    MockUserRepository,
};
