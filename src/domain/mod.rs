//! Domain layer - Core directory entities and logic
//!
//! This module contains the core domain models that represent
//! directory concepts independent of infrastructure concerns.
//!
//! DDD: Domain layer has NO external dependencies (except error types).
//! Contains: Entities, Value Objects, the attribute tables, proximity search.

pub mod attributes;
pub mod community_group;
pub mod geo;
pub mod membership;
pub mod resource;
pub mod user;
pub mod validation;

pub use attributes::{AttributeError, AttributeModel, AttributeSpec, AttributeTable};
pub use community_group::{CommunityGroup, CommunityType, NewCommunityGroup};
pub use geo::{euclidean_distance, nearest, Located};
pub use membership::Membership;
pub use resource::{NewResource, Resource, ResourceType};
pub use user::{NewUser, Sex, User};
pub use validation::ValidationError;
