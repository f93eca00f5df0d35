//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod community_group;
pub mod membership;
pub mod resource;
pub mod user;

// Re-exports for public API convenience
#[allow(unused_imports)]
pub use community_group::{Entity as CommunityGroupEntity, Model as CommunityGroupModel};
#[allow(unused_imports)]
pub use membership::{Entity as MembershipEntity, Model as MembershipModel};
#[allow(unused_imports)]
pub use resource::{Entity as ResourceEntity, Model as ResourceModel};
#[allow(unused_imports)]
pub use user::{Entity as UserEntity, Model as UserModel};
