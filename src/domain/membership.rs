//! Membership association between users and community groups.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One user's membership in one community group.
///
/// Identity is the `(user_id, community_id)` pair; the membership service
/// keeps at most one record per pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Membership {
    /// Member user id
    #[schema(example = 1)]
    pub user_id: i32,
    /// Community group id
    #[schema(example = 4)]
    pub community_id: i32,
}

impl Membership {
    pub fn new(user_id: i32, community_id: i32) -> Self {
        Self {
            user_id,
            community_id,
        }
    }
}
