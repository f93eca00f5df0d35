//! Community group service - Handles group directory business logic.
//!
//! SOLID (SRP): Handles community-group use cases only.
//! Owns the by-type listings and the proximity search over them.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::{geo, AttributeModel, CommunityGroup, CommunityType, NewCommunityGroup};
use crate::errors::{AppError, AppResult, EntityKind, OptionExt};
use crate::infra::CommunityRepository;
use crate::services::MembershipService;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Community group service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CommunityService: Send + Sync {
    /// List all community groups.
    async fn list_communities(&self) -> AppResult<Vec<CommunityGroup>>;

    /// List groups of one service category. Empty results are an error:
    /// callers asking for a category expect it to be served somewhere.
    async fn list_by_type(&self, community_type: CommunityType) -> AppResult<Vec<CommunityGroup>>;

    /// The group of the given category closest to a reference point.
    async fn closest_community(
        &self,
        community_type: CommunityType,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<CommunityGroup>;

    /// Get a group by ID.
    async fn get_community(&self, id: i32) -> AppResult<CommunityGroup>;

    /// Read one named attribute of a group.
    async fn read_attribute(&self, id: i32, attribute: &str) -> AppResult<Value>;

    /// Validate and store a new group.
    async fn create_community(&self, new_group: NewCommunityGroup) -> AppResult<CommunityGroup>;

    /// Parse `value` into the named attribute and persist the result.
    async fn update_attribute(
        &self,
        id: i32,
        attribute: &str,
        value: &str,
    ) -> AppResult<CommunityGroup>;

    /// Delete a group along with its membership records.
    async fn delete_community(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of CommunityService
pub struct CommunityManager {
    communities: Arc<dyn CommunityRepository>,
    memberships: Arc<dyn MembershipService>,
}

impl CommunityManager {
    /// Create new community service instance
    pub fn new(
        communities: Arc<dyn CommunityRepository>,
        memberships: Arc<dyn MembershipService>,
    ) -> Self {
        Self {
            communities,
            memberships,
        }
    }

    async fn fetch(&self, id: i32) -> AppResult<CommunityGroup> {
        self.communities
            .find_by_id(id)
            .await?
            .ok_or_not_found(EntityKind::CommunityGroup)
    }
}

#[async_trait]
impl CommunityService for CommunityManager {
    async fn list_communities(&self) -> AppResult<Vec<CommunityGroup>> {
        self.communities.find_all().await
    }

    async fn list_by_type(&self, community_type: CommunityType) -> AppResult<Vec<CommunityGroup>> {
        let groups = self.communities.find_by_type(community_type).await?;
        if groups.is_empty() {
            return Err(AppError::no_matches_for_type(
                EntityKind::CommunityGroup,
                community_type.as_str(),
            ));
        }
        Ok(groups)
    }

    async fn closest_community(
        &self,
        community_type: CommunityType,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<CommunityGroup> {
        let groups = self.list_by_type(community_type).await?;
        geo::nearest(&groups, latitude, longitude)
            .cloned()
            .ok_or_else(|| {
                AppError::no_matches_for_type(EntityKind::CommunityGroup, community_type.as_str())
            })
    }

    async fn get_community(&self, id: i32) -> AppResult<CommunityGroup> {
        self.fetch(id).await
    }

    async fn read_attribute(&self, id: i32, attribute: &str) -> AppResult<Value> {
        let group = self.fetch(id).await?;
        Ok(group.read_attribute(attribute)?)
    }

    async fn create_community(&self, new_group: NewCommunityGroup) -> AppResult<CommunityGroup> {
        let community_type: CommunityType = new_group.community_type.parse()?;
        let group = CommunityGroup::new(
            new_group.name,
            community_type,
            new_group.latitude,
            new_group.longitude,
            new_group.capacity,
            new_group.description,
        )?;

        let saved = self.communities.save(&group).await?;
        tracing::info!(community_id = saved.id(), "community group created");
        Ok(saved)
    }

    async fn update_attribute(
        &self,
        id: i32,
        attribute: &str,
        value: &str,
    ) -> AppResult<CommunityGroup> {
        let mut group = self.fetch(id).await?;
        group.write_attribute(attribute, value)?;
        self.communities.save(&group).await
    }

    async fn delete_community(&self, id: i32) -> AppResult<()> {
        if !self.communities.exists(id).await? {
            return Err(AppError::NotFound(EntityKind::CommunityGroup));
        }

        let removed = self.memberships.remove_all_for_community(id).await?;
        if removed > 0 {
            tracing::debug!(community_id = id, memberships = removed, "memberships removed");
        }

        self.communities.delete(id).await?;
        tracing::info!(community_id = id, "community group deleted");
        Ok(())
    }
}
