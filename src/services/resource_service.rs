//! Resource service - Handles resource directory business logic.
//!
//! SOLID (SRP): Handles resource use cases only. Resources have no
//! membership side, so deletion is a plain row removal.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::{geo, AttributeModel, NewResource, Resource, ResourceType};
use crate::errors::{AppError, AppResult, EntityKind, OptionExt};
use crate::infra::ResourceRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Resource service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ResourceService: Send + Sync {
    /// List all resources.
    async fn list_resources(&self) -> AppResult<Vec<Resource>>;

    /// List resources of one service category. Empty results are an error.
    async fn list_by_type(&self, resource_type: ResourceType) -> AppResult<Vec<Resource>>;

    /// The resource of the given category closest to a reference point.
    async fn closest_resource(
        &self,
        resource_type: ResourceType,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<Resource>;

    /// Get a resource by ID.
    async fn get_resource(&self, id: i32) -> AppResult<Resource>;

    /// Read one named attribute of a resource.
    async fn read_attribute(&self, id: i32, attribute: &str) -> AppResult<Value>;

    /// Validate and store a new resource.
    async fn create_resource(&self, new_resource: NewResource) -> AppResult<Resource>;

    /// Parse `value` into the named attribute and persist the result.
    async fn update_attribute(&self, id: i32, attribute: &str, value: &str)
        -> AppResult<Resource>;

    /// Delete a resource.
    async fn delete_resource(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of ResourceService
pub struct ResourceManager {
    resources: Arc<dyn ResourceRepository>,
}

impl ResourceManager {
    /// Create new resource service instance
    pub fn new(resources: Arc<dyn ResourceRepository>) -> Self {
        Self { resources }
    }

    async fn fetch(&self, id: i32) -> AppResult<Resource> {
        self.resources
            .find_by_id(id)
            .await?
            .ok_or_not_found(EntityKind::Resource)
    }
}

#[async_trait]
impl ResourceService for ResourceManager {
    async fn list_resources(&self) -> AppResult<Vec<Resource>> {
        self.resources.find_all().await
    }

    async fn list_by_type(&self, resource_type: ResourceType) -> AppResult<Vec<Resource>> {
        let resources = self.resources.find_by_type(resource_type).await?;
        if resources.is_empty() {
            return Err(AppError::no_matches_for_type(
                EntityKind::Resource,
                resource_type.as_str(),
            ));
        }
        Ok(resources)
    }

    async fn closest_resource(
        &self,
        resource_type: ResourceType,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<Resource> {
        let resources = self.list_by_type(resource_type).await?;
        geo::nearest(&resources, latitude, longitude)
            .cloned()
            .ok_or_else(|| {
                AppError::no_matches_for_type(EntityKind::Resource, resource_type.as_str())
            })
    }

    async fn get_resource(&self, id: i32) -> AppResult<Resource> {
        self.fetch(id).await
    }

    async fn read_attribute(&self, id: i32, attribute: &str) -> AppResult<Value> {
        let resource = self.fetch(id).await?;
        Ok(resource.read_attribute(attribute)?)
    }

    async fn create_resource(&self, new_resource: NewResource) -> AppResult<Resource> {
        let resource_type: ResourceType = new_resource.resource_type.parse()?;
        let resource = Resource::new(
            new_resource.name,
            resource_type,
            new_resource.latitude,
            new_resource.longitude,
            new_resource.hours,
            new_resource.description,
        )?;

        let saved = self.resources.save(&resource).await?;
        tracing::info!(resource_id = saved.id(), "resource created");
        Ok(saved)
    }

    async fn update_attribute(
        &self,
        id: i32,
        attribute: &str,
        value: &str,
    ) -> AppResult<Resource> {
        let mut resource = self.fetch(id).await?;
        resource.write_attribute(attribute, value)?;
        self.resources.save(&resource).await
    }

    async fn delete_resource(&self, id: i32) -> AppResult<()> {
        if !self.resources.exists(id).await? {
            return Err(AppError::NotFound(EntityKind::Resource));
        }
        self.resources.delete(id).await?;
        tracing::info!(resource_id = id, "resource deleted");
        Ok(())
    }
}
