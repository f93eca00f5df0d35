//! Resource database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Resource, ResourceType};
use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "resources")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub resource_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub hours: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the domain entity.
    pub fn into_domain(self) -> AppResult<Resource> {
        let resource_type = self.resource_type.parse::<ResourceType>().map_err(|_| {
            AppError::internal(format!(
                "corrupt resource type '{}' for resource {}",
                self.resource_type, self.id
            ))
        })?;
        Ok(Resource::from_storage(
            self.id,
            self.name,
            resource_type,
            self.latitude,
            self.longitude,
            self.hours,
            self.description,
            self.created_at,
            self.updated_at,
        ))
    }
}
