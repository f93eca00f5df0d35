//! Community group database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{CommunityGroup, CommunityType};
use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "community_groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub community_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub capacity: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the domain entity, attaching the derived member count.
    pub fn into_domain(self, user_count: i64) -> AppResult<CommunityGroup> {
        let community_type = self.community_type.parse::<CommunityType>().map_err(|_| {
            AppError::internal(format!(
                "corrupt community type '{}' for group {}",
                self.community_type, self.id
            ))
        })?;
        Ok(CommunityGroup::from_storage(
            self.id,
            self.name,
            community_type,
            self.latitude,
            self.longitude,
            self.capacity,
            self.description,
            self.created_at,
            self.updated_at,
            user_count,
        ))
    }
}
