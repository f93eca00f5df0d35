//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Sex, User};
use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub age: i32,
    pub sex: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the domain entity, attaching the derived membership
    /// count. Fails only on a corrupt enum column.
    pub fn into_domain(self, community_count: i64) -> AppResult<User> {
        let sex = self.sex.parse::<Sex>().map_err(|_| {
            AppError::internal(format!("corrupt sex value '{}' for user {}", self.sex, self.id))
        })?;
        Ok(User::from_storage(
            self.id,
            self.name,
            self.email,
            self.age,
            sex,
            self.latitude,
            self.longitude,
            self.created_at,
            self.updated_at,
            community_count,
        ))
    }
}
