//! Membership database entity for SeaORM.
//!
//! Composite primary key over `(user_id, community_id)`; the table itself
//! enforces the at-most-one-record-per-pair invariant.

use sea_orm::entity::prelude::*;

use crate::domain::Membership;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "memberships")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub community_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Membership {
    fn from(model: Model) -> Self {
        Membership::new(model.user_id, model.community_id)
    }
}
