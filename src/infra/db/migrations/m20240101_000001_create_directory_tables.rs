//! Migration: Create the directory tables.
//!
//! Users, community groups, resources, and the membership association.
//! Membership rows are NOT cascaded by the database; the service layer
//! removes them before deleting either side of the pair.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Age).integer().not_null())
                    .col(ColumnDef::new(Users::Sex).string_len(16).not_null())
                    .col(ColumnDef::new(Users::Latitude).double().not_null())
                    .col(ColumnDef::new(Users::Longitude).double().not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CommunityGroups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CommunityGroups::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CommunityGroups::Name)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommunityGroups::CommunityType)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CommunityGroups::Latitude).double().not_null())
                    .col(
                        ColumnDef::new(CommunityGroups::Longitude)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommunityGroups::Capacity)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CommunityGroups::Description).text().null())
                    .col(
                        ColumnDef::new(CommunityGroups::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommunityGroups::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Resources::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Resources::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Resources::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Resources::ResourceType)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Resources::Latitude).double().not_null())
                    .col(ColumnDef::new(Resources::Longitude).double().not_null())
                    .col(ColumnDef::new(Resources::Hours).string_len(100).not_null())
                    .col(ColumnDef::new(Resources::Description).text().null())
                    .col(
                        ColumnDef::new(Resources::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Resources::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Memberships::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Memberships::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(Memberships::CommunityId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(Memberships::UserId)
                            .col(Memberships::CommunityId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_memberships_user")
                            .from(Memberships::Table, Memberships::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_memberships_community")
                            .from(Memberships::Table, Memberships::CommunityId)
                            .to(CommunityGroups::Table, CommunityGroups::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Indexes for the by-type listings and the reverse membership lookup
        manager
            .create_index(
                Index::create()
                    .name("idx_community_groups_type")
                    .table(CommunityGroups::Table)
                    .col(CommunityGroups::CommunityType)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_resources_type")
                    .table(Resources::Table)
                    .col(Resources::ResourceType)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_memberships_community")
                    .table(Memberships::Table)
                    .col(Memberships::CommunityId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Memberships::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Resources::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CommunityGroups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    Age,
    Sex,
    Latitude,
    Longitude,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum CommunityGroups {
    Table,
    Id,
    Name,
    CommunityType,
    Latitude,
    Longitude,
    Capacity,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Resources {
    Table,
    Id,
    Name,
    ResourceType,
    Latitude,
    Longitude,
    Hours,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Memberships {
    Table,
    UserId,
    CommunityId,
}
