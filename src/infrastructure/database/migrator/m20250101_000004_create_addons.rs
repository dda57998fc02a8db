//! Create addons table

use sea_orm_migration::prelude::*;

use super::m20250101_000003_create_items::Items;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Addons::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Addons::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Addons::ItemId).uuid().not_null())
                    .col(ColumnDef::new(Addons::Name).string().not_null())
                    .col(ColumnDef::new(Addons::Price).double().not_null())
                    .col(
                        ColumnDef::new(Addons::IsMandatory)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Addons::AddonGroup).string())
                    .col(
                        ColumnDef::new(Addons::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Addons::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Addons::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_addons_item")
                            .from(Addons::Table, Addons::ItemId)
                            .to(Items::Table, Items::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_addons_item")
                    .table(Addons::Table)
                    .col(Addons::ItemId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Addons::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Addons {
    Table,
    Id,
    ItemId,
    Name,
    Price,
    IsMandatory,
    AddonGroup,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
