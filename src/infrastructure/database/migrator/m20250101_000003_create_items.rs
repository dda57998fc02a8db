//! Create items table
//!
//! Pricing and availability are stored as JSON payloads; their shape is
//! validated by the domain layer before anything reaches this table.

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_categories::Categories;
use super::m20250101_000002_create_subcategories::Subcategories;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Items::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Items::Name).string().not_null())
                    .col(ColumnDef::new(Items::Description).string())
                    .col(ColumnDef::new(Items::Image).string())
                    .col(ColumnDef::new(Items::CategoryId).uuid())
                    .col(ColumnDef::new(Items::SubcategoryId).uuid())
                    .col(ColumnDef::new(Items::TaxApplicable).boolean())
                    .col(ColumnDef::new(Items::TaxPercentage).double())
                    .col(ColumnDef::new(Items::Pricing).json().not_null())
                    .col(
                        ColumnDef::new(Items::IsBookable)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Items::Availability).json())
                    .col(
                        ColumnDef::new(Items::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Items::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Items::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_items_category")
                            .from(Items::Table, Items::CategoryId)
                            .to(Categories::Table, Categories::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_items_subcategory")
                            .from(Items::Table, Items::SubcategoryId)
                            .to(Subcategories::Table, Subcategories::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_items_category")
                    .table(Items::Table)
                    .col(Items::CategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_items_subcategory")
                    .table(Items::Table)
                    .col(Items::SubcategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_items_active")
                    .table(Items::Table)
                    .col(Items::IsActive)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Items::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Items {
    Table,
    Id,
    Name,
    Description,
    Image,
    CategoryId,
    SubcategoryId,
    TaxApplicable,
    TaxPercentage,
    Pricing,
    IsBookable,
    Availability,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
