//! Create subcategories table

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_categories::Categories;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subcategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subcategories::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subcategories::CategoryId).uuid().not_null())
                    .col(ColumnDef::new(Subcategories::Name).string().not_null())
                    .col(ColumnDef::new(Subcategories::Description).string())
                    .col(ColumnDef::new(Subcategories::Image).string())
                    // Nullable on purpose: null defers to the parent category
                    .col(ColumnDef::new(Subcategories::TaxApplicable).boolean())
                    .col(ColumnDef::new(Subcategories::TaxPercentage).double())
                    .col(
                        ColumnDef::new(Subcategories::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Subcategories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Subcategories::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subcategories_category")
                            .from(Subcategories::Table, Subcategories::CategoryId)
                            .to(Categories::Table, Categories::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_subcategories_category")
                    .table(Subcategories::Table)
                    .col(Subcategories::CategoryId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subcategories::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Subcategories {
    Table,
    Id,
    CategoryId,
    Name,
    Description,
    Image,
    TaxApplicable,
    TaxPercentage,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
