//! Create bookings table
//!
//! The partial unique index on `(item_id, date, slot_start)` scoped to
//! CONFIRMED rows is the authoritative double-booking guard: the service
//! pre-check is advisory, and the losing writer of a race gets its insert
//! rejected here. Partial indexes need raw SQL (sea-query's index builder
//! has no WHERE clause) and are supported by both SQLite and PostgreSQL.

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
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Bookings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Bookings::ItemId).uuid().not_null())
                    .col(ColumnDef::new(Bookings::Date).date().not_null())
                    .col(ColumnDef::new(Bookings::SlotStart).string().not_null())
                    .col(ColumnDef::new(Bookings::SlotEnd).string().not_null())
                    .col(ColumnDef::new(Bookings::CustomerName).string().not_null())
                    .col(ColumnDef::new(Bookings::CustomerEmail).string())
                    .col(
                        ColumnDef::new(Bookings::Status)
                            .string()
                            .not_null()
                            .default("CONFIRMED"),
                    )
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_item")
                            .from(Bookings::Table, Bookings::ItemId)
                            .to(Items::Table, Items::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_item_date")
                    .table(Bookings::Table)
                    .col(Bookings::ItemId)
                    .col(Bookings::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS uniq_bookings_confirmed_slot \
                 ON bookings (item_id, date, slot_start) \
                 WHERE status = 'CONFIRMED'",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bookings {
    Table,
    Id,
    ItemId,
    Date,
    SlotStart,
    SlotEnd,
    CustomerName,
    CustomerEmail,
    Status,
    CreatedAt,
}
