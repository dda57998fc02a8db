//! Booking entity
//!
//! A partial unique index on `(item_id, date, slot_start)` where
//! `status = 'CONFIRMED'` (created in the bookings migration) is the
//! authoritative guard against double booking.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub item_id: Uuid,

    /// Calendar date, no time component
    pub date: Date,

    /// Slot bounds, `HH:MM`
    pub slot_start: String,
    pub slot_end: String,

    pub customer_name: String,

    #[sea_orm(nullable)]
    pub customer_email: Option<String>,

    /// CONFIRMED, CANCELLED or COMPLETED
    pub status: String,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::item::Entity",
        from = "Column::ItemId",
        to = "super::item::Column::Id"
    )]
    Item,
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
