//! Item entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,

    #[sea_orm(nullable)]
    pub description: Option<String>,

    #[sea_orm(nullable)]
    pub image: Option<String>,

    /// Exactly one of category_id / subcategory_id is set
    #[sea_orm(nullable)]
    pub category_id: Option<Uuid>,

    #[sea_orm(nullable)]
    pub subcategory_id: Option<Uuid>,

    /// Null means "inherit from parent"
    #[sea_orm(nullable)]
    pub tax_applicable: Option<bool>,

    #[sea_orm(nullable)]
    pub tax_percentage: Option<f64>,

    /// `PricingRule` in its `{"type", "config"}` wire shape
    pub pricing: Json,

    pub is_bookable: bool,

    /// `Availability` (days + slot catalog), when the item is bookable
    #[sea_orm(nullable)]
    pub availability: Option<Json>,

    pub is_active: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::subcategory::Entity",
        from = "Column::SubcategoryId",
        to = "super::subcategory::Column::Id"
    )]
    Subcategory,
    #[sea_orm(has_many = "super::addon::Entity")]
    Addon,
    #[sea_orm(has_many = "super::booking::Entity")]
    Booking,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::subcategory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subcategory.def()
    }
}

impl Related<super::addon::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Addon.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Booking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
