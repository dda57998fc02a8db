//! Item aggregate
//!
//! Contains the Item entity, pricing rule types, and repository interface.

pub mod model;
pub mod repository;

pub use model::{
    slot_minutes, weekday_name, Availability, DiscountType, Item, PricingDetail, PricingRule,
    Tier, TimeSlot, TimeWindow, WEEKDAY_NAMES,
};
pub use repository::{ItemFilter, ItemRepository};
