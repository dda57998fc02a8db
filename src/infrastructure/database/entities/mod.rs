//! SeaORM entities

pub mod addon;
pub mod booking;
pub mod category;
pub mod item;
pub mod subcategory;
