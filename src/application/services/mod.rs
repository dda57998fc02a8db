//! Application services

pub mod booking;
pub mod catalog;
pub mod pricing;
pub mod tax;

pub use booking::{BookingService, NewBooking, SlotReport};
pub use catalog::{
    CatalogService, CategoryUpdate, ItemUpdate, NewAddon, NewCategory, NewItem, NewSubcategory,
};
pub use pricing::{PriceBreakdown, PricingContext, PricingService, TaxBreakdown};
pub use tax::{EffectiveTax, TaxService};
