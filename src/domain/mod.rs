//! Domain layer: entities, value types, repository interfaces, errors.

pub mod addon;
pub mod booking;
pub mod category;
pub mod error;
pub mod item;
pub mod repositories;

// Re-export commonly used types
pub use addon::Addon;
pub use booking::{Booking, BookingFilter, BookingStatus};
pub use category::{Category, Subcategory};
pub use error::{DomainError, DomainResult};
pub use item::{
    Availability, DiscountType, Item, ItemFilter, PricingDetail, PricingRule, Tier, TimeSlot,
    TimeWindow,
};
pub use repositories::RepositoryProvider;
