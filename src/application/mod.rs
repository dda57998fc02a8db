//! Application layer: business services over the domain.

pub mod services;

pub use services::{BookingService, CatalogService, PricingService, TaxService};
