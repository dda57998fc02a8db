//! Repository provider interface
//!
//! One trait bundling per-aggregate repository accessors, so services
//! depend on a single `Arc<dyn RepositoryProvider>` instead of five Arcs.

use crate::domain::addon::AddonRepository;
use crate::domain::booking::BookingRepository;
use crate::domain::category::{CategoryRepository, SubcategoryRepository};
use crate::domain::item::ItemRepository;

pub trait RepositoryProvider: Send + Sync {
    fn items(&self) -> &dyn ItemRepository;

    fn categories(&self) -> &dyn CategoryRepository;

    fn subcategories(&self) -> &dyn SubcategoryRepository;

    fn addons(&self) -> &dyn AddonRepository;

    fn bookings(&self) -> &dyn BookingRepository;
}
