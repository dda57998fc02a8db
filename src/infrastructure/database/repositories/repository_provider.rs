//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::addon::AddonRepository;
use crate::domain::booking::BookingRepository;
use crate::domain::category::{CategoryRepository, SubcategoryRepository};
use crate::domain::item::ItemRepository;
use crate::domain::repositories::RepositoryProvider;

use super::addon_repository::SeaOrmAddonRepository;
use super::booking_repository::SeaOrmBookingRepository;
use super::category_repository::{SeaOrmCategoryRepository, SeaOrmSubcategoryRepository};
use super::item_repository::SeaOrmItemRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository
/// accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let item = repos.items().find_by_id(id).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    items: SeaOrmItemRepository,
    categories: SeaOrmCategoryRepository,
    subcategories: SeaOrmSubcategoryRepository,
    addons: SeaOrmAddonRepository,
    bookings: SeaOrmBookingRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            items: SeaOrmItemRepository::new(db.clone()),
            categories: SeaOrmCategoryRepository::new(db.clone()),
            subcategories: SeaOrmSubcategoryRepository::new(db.clone()),
            addons: SeaOrmAddonRepository::new(db.clone()),
            bookings: SeaOrmBookingRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn items(&self) -> &dyn ItemRepository {
        &self.items
    }

    fn categories(&self) -> &dyn CategoryRepository {
        &self.categories
    }

    fn subcategories(&self) -> &dyn SubcategoryRepository {
        &self.subcategories
    }

    fn addons(&self) -> &dyn AddonRepository {
        &self.addons
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }
}
