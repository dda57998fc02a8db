//! In-memory repository implementations for development and testing
//!
//! Mirrors the storage-level semantics of the SQL backend, including the
//! unique "one CONFIRMED booking per (item, date, slot start)" invariant:
//! the booking map insert runs under one lock, so the check-and-insert is
//! atomic exactly like the database unique index.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::addon::AddonRepository;
use crate::domain::booking::{Booking, BookingFilter, BookingRepository, BookingStatus};
use crate::domain::category::{CategoryRepository, SubcategoryRepository};
use crate::domain::item::{Item, ItemFilter, ItemRepository, TimeSlot};
use crate::domain::{
    Addon, Category, DomainError, DomainResult, RepositoryProvider, Subcategory,
};

#[derive(Default)]
pub struct InMemoryItemRepository {
    items: DashMap<Uuid, Item>,
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn save(&self, item: Item) -> DomainResult<()> {
        self.items.insert(item.id, item);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Item>> {
        Ok(self.items.get(&id).map(|e| e.value().clone()))
    }

    async fn update(&self, item: Item) -> DomainResult<()> {
        if !self.items.contains_key(&item.id) {
            return Err(DomainError::not_found("Item", item.id));
        }
        self.items.insert(item.id, item);
        Ok(())
    }

    async fn find_all(&self, filter: &ItemFilter) -> DomainResult<Vec<Item>> {
        let mut items: Vec<Item> = self
            .items
            .iter()
            .map(|e| e.value().clone())
            .filter(|i| {
                filter.category_id.map_or(true, |c| i.category_id == Some(c))
                    && filter
                        .subcategory_id
                        .map_or(true, |s| i.subcategory_id == Some(s))
                    && filter.active.map_or(true, |a| i.is_active == a)
            })
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }
}

#[derive(Default)]
pub struct InMemoryCategoryRepository {
    categories: DashMap<Uuid, Category>,
    subcategories: DashMap<Uuid, Subcategory>,
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn save(&self, category: Category) -> DomainResult<()> {
        self.categories.insert(category.id, category);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Category>> {
        Ok(self.categories.get(&id).map(|e| e.value().clone()))
    }

    async fn update(&self, category: Category) -> DomainResult<()> {
        if !self.categories.contains_key(&category.id) {
            return Err(DomainError::not_found("Category", category.id));
        }
        self.categories.insert(category.id, category);
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<Category>> {
        let mut all: Vec<Category> = self.categories.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }
}

#[async_trait]
impl SubcategoryRepository for InMemoryCategoryRepository {
    async fn save(&self, subcategory: Subcategory) -> DomainResult<()> {
        self.subcategories.insert(subcategory.id, subcategory);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Subcategory>> {
        Ok(self.subcategories.get(&id).map(|e| e.value().clone()))
    }

    async fn update(&self, subcategory: Subcategory) -> DomainResult<()> {
        if !self.subcategories.contains_key(&subcategory.id) {
            return Err(DomainError::not_found("Subcategory", subcategory.id));
        }
        self.subcategories.insert(subcategory.id, subcategory);
        Ok(())
    }

    async fn find_by_category(&self, category_id: Uuid) -> DomainResult<Vec<Subcategory>> {
        let mut subs: Vec<Subcategory> = self
            .subcategories
            .iter()
            .map(|e| e.value().clone())
            .filter(|s| s.category_id == category_id)
            .collect();
        subs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(subs)
    }
}

#[derive(Default)]
pub struct InMemoryAddonRepository {
    addons: DashMap<Uuid, Addon>,
}

#[async_trait]
impl AddonRepository for InMemoryAddonRepository {
    async fn save(&self, addon: Addon) -> DomainResult<()> {
        self.addons.insert(addon.id, addon);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Addon>> {
        Ok(self.addons.get(&id).map(|e| e.value().clone()))
    }

    async fn find_by_item(&self, item_id: Uuid) -> DomainResult<Vec<Addon>> {
        let mut addons: Vec<Addon> = self
            .addons
            .iter()
            .map(|e| e.value().clone())
            .filter(|a| a.item_id == item_id)
            .collect();
        addons.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(addons)
    }

    async fn find_selected(&self, item_id: Uuid, ids: &[Uuid]) -> DomainResult<Vec<Addon>> {
        Ok(self
            .addons
            .iter()
            .map(|e| e.value().clone())
            .filter(|a| a.item_id == item_id && a.is_active && ids.contains(&a.id))
            .collect())
    }
}

/// Booking storage behind a single lock so the uniqueness check and the
/// insert form one atomic step, matching the SQL unique index.
#[derive(Default)]
pub struct InMemoryBookingRepository {
    bookings: Mutex<HashMap<Uuid, Booking>>,
}

impl InMemoryBookingRepository {
    fn locked(&self) -> DomainResult<std::sync::MutexGuard<'_, HashMap<Uuid, Booking>>> {
        self.bookings
            .lock()
            .map_err(|_| DomainError::Storage("booking store lock poisoned".into()))
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn insert(&self, booking: Booking) -> DomainResult<Booking> {
        let mut store = self.locked()?;
        let occupied = store.values().any(|b| {
            b.status == BookingStatus::Confirmed
                && b.item_id == booking.item_id
                && b.date == booking.date
                && b.time_slot.start == booking.time_slot.start
        });
        if occupied {
            return Err(DomainError::Conflict("This slot is already booked".into()));
        }
        store.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>> {
        Ok(self.locked()?.get(&id).cloned())
    }

    async fn update(&self, booking: Booking) -> DomainResult<()> {
        let mut store = self.locked()?;
        if !store.contains_key(&booking.id) {
            return Err(DomainError::not_found("Booking", booking.id));
        }
        store.insert(booking.id, booking);
        Ok(())
    }

    async fn find_confirmed_for_date(
        &self,
        item_id: Uuid,
        date: NaiveDate,
    ) -> DomainResult<Vec<Booking>> {
        let store = self.locked()?;
        let mut found: Vec<Booking> = store
            .values()
            .filter(|b| {
                b.status == BookingStatus::Confirmed && b.item_id == item_id && b.date == date
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| a.time_slot.start.cmp(&b.time_slot.start));
        Ok(found)
    }

    async fn find_confirmed_for_slot(
        &self,
        item_id: Uuid,
        date: NaiveDate,
        slot: &TimeSlot,
    ) -> DomainResult<Option<Booking>> {
        let store = self.locked()?;
        Ok(store
            .values()
            .find(|b| {
                b.status == BookingStatus::Confirmed
                    && b.item_id == item_id
                    && b.date == date
                    && &b.time_slot == slot
            })
            .cloned())
    }

    async fn find_all(&self, filter: &BookingFilter) -> DomainResult<Vec<Booking>> {
        let store = self.locked()?;
        let mut found: Vec<Booking> = store
            .values()
            .filter(|b| {
                filter.item_id.map_or(true, |i| b.item_id == i)
                    && filter.date.map_or(true, |d| b.date == d)
                    && filter.status.map_or(true, |s| b.status == s)
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| a.time_slot.start.cmp(&b.time_slot.start))
        });
        Ok(found)
    }
}

/// In-memory `RepositoryProvider` for tests and `--memory` dev runs.
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    items: InMemoryItemRepository,
    categories: InMemoryCategoryRepository,
    addons: InMemoryAddonRepository,
    bookings: InMemoryBookingRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn items(&self) -> &dyn ItemRepository {
        &self.items
    }

    fn categories(&self) -> &dyn CategoryRepository {
        &self.categories
    }

    fn subcategories(&self) -> &dyn SubcategoryRepository {
        &self.categories
    }

    fn addons(&self) -> &dyn AddonRepository {
        &self.addons
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Booking;

    fn booking(item_id: Uuid, start: &str) -> Booking {
        Booking::new(
            item_id,
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            TimeSlot {
                start: start.into(),
                end: "10:00".into(),
            },
            "Alice",
            None,
        )
    }

    #[tokio::test]
    async fn duplicate_confirmed_insert_is_rejected_at_storage_level() {
        let repo = InMemoryBookingRepository::default();
        let item_id = Uuid::new_v4();

        // Bypass the service pre-check entirely: the store itself must
        // reject the second writer.
        repo.insert(booking(item_id, "09:00")).await.unwrap();
        let err = repo.insert(booking(item_id, "09:00")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn cancelled_row_does_not_block_insert() {
        let repo = InMemoryBookingRepository::default();
        let item_id = Uuid::new_v4();

        let first = repo.insert(booking(item_id, "09:00")).await.unwrap();
        let cancelled = first.cancelled().unwrap();
        repo.update(cancelled).await.unwrap();

        repo.insert(booking(item_id, "09:00")).await.unwrap();
    }

    #[tokio::test]
    async fn different_items_share_slot_freely() {
        let repo = InMemoryBookingRepository::default();
        repo.insert(booking(Uuid::new_v4(), "09:00")).await.unwrap();
        repo.insert(booking(Uuid::new_v4(), "09:00")).await.unwrap();
    }
}
