//! Slot availability and booking lifecycle
//!
//! Creation walks a short-circuiting validation sequence (item, weekday,
//! slot catalog, conflict pre-check) and then inserts. The pre-check is
//! advisory; the storage unique index on `(item, date, slot start)` is the
//! authoritative guard, and its rejection surfaces as the same `Conflict`.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::item::weekday_name;
use crate::domain::{
    Booking, BookingFilter, DomainError, DomainResult, Item, RepositoryProvider, TimeSlot,
};

/// Input for creating a booking.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub item_id: Uuid,
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub customer_name: String,
    pub customer_email: Option<String>,
}

/// Availability report for one item and date.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SlotReport {
    pub date: NaiveDate,
    /// Weekday name for `date`
    pub day: String,
    pub total_slots: usize,
    pub booked_slots: usize,
    /// Free slots, catalog order preserved
    pub available_slots: Vec<TimeSlot>,
    /// Set when the item is closed on this weekday
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    async fn bookable_item(&self, item_id: Uuid) -> DomainResult<Item> {
        let item = self
            .repos
            .items()
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Item", item_id))?;

        if !item.is_bookable {
            return Err(DomainError::InvalidState(
                "This item is not bookable".into(),
            ));
        }
        Ok(item)
    }

    /// Free slots for an item on a date.
    ///
    /// A weekday outside the item's availability pattern is a valid
    /// "no availability" result, not an error.
    pub async fn available_slots(&self, item_id: Uuid, date: NaiveDate) -> DomainResult<SlotReport> {
        let item = self.bookable_item(item_id).await?;
        let day = weekday_name(date);

        if !item.allows_weekday(&day) {
            return Ok(SlotReport {
                date,
                day,
                total_slots: 0,
                booked_slots: 0,
                available_slots: vec![],
                message: Some("Item not available on this day".into()),
            });
        }

        let booked = self
            .repos
            .bookings()
            .find_confirmed_for_date(item_id, date)
            .await?;

        let available_slots: Vec<TimeSlot> = item
            .slot_catalog()
            .iter()
            .filter(|slot| !booked.iter().any(|b| &b.time_slot == *slot))
            .cloned()
            .collect();

        Ok(SlotReport {
            date,
            day,
            total_slots: item.slot_catalog().len(),
            booked_slots: booked.len(),
            available_slots,
            message: None,
        })
    }

    /// Create a CONFIRMED booking, enforcing slot uniqueness.
    pub async fn create(&self, data: NewBooking) -> DomainResult<Booking> {
        let item = self.bookable_item(data.item_id).await?;

        let day = weekday_name(data.date);
        if !item.allows_weekday(&day) {
            return Err(DomainError::Validation(format!(
                "Item not available on {}",
                day
            )));
        }

        if !item.has_slot(&data.time_slot) {
            return Err(DomainError::Validation("Invalid time slot".into()));
        }

        // Advisory early exit; the insert below is the real guard.
        let existing = self
            .repos
            .bookings()
            .find_confirmed_for_slot(data.item_id, data.date, &data.time_slot)
            .await?;
        if existing.is_some() {
            return Err(DomainError::Conflict("This slot is already booked".into()));
        }

        let booking = Booking::new(
            data.item_id,
            data.date,
            data.time_slot,
            data.customer_name,
            data.customer_email,
        );
        let booking = self.repos.bookings().insert(booking).await?;

        info!(
            booking = %booking.id,
            item = %booking.item_id,
            date = %booking.date,
            slot = %booking.time_slot.start,
            "booking created"
        );
        Ok(booking)
    }

    /// Cancel a booking. Load, compute the next immutable value, persist.
    pub async fn cancel(&self, id: Uuid) -> DomainResult<Booking> {
        let booking = self
            .repos
            .bookings()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", id))?;

        let cancelled = booking.cancelled()?;
        self.repos.bookings().update(cancelled.clone()).await?;

        info!(booking = %id, "booking cancelled");
        Ok(cancelled)
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Booking> {
        self.repos
            .bookings()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", id))
    }

    /// Filter/sort pass-through over stored bookings.
    pub async fn list(&self, filter: BookingFilter) -> DomainResult<Vec<Booking>> {
        self.repos.bookings().find_all(&filter).await
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Availability, BookingStatus, Category, PricingRule};
    use crate::infrastructure::storage::memory::InMemoryRepositoryProvider;
    use chrono::Utc;

    // 2025-06-02 is a Monday.
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    fn slot(start: &str, end: &str) -> TimeSlot {
        TimeSlot {
            start: start.into(),
            end: end.into(),
        }
    }

    async fn seed_item(
        repos: &Arc<InMemoryRepositoryProvider>,
        days: Option<Vec<String>>,
        bookable: bool,
    ) -> Uuid {
        let category = Category {
            id: Uuid::new_v4(),
            name: "Rooms".into(),
            description: None,
            image: None,
            tax_applicable: false,
            tax_percentage: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let cat_id = category.id;
        repos.categories().save(category).await.unwrap();

        let item = Item {
            id: Uuid::new_v4(),
            name: "Tennis court".into(),
            description: None,
            image: None,
            category_id: Some(cat_id),
            subcategory_id: None,
            tax_applicable: None,
            tax_percentage: None,
            pricing: PricingRule::Static { price: 20.0 },
            is_bookable: bookable,
            availability: Some(Availability {
                days,
                time_slots: vec![slot("09:00", "10:00"), slot("10:00", "11:00")],
            }),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let item_id = item.id;
        repos.items().save(item).await.unwrap();
        item_id
    }

    fn new_booking(item_id: Uuid, time_slot: TimeSlot) -> NewBooking {
        NewBooking {
            item_id,
            date: monday(),
            time_slot,
            customer_name: "Alice".into(),
            customer_email: None,
        }
    }

    #[tokio::test]
    async fn booked_slot_is_filtered_out() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let item_id = seed_item(&repos, None, true).await;
        let service = BookingService::new(repos.clone());

        service
            .create(new_booking(item_id, slot("09:00", "10:00")))
            .await
            .unwrap();

        let report = service.available_slots(item_id, monday()).await.unwrap();
        assert_eq!(report.day, "Monday");
        assert_eq!(report.total_slots, 2);
        assert_eq!(report.booked_slots, 1);
        assert_eq!(report.available_slots, vec![slot("10:00", "11:00")]);
        assert!(report.message.is_none());
    }

    #[tokio::test]
    async fn closed_weekday_reports_empty_not_error() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let item_id = seed_item(&repos, Some(vec!["Tuesday".into()]), true).await;
        let service = BookingService::new(repos.clone());

        let report = service.available_slots(item_id, monday()).await.unwrap();
        assert!(report.available_slots.is_empty());
        assert_eq!(
            report.message.as_deref(),
            Some("Item not available on this day")
        );
    }

    #[tokio::test]
    async fn create_rejects_closed_weekday() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let item_id = seed_item(&repos, Some(vec!["Tuesday".into()]), true).await;
        let service = BookingService::new(repos.clone());

        let err = service
            .create(new_booking(item_id, slot("09:00", "10:00")))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn create_rejects_unknown_slot() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let item_id = seed_item(&repos, None, true).await;
        let service = BookingService::new(repos.clone());

        let err = service
            .create(new_booking(item_id, slot("09:30", "10:30")))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn create_rejects_non_bookable_item() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let item_id = seed_item(&repos, None, false).await;
        let service = BookingService::new(repos.clone());

        let err = service
            .create(new_booking(item_id, slot("09:00", "10:00")))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));
    }

    #[tokio::test]
    async fn double_booking_is_a_conflict() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let item_id = seed_item(&repos, None, true).await;
        let service = BookingService::new(repos.clone());

        service
            .create(new_booking(item_id, slot("09:00", "10:00")))
            .await
            .unwrap();
        let err = service
            .create(new_booking(item_id, slot("09:00", "10:00")))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn cancelled_slot_can_be_rebooked() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let item_id = seed_item(&repos, None, true).await;
        let service = BookingService::new(repos.clone());

        let booking = service
            .create(new_booking(item_id, slot("09:00", "10:00")))
            .await
            .unwrap();
        service.cancel(booking.id).await.unwrap();

        // Slot freed up; a new booking may take it.
        service
            .create(new_booking(item_id, slot("09:00", "10:00")))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn cancel_twice_fails_and_mutates_nothing() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let item_id = seed_item(&repos, None, true).await;
        let service = BookingService::new(repos.clone());

        let booking = service
            .create(new_booking(item_id, slot("09:00", "10:00")))
            .await
            .unwrap();
        service.cancel(booking.id).await.unwrap();

        let err = service.cancel(booking.id).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));

        let stored = service.get(booking.id).await.unwrap();
        assert_eq!(stored.status, BookingStatus::Cancelled);
    }

    #[tokio::test]
    async fn concurrent_creates_yield_one_confirmed_one_conflict() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let item_id = seed_item(&repos, None, true).await;
        let service = Arc::new(BookingService::new(repos.clone()));

        let (a, b) = tokio::join!(
            {
                let s = service.clone();
                async move { s.create(new_booking(item_id, slot("09:00", "10:00"))).await }
            },
            {
                let s = service.clone();
                async move { s.create(new_booking(item_id, slot("09:00", "10:00"))).await }
            }
        );

        let outcomes = [a, b];
        let confirmed = outcomes.iter().filter(|r| r.is_ok()).count();
        let conflicts = outcomes
            .iter()
            .filter(|r| matches!(r, Err(DomainError::Conflict(_))))
            .count();
        assert_eq!(confirmed, 1);
        assert_eq!(conflicts, 1);

        let report = service.available_slots(item_id, monday()).await.unwrap();
        assert_eq!(report.booked_slots, 1);
    }

    #[tokio::test]
    async fn list_filters_by_status() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let item_id = seed_item(&repos, None, true).await;
        let service = BookingService::new(repos.clone());

        let first = service
            .create(new_booking(item_id, slot("09:00", "10:00")))
            .await
            .unwrap();
        service
            .create(new_booking(item_id, slot("10:00", "11:00")))
            .await
            .unwrap();
        service.cancel(first.id).await.unwrap();

        let confirmed = service
            .list(BookingFilter {
                item_id: Some(item_id),
                status: Some(BookingStatus::Confirmed),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0].time_slot, slot("10:00", "11:00"));
    }
}
