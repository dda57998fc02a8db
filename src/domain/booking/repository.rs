//! Booking repository interface

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use super::model::{Booking, BookingStatus};
use crate::domain::item::TimeSlot;
use crate::domain::DomainResult;

/// Filter for booking listings.
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub item_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub status: Option<BookingStatus>,
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a new booking.
    ///
    /// The storage layer enforces uniqueness on `(item_id, date,
    /// slot start)` for CONFIRMED rows; a uniqueness rejection is
    /// surfaced as `DomainError::Conflict` so races between the advisory
    /// pre-check and the insert collapse into the same caller-visible
    /// outcome.
    async fn insert(&self, booking: Booking) -> DomainResult<Booking>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>>;

    /// Replace an existing booking with the given value
    async fn update(&self, booking: Booking) -> DomainResult<()>;

    /// All CONFIRMED bookings for an item on a date
    async fn find_confirmed_for_date(
        &self,
        item_id: Uuid,
        date: NaiveDate,
    ) -> DomainResult<Vec<Booking>>;

    /// CONFIRMED booking occupying exactly this slot, if any
    async fn find_confirmed_for_slot(
        &self,
        item_id: Uuid,
        date: NaiveDate,
        slot: &TimeSlot,
    ) -> DomainResult<Option<Booking>>;

    /// Bookings matching the filter, date descending then slot start ascending
    async fn find_all(&self, filter: &BookingFilter) -> DomainResult<Vec<Booking>>;
}
