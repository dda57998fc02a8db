//! Booking domain entity

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::item::TimeSlot;
use crate::domain::{DomainError, DomainResult};

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// Active booking occupying its slot
    Confirmed,
    /// Cancelled by the customer or staff; terminal
    Cancelled,
    /// Kept for reporting; no transition into it is exercised here
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
            Self::Completed => "COMPLETED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "CONFIRMED" => Some(Self::Confirmed),
            "CANCELLED" => Some(Self::Cancelled),
            "COMPLETED" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A booking for one item, date and slot.
///
/// Bookings are never physically deleted; cancellation flips the status.
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: Uuid,
    pub item_id: Uuid,
    /// Calendar date, no time component
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(
        item_id: Uuid,
        date: NaiveDate,
        time_slot: TimeSlot,
        customer_name: impl Into<String>,
        customer_email: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            item_id,
            date,
            time_slot,
            customer_name: customer_name.into(),
            customer_email,
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }

    /// Next value after cancellation. Cancelling twice is a state error;
    /// the caller persists the returned value as a whole.
    pub fn cancelled(mut self) -> DomainResult<Self> {
        if self.status == BookingStatus::Cancelled {
            return Err(DomainError::InvalidState(
                "Booking already cancelled".into(),
            ));
        }
        self.status = BookingStatus::Cancelled;
        Ok(self)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_booking() -> Booking {
        Booking::new(
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            TimeSlot {
                start: "09:00".into(),
                end: "10:00".into(),
            },
            "Alice",
            Some("alice@example.com".into()),
        )
    }

    #[test]
    fn new_booking_is_confirmed() {
        let b = sample_booking();
        assert!(b.is_confirmed());
        assert_eq!(b.status, BookingStatus::Confirmed);
    }

    #[test]
    fn cancel_sets_cancelled() {
        let b = sample_booking().cancelled().unwrap();
        assert_eq!(b.status, BookingStatus::Cancelled);
        assert!(!b.is_confirmed());
    }

    #[test]
    fn cancel_twice_is_invalid_state() {
        let b = sample_booking().cancelled().unwrap();
        assert!(matches!(
            b.cancelled(),
            Err(DomainError::InvalidState(_))
        ));
    }

    #[test]
    fn status_roundtrip() {
        for status in &[
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
            BookingStatus::Completed,
        ] {
            assert_eq!(BookingStatus::from_str(status.as_str()), Some(*status));
        }
        assert_eq!(BookingStatus::from_str("PENDING"), None);
    }
}
