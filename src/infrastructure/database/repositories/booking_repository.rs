//! SeaORM implementation of BookingRepository
//!
//! The insert path translates a unique-index violation into
//! `DomainError::Conflict`, so a race lost at the storage boundary is
//! indistinguishable from one caught by the advisory pre-check.

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};
use uuid::Uuid;

use crate::domain::booking::{Booking, BookingFilter, BookingRepository, BookingStatus};
use crate::domain::item::TimeSlot;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::booking;

use super::db_err;

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: booking::Model) -> DomainResult<Booking> {
    let status = BookingStatus::from_str(&m.status)
        .ok_or_else(|| DomainError::Storage(format!("unknown booking status: {}", m.status)))?;

    Ok(Booking {
        id: m.id,
        item_id: m.item_id,
        date: m.date,
        time_slot: TimeSlot {
            start: m.slot_start,
            end: m.slot_end,
        },
        customer_name: m.customer_name,
        customer_email: m.customer_email,
        status,
        created_at: m.created_at,
    })
}

fn domain_to_active(b: Booking) -> booking::ActiveModel {
    booking::ActiveModel {
        id: Set(b.id),
        item_id: Set(b.item_id),
        date: Set(b.date),
        slot_start: Set(b.time_slot.start),
        slot_end: Set(b.time_slot.end),
        customer_name: Set(b.customer_name),
        customer_email: Set(b.customer_email),
        status: Set(b.status.as_str().to_string()),
        created_at: Set(b.created_at),
    }
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn insert(&self, b: Booking) -> DomainResult<Booking> {
        debug!(
            "Inserting booking: {} ({} {} {})",
            b.id, b.item_id, b.date, b.time_slot.start
        );

        let model = domain_to_active(b.clone());
        match model.insert(&self.db).await {
            Ok(_) => Ok(b),
            // Losing writer of a concurrent race: the partial unique index
            // on (item_id, date, slot_start) rejected the insert.
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(DomainError::Conflict("This slot is already booked".into()))
            }
            Err(e) => Err(db_err(e)),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn update(&self, b: Booking) -> DomainResult<()> {
        debug!("Updating booking: {} -> {}", b.id, b.status);

        let existing = booking::Entity::find_by_id(b.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("Booking", b.id));
        }

        domain_to_active(b).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_confirmed_for_date(
        &self,
        item_id: Uuid,
        date: NaiveDate,
    ) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::ItemId.eq(item_id))
            .filter(booking::Column::Date.eq(date))
            .filter(booking::Column::Status.eq(BookingStatus::Confirmed.as_str()))
            .order_by_asc(booking::Column::SlotStart)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_confirmed_for_slot(
        &self,
        item_id: Uuid,
        date: NaiveDate,
        slot: &TimeSlot,
    ) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find()
            .filter(booking::Column::ItemId.eq(item_id))
            .filter(booking::Column::Date.eq(date))
            .filter(booking::Column::SlotStart.eq(slot.start.as_str()))
            .filter(booking::Column::SlotEnd.eq(slot.end.as_str()))
            .filter(booking::Column::Status.eq(BookingStatus::Confirmed.as_str()))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_all(&self, filter: &BookingFilter) -> DomainResult<Vec<Booking>> {
        let mut query = booking::Entity::find();
        if let Some(item_id) = filter.item_id {
            query = query.filter(booking::Column::ItemId.eq(item_id));
        }
        if let Some(date) = filter.date {
            query = query.filter(booking::Column::Date.eq(date));
        }
        if let Some(status) = filter.status {
            query = query.filter(booking::Column::Status.eq(status.as_str()));
        }

        let models = query
            .order_by_desc(booking::Column::Date)
            .order_by_asc(booking::Column::SlotStart)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }
}
