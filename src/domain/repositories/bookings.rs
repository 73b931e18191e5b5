use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::bookings::{BookingEntity, InsertBookingEntity};

/// Insert failure split out so the use case can tell a lost uniqueness race
/// apart from an infrastructure fault.
#[derive(Debug, Error)]
pub enum CreateBookingError {
    #[error("an active booking already exists for this slot")]
    DuplicateSlot,
    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository {
    /// Persists the booking and, when `charge_minor` is set, adds it to the
    /// client's balance in the same database transaction.
    async fn create(
        &self,
        insert_booking_entity: InsertBookingEntity,
        charge_minor: Option<i64>,
    ) -> Result<BookingEntity, CreateBookingError>;

    /// The non-cancelled booking occupying (trainer, client, instant), if any.
    async fn find_active_slot(
        &self,
        trainer_id: Uuid,
        client_id: Uuid,
        session_time: DateTime<Utc>,
    ) -> Result<Option<BookingEntity>>;

    async fn find_by_id(&self, booking_id: Uuid) -> Result<Option<BookingEntity>>;

    /// Client's bookings ascending by session time, with the trainer's
    /// username and specialties joined in.
    async fn list_for_client(
        &self,
        client_id: Uuid,
    ) -> Result<Vec<(BookingEntity, String, Vec<String>)>>;

    /// Non-cancelled bookings for the client with `from <= session_time < to`.
    async fn count_active_for_client_between(
        &self,
        client_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64>;

    async fn cancel(&self, booking_id: Uuid) -> Result<BookingEntity>;
}
