use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::result::DatabaseErrorKind;
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use uuid::Uuid;

use crate::domain::entities::bookings::{BookingEntity, InsertBookingEntity};
use crate::domain::repositories::bookings::{BookingRepository, CreateBookingError};
use crate::domain::value_objects::enums::booking_statuses::BookingStatus;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad,
    schema::{bookings, trainers, users},
};

pub struct BookingPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl BookingPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl BookingRepository for BookingPostgres {
    async fn create(
        &self,
        insert_booking_entity: InsertBookingEntity,
        charge_minor: Option<i64>,
    ) -> Result<BookingEntity, CreateBookingError> {
        let mut conn = Arc::clone(&self.db_pool)
            .get()
            .map_err(|err| CreateBookingError::Database(err.into()))?;

        // Booking insert and balance charge commit or roll back together.
        let result = conn.transaction::<BookingEntity, diesel::result::Error, _>(|conn| {
            let booking = insert_into(bookings::table)
                .values(&insert_booking_entity)
                .returning(BookingEntity::as_returning())
                .get_result::<BookingEntity>(conn)?;

            if let Some(charge) = charge_minor {
                update(users::table.filter(users::id.eq(insert_booking_entity.client_id)))
                    .set((
                        users::balance_due_minor.eq(users::balance_due_minor + charge),
                        users::updated_at.eq(Utc::now()),
                    ))
                    .execute(conn)?;
            }

            Ok(booking)
        });

        match result {
            Ok(booking) => Ok(booking),
            Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                Err(CreateBookingError::DuplicateSlot)
            }
            Err(err) => Err(CreateBookingError::Database(err.into())),
        }
    }

    async fn find_active_slot(
        &self,
        trainer_id: Uuid,
        client_id: Uuid,
        session_time: DateTime<Utc>,
    ) -> Result<Option<BookingEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = bookings::table
            .filter(bookings::trainer_id.eq(trainer_id))
            .filter(bookings::client_id.eq(client_id))
            .filter(bookings::session_time.eq(session_time))
            .filter(bookings::status.ne(BookingStatus::Cancelled.to_string()))
            .select(BookingEntity::as_select())
            .first::<BookingEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_by_id(&self, booking_id: Uuid) -> Result<Option<BookingEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = bookings::table
            .find(booking_id)
            .select(BookingEntity::as_select())
            .first::<BookingEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn list_for_client(
        &self,
        client_id: Uuid,
    ) -> Result<Vec<(BookingEntity, String, Vec<String>)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = bookings::table
            .inner_join(trainers::table)
            .filter(bookings::client_id.eq(client_id))
            .order(bookings::session_time.asc())
            .select((
                BookingEntity::as_select(),
                trainers::username,
                trainers::specialties,
            ))
            .load::<(BookingEntity, String, Vec<String>)>(&mut conn)?;

        Ok(results)
    }

    async fn count_active_for_client_between(
        &self,
        client_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = bookings::table
            .filter(bookings::client_id.eq(client_id))
            .filter(bookings::status.ne(BookingStatus::Cancelled.to_string()))
            .filter(bookings::session_time.ge(from))
            .filter(bookings::session_time.lt(to))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }

    async fn cancel(&self, booking_id: Uuid) -> Result<BookingEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(bookings::table.find(booking_id))
            .set((
                bookings::status.eq(BookingStatus::Cancelled.to_string()),
                bookings::canceled_at.eq(Some(Utc::now())),
            ))
            .returning(BookingEntity::as_returning())
            .get_result::<BookingEntity>(&mut conn)?;

        Ok(result)
    }
}
