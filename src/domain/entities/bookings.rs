use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::bookings;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = bookings)]
pub struct BookingEntity {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub client_id: Uuid,
    pub session_time: DateTime<Utc>,
    pub status: String,
    pub session_cost_minor: Option<i64>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub struct InsertBookingEntity {
    pub trainer_id: Uuid,
    pub client_id: Uuid,
    pub session_time: DateTime<Utc>,
    pub status: String,
    pub session_cost_minor: Option<i64>,
}
