use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::bookings::BookingEntity;
use crate::domain::value_objects::enums::booking_statuses::BookingStatus;

/// Booking request body. Trainer id and session time arrive as strings so
/// malformed values surface as a domain-level invalid-input error instead of
/// a deserialization rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSessionModel {
    pub trainer_id: String,
    pub session_time: String,
    pub session_cost_minor: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingModel {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub client_id: Uuid,
    pub session_time: DateTime<Utc>,
    pub status: BookingStatus,
    pub session_cost_minor: Option<i64>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<BookingEntity> for BookingModel {
    fn from(entity: BookingEntity) -> Self {
        let status = BookingStatus::try_from(entity.status.as_str()).unwrap_or_default();
        Self {
            id: entity.id,
            trainer_id: entity.trainer_id,
            client_id: entity.client_id,
            session_time: entity.session_time,
            status,
            session_cost_minor: entity.session_cost_minor,
            canceled_at: entity.canceled_at,
            created_at: entity.created_at,
        }
    }
}

/// Client-facing booking row with the trainer's display fields joined in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientBookingView {
    #[serde(flatten)]
    pub booking: BookingModel,
    pub trainer_username: String,
    pub trainer_specialties: Vec<String>,
}

impl From<(BookingEntity, String, Vec<String>)> for ClientBookingView {
    fn from((entity, trainer_username, trainer_specialties): (BookingEntity, String, Vec<String>)) -> Self {
        Self {
            booking: BookingModel::from(entity),
            trainer_username,
            trainer_specialties,
        }
    }
}
