use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::trainer_availability;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = trainer_availability)]
pub struct AvailabilityEntity {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub slots: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = trainer_availability)]
pub struct InsertAvailabilityEntity {
    pub trainer_id: Uuid,
    pub slots: Value,
}
