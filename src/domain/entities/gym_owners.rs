use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::gym_owners;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = gym_owners)]
pub struct GymOwnerEntity {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = gym_owners)]
pub struct InsertGymOwnerEntity {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
