use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::trainers;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = trainers)]
pub struct TrainerEntity {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub specialties: Vec<String>,
    pub experience_years: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = trainers)]
pub struct InsertTrainerEntity {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub specialties: Vec<String>,
    pub experience_years: Option<i32>,
}
