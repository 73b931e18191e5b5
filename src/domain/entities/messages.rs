use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::messages;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = messages)]
pub struct MessageEntity {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = messages)]
pub struct InsertMessageEntity {
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub body: String,
}
