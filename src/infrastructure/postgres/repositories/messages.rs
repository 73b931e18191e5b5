use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*};
use uuid::Uuid;

use crate::domain::entities::messages::{InsertMessageEntity, MessageEntity};
use crate::domain::repositories::messages::MessageRepository;
use crate::infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::messages};

pub struct MessagePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl MessagePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl MessageRepository for MessagePostgres {
    async fn insert(&self, insert_message_entity: InsertMessageEntity) -> Result<MessageEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(messages::table)
            .values(&insert_message_entity)
            .returning(MessageEntity::as_returning())
            .get_result::<MessageEntity>(&mut conn)?;

        Ok(result)
    }

    async fn list_conversation(&self, user_a: Uuid, user_b: Uuid) -> Result<Vec<MessageEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = messages::table
            .filter(
                messages::sender_id
                    .eq(user_a)
                    .and(messages::receiver_id.eq(user_b))
                    .or(messages::sender_id
                        .eq(user_b)
                        .and(messages::receiver_id.eq(user_a))),
            )
            .order(messages::sent_at.asc())
            .select(MessageEntity::as_select())
            .load::<MessageEntity>(&mut conn)?;

        Ok(results)
    }
}
