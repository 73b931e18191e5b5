use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::messages::{InsertMessageEntity, MessageEntity};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository {
    async fn insert(&self, insert_message_entity: InsertMessageEntity) -> Result<MessageEntity>;
    /// All messages between the unordered pair, ascending by sent time.
    async fn list_conversation(&self, user_a: Uuid, user_b: Uuid) -> Result<Vec<MessageEntity>>;
}
