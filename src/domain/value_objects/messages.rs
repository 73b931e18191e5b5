use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::messages::MessageEntity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageModel {
    pub sender: Uuid,
    pub receiver: Uuid,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageModel {
    pub id: Uuid,
    pub sender: Uuid,
    pub receiver: Uuid,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl From<MessageEntity> for MessageModel {
    fn from(entity: MessageEntity) -> Self {
        Self {
            id: entity.id,
            sender: entity.sender_id,
            receiver: entity.receiver_id,
            text: entity.body,
            sent_at: entity.sent_at,
        }
    }
}
