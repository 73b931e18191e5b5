use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::entities::messages::InsertMessageEntity;
use crate::domain::repositories::messages::MessageRepository;
use crate::domain::value_objects::messages::{MessageModel, SendMessageModel};

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not a participant in this chat")]
    Forbidden,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ChatError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            ChatError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ChatError::Forbidden => StatusCode::FORBIDDEN,
            ChatError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type ChatResult<T> = std::result::Result<T, ChatError>;

pub struct ChatUseCase<M>
where
    M: MessageRepository + Send + Sync + 'static,
{
    message_repository: Arc<M>,
}

impl<M> ChatUseCase<M>
where
    M: MessageRepository + Send + Sync + 'static,
{
    pub fn new(message_repository: Arc<M>) -> Self {
        Self { message_repository }
    }

    /// Persists one chat message. The declared sender must be the
    /// authenticated identity; delivery (if any) is the caller's concern.
    pub async fn record_message(
        &self,
        authenticated_id: Uuid,
        model: SendMessageModel,
    ) -> ChatResult<MessageModel> {
        if model.sender != authenticated_id {
            warn!(
                %authenticated_id,
                declared_sender = %model.sender,
                "chat: sender mismatch"
            );
            return Err(ChatError::Forbidden);
        }

        if model.text.trim().is_empty() {
            return Err(ChatError::InvalidInput(
                "Message text must not be empty".to_string(),
            ));
        }

        let message = self
            .message_repository
            .insert(InsertMessageEntity {
                sender_id: model.sender,
                receiver_id: model.receiver,
                body: model.text,
            })
            .await
            .map_err(|err| {
                error!(sender = %model.sender, db_error = ?err, "chat: message insert failed");
                ChatError::Internal(err)
            })?;

        info!(message_id = %message.id, "chat: message stored");
        Ok(MessageModel::from(message))
    }

    /// Conversation history between two participants, oldest first. Only a
    /// participant may read it.
    pub async fn history(
        &self,
        authenticated_id: Uuid,
        user_a: Uuid,
        user_b: Uuid,
    ) -> ChatResult<Vec<MessageModel>> {
        if authenticated_id != user_a && authenticated_id != user_b {
            warn!(
                %authenticated_id,
                %user_a,
                %user_b,
                "chat: history requested by non-participant"
            );
            return Err(ChatError::Forbidden);
        }

        let messages = self
            .message_repository
            .list_conversation(user_a, user_b)
            .await
            .map_err(|err| {
                error!(%user_a, %user_b, db_error = ?err, "chat: history load failed");
                ChatError::Internal(err)
            })?;

        Ok(messages.into_iter().map(MessageModel::from).collect())
    }
}
