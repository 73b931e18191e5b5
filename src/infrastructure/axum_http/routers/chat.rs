use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use uuid::Uuid;

use crate::application::usecases::chat::ChatUseCase;
use crate::auth::AuthUser;
use crate::domain::repositories::messages::MessageRepository;
use crate::domain::value_objects::messages::SendMessageModel;
use crate::infrastructure::axum_http::error_responses::into_error_response;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad, repositories::messages::MessagePostgres,
};
use crate::infrastructure::realtime::hub::ChatHub;
use crate::infrastructure::realtime::socket::{ChatSocketState, ws_handler};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let message_repository = MessagePostgres::new(Arc::clone(&db_pool));
    let state = ChatSocketState {
        usecase: Arc::new(ChatUseCase::new(Arc::new(message_repository))),
        hub: Arc::new(ChatHub::new()),
    };

    Router::new()
        .route("/send", post(send_message))
        .route("/ws", get(ws_handler))
        .route("/:user_a/:user_b", get(history))
        .with_state(state)
}

/// Offline send path: persists only, no realtime push. The socket path is
/// the one that fans out.
pub async fn send_message<M>(
    State(state): State<ChatSocketState<M>>,
    auth: AuthUser,
    Json(model): Json<SendMessageModel>,
) -> impl IntoResponse
where
    M: MessageRepository + Send + Sync + 'static,
{
    match state.usecase.record_message(auth.user_id, model).await {
        Ok(message) => (StatusCode::CREATED, Json(message)).into_response(),
        Err(err) => into_error_response(err.status_code(), err),
    }
}

pub async fn history<M>(
    State(state): State<ChatSocketState<M>>,
    auth: AuthUser,
    Path((user_a, user_b)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse
where
    M: MessageRepository + Send + Sync + 'static,
{
    match state.usecase.history(auth.user_id, user_a, user_b).await {
        Ok(messages) => (StatusCode::OK, Json(messages)).into_response(),
        Err(err) => into_error_response(err.status_code(), err),
    }
}
