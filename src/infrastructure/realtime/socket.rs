use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::application::usecases::chat::ChatUseCase;
use crate::auth::{self, AuthUser};
use crate::domain::repositories::messages::MessageRepository;
use crate::domain::value_objects::messages::{MessageModel, SendMessageModel};
use crate::infrastructure::realtime::hub::ChatHub;

/// Inbound frames. Event names are part of the wire protocol, hence the
/// explicit renames.
#[derive(Debug, Deserialize)]
#[serde(tag = "event", content = "data")]
enum ClientEvent {
    #[serde(rename = "sendMessage")]
    SendMessage(SendMessageModel),
}

#[derive(Debug, Serialize)]
#[serde(tag = "event", content = "data")]
enum ServerEvent {
    #[serde(rename = "receiveMessage")]
    ReceiveMessage(MessageModel),
}

#[derive(Debug, Deserialize)]
pub struct WsParams {
    token: Option<String>,
}

pub struct ChatSocketState<M>
where
    M: MessageRepository + Send + Sync + 'static,
{
    pub usecase: Arc<ChatUseCase<M>>,
    pub hub: Arc<ChatHub>,
}

impl<M> Clone for ChatSocketState<M>
where
    M: MessageRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            usecase: Arc::clone(&self.usecase),
            hub: Arc::clone(&self.hub),
        }
    }
}

/// Upgrades the connection after verifying the handshake token. A bad token
/// refuses the connection outright; no event is ever accepted unauthenticated.
pub async fn ws_handler<M>(
    ws: WebSocketUpgrade,
    Query(params): Query<WsParams>,
    headers: HeaderMap,
    State(state): State<ChatSocketState<M>>,
) -> impl IntoResponse
where
    M: MessageRepository + Send + Sync + 'static,
{
    let token = match handshake_token(&params, &headers) {
        Some(token) => token,
        None => {
            return (StatusCode::UNAUTHORIZED, "Missing handshake token").into_response();
        }
    };

    let auth_user = match auth::authenticate(&token) {
        Ok(auth_user) => auth_user,
        Err(err) => {
            warn!(error = %err, "chat ws: handshake rejected");
            return (StatusCode::UNAUTHORIZED, "Invalid or expired token").into_response();
        }
    };

    ws.on_upgrade(move |socket| handle_socket(socket, auth_user, state))
}

/// Browsers cannot set headers on WebSocket requests, so the token is also
/// accepted as a query parameter.
fn handshake_token(params: &WsParams, headers: &HeaderMap) -> Option<String> {
    if let Some(token) = &params.token {
        return Some(token.clone());
    }

    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}

/// Drives one authenticated connection: joins the identity's room, forwards
/// outbound frames from the hub, and relays inbound chat events.
async fn handle_socket<M>(socket: WebSocket, auth_user: AuthUser, state: ChatSocketState<M>)
where
    M: MessageRepository + Send + Sync + 'static,
{
    let user_id = auth_user.user_id;
    let (conn_id, mut rx) = state.hub.join(user_id).await;
    info!(%user_id, %conn_id, "chat ws: connected");

    let (mut sink, mut stream) = socket.split();

    let send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sink.send(frame).await.is_err() {
                break;
            }
        }
    });

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                let event = match serde_json::from_str::<ClientEvent>(&text) {
                    Ok(event) => event,
                    Err(err) => {
                        debug!(%conn_id, parse_error = %err, "chat ws: unparseable frame");
                        continue;
                    }
                };

                let ClientEvent::SendMessage(model) = event;

                // Fail closed on spoofed senders: drop without an error frame.
                if model.sender != user_id {
                    warn!(
                        %user_id,
                        declared_sender = %model.sender,
                        "chat ws: dropped event with spoofed sender"
                    );
                    continue;
                }

                let receiver = model.receiver;
                match state.usecase.record_message(user_id, model).await {
                    Ok(message) => {
                        deliver(&state.hub, receiver, user_id, message).await;
                    }
                    Err(err) => {
                        warn!(%user_id, error = %err, "chat ws: message rejected");
                    }
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(err) => {
                debug!(%conn_id, error = %err, "chat ws: receive error");
                break;
            }
        }
    }

    state.hub.leave(user_id, conn_id).await;
    send_task.abort();
    info!(%user_id, %conn_id, "chat ws: disconnected");
}

/// Pushes the stored message to both rooms so the sender's other devices see
/// their own message too. Empty rooms are fine; the message is already
/// persisted and delivery is best-effort.
async fn deliver(hub: &ChatHub, receiver: uuid::Uuid, sender: uuid::Uuid, message: MessageModel) {
    let payload = match serde_json::to_string(&ServerEvent::ReceiveMessage(message)) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(error = %err, "chat ws: failed to encode delivery frame");
            return;
        }
    };

    let to_receiver = hub
        .send_to_user(receiver, Message::Text(payload.clone()))
        .await;
    let to_sender = hub.send_to_user(sender, Message::Text(payload)).await;
    debug!(to_receiver, to_sender, "chat ws: frame fanned out");
}
