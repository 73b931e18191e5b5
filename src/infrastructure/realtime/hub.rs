use std::collections::HashMap;

use axum::extract::ws::Message;
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

/// Channel sender half for pushing frames to one WebSocket connection.
pub type ChannelSender = mpsc::UnboundedSender<Message>;

/// In-memory registry of live connections, keyed by the authenticated
/// identity's id. A user may hold several connections at once (several
/// devices); delivering to a user means fanning out to all of them.
///
/// Thread-safe via interior `RwLock`; wrapped in `Arc` and shared across
/// the socket handlers.
pub struct ChatHub {
    rooms: RwLock<HashMap<Uuid, HashMap<Uuid, ChannelSender>>>,
}

impl ChatHub {
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a connection under the user's room. Returns the connection
    /// id and the receiver half the socket task forwards to its sink.
    pub async fn join(&self, user_id: Uuid) -> (Uuid, mpsc::UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn_id = Uuid::new_v4();

        self.rooms
            .write()
            .await
            .entry(user_id)
            .or_default()
            .insert(conn_id, tx);

        (conn_id, rx)
    }

    /// Drops one connection; the room itself is removed once empty.
    pub async fn leave(&self, user_id: Uuid, conn_id: Uuid) {
        let mut rooms = self.rooms.write().await;
        if let Some(room) = rooms.get_mut(&user_id) {
            room.remove(&conn_id);
            if room.is_empty() {
                rooms.remove(&user_id);
            }
        }
    }

    /// Delivers a frame to every connection in the user's room. An empty or
    /// absent room is fine; delivery is best-effort. Connections whose send
    /// channels are closed are skipped (they clean up on their next loop
    /// iteration). Returns the number of connections reached.
    pub async fn send_to_user(&self, user_id: Uuid, message: Message) -> usize {
        let rooms = self.rooms.read().await;
        let Some(room) = rooms.get(&user_id) else {
            return 0;
        };

        let mut delivered = 0;
        for sender in room.values() {
            if sender.send(message.clone()).is_ok() {
                delivered += 1;
            }
        }
        delivered
    }

    pub async fn connection_count(&self) -> usize {
        self.rooms.read().await.values().map(HashMap::len).sum()
    }
}

impl Default for ChatHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_to_every_connection_of_a_user() {
        let hub = ChatHub::new();
        let user = Uuid::new_v4();

        let (_, mut rx_a) = hub.join(user).await;
        let (_, mut rx_b) = hub.join(user).await;

        let delivered = hub
            .send_to_user(user, Message::Text("ping".to_string()))
            .await;

        assert_eq!(delivered, 2);
        assert!(matches!(rx_a.recv().await, Some(Message::Text(t)) if t == "ping"));
        assert!(matches!(rx_b.recv().await, Some(Message::Text(t)) if t == "ping"));
    }

    #[tokio::test]
    async fn delivery_to_an_empty_room_is_a_noop() {
        let hub = ChatHub::new();
        let delivered = hub
            .send_to_user(Uuid::new_v4(), Message::Text("ping".to_string()))
            .await;
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn other_users_do_not_receive_the_frame() {
        let hub = ChatHub::new();
        let user = Uuid::new_v4();
        let bystander = Uuid::new_v4();

        let (_, _rx) = hub.join(user).await;
        let (_, mut bystander_rx) = hub.join(bystander).await;

        hub.send_to_user(user, Message::Text("ping".to_string()))
            .await;

        assert!(bystander_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn leave_removes_the_connection_and_empty_room() {
        let hub = ChatHub::new();
        let user = Uuid::new_v4();

        let (conn_id, _rx) = hub.join(user).await;
        assert_eq!(hub.connection_count().await, 1);

        hub.leave(user, conn_id).await;
        assert_eq!(hub.connection_count().await, 0);
        assert_eq!(
            hub.send_to_user(user, Message::Text("ping".to_string())).await,
            0
        );
    }
}
