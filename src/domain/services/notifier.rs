use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;
use tokio::sync::{broadcast, mpsc::UnboundedSender};
use tracing::debug;
use uuid::Uuid;

const BROADCAST_CAPACITY: usize = 256;

struct Connection {
    conn_id: Uuid,
    tx: UnboundedSender<String>,
}

/// Process-wide registry of realtime connections, injected through `AppState`.
///
/// Maps a user id to at most one live connection; when a user opens a second
/// session the latest registration wins. Targeted sends are best effort: a
/// user without a registered connection simply receives nothing. Broadcasts
/// go out over a separate channel that every open socket subscribes to on
/// connect, registered or not.
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<String, Connection>>,
    broadcast_tx: broadcast::Sender<String>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        let (broadcast_tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            connections: RwLock::new(HashMap::new()),
            broadcast_tx,
        }
    }

    /// Binds `user_id` to a connection. Replaces any previous binding.
    pub fn register(&self, user_id: &str, conn_id: Uuid, tx: UnboundedSender<String>) {
        let mut connections = self.connections.write().unwrap();
        connections.insert(user_id.to_string(), Connection { conn_id, tx });
        debug!("Registered realtime connection {} for user {}", conn_id, user_id);
    }

    /// Removes the binding for `user_id`, but only when it still refers to
    /// `conn_id`. A stale connection closing must not evict the newer session
    /// that replaced it.
    pub fn unregister(&self, user_id: &str, conn_id: Uuid) {
        let mut connections = self.connections.write().unwrap();
        if connections.get(user_id).is_some_and(|c| c.conn_id == conn_id) {
            connections.remove(user_id);
            debug!("Unregistered realtime connection {} for user {}", conn_id, user_id);
        }
    }

    /// Fire-and-forget targeted delivery. Returns whether a registered
    /// connection existed at send time; a send to a closed channel counts as
    /// not delivered.
    pub fn notify_user(&self, user_id: &str, payload: &Value) -> bool {
        let connections = self.connections.read().unwrap();
        match connections.get(user_id) {
            Some(connection) => connection.tx.send(payload.to_string()).is_ok(),
            None => {
                debug!("User {} is not currently connected. Notification not sent.", user_id);
                false
            }
        }
    }

    /// Fire-and-forget delivery to every open socket.
    pub fn broadcast(&self, payload: &Value) {
        let _ = self.broadcast_tx.send(payload.to_string());
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.broadcast_tx.subscribe()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::sync::mpsc;

    #[test]
    fn notify_without_registration_is_dropped() {
        let registry = ConnectionRegistry::new();
        assert!(!registry.notify_user("u1", &json!({"message": "hello"})));
    }

    #[test]
    fn notify_reaches_registered_connection() {
        let registry = ConnectionRegistry::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        registry.register("u1", Uuid::new_v4(), tx);

        assert!(registry.notify_user("u1", &json!({"message": "hello"})));
        let delivered = rx.try_recv().unwrap();
        assert!(delivered.contains("hello"));
    }

    #[test]
    fn last_registration_wins() {
        let registry = ConnectionRegistry::new();
        let (tx_old, mut rx_old) = mpsc::unbounded_channel();
        let (tx_new, mut rx_new) = mpsc::unbounded_channel();
        registry.register("u1", Uuid::new_v4(), tx_old);
        registry.register("u1", Uuid::new_v4(), tx_new);

        assert!(registry.notify_user("u1", &json!({"n": 1})));
        assert!(rx_old.try_recv().is_err());
        assert!(rx_new.try_recv().is_ok());
    }

    #[test]
    fn stale_unregister_keeps_newer_session() {
        let registry = ConnectionRegistry::new();
        let old_conn = Uuid::new_v4();
        let new_conn = Uuid::new_v4();
        let (tx_old, _rx_old) = mpsc::unbounded_channel();
        let (tx_new, mut rx_new) = mpsc::unbounded_channel();
        registry.register("u1", old_conn, tx_old);
        registry.register("u1", new_conn, tx_new);

        // The replaced connection closes afterwards; its cleanup must not
        // evict the active session.
        registry.unregister("u1", old_conn);
        assert!(registry.notify_user("u1", &json!({"n": 2})));
        assert!(rx_new.try_recv().is_ok());

        registry.unregister("u1", new_conn);
        assert!(!registry.notify_user("u1", &json!({"n": 3})));
    }

    #[test]
    fn broadcast_reaches_all_subscribers() {
        let registry = ConnectionRegistry::new();
        let mut rx_a = registry.subscribe();
        let mut rx_b = registry.subscribe();

        registry.broadcast(&json!({"type": "receiveMessage", "message": "hi"}));
        assert!(rx_a.try_recv().unwrap().contains("receiveMessage"));
        assert!(rx_b.try_recv().unwrap().contains("receiveMessage"));
    }

    #[test]
    fn notify_to_closed_channel_counts_as_dropped() {
        let registry = ConnectionRegistry::new();
        let (tx, rx) = mpsc::unbounded_channel();
        registry.register("u1", Uuid::new_v4(), tx);
        drop(rx);
        assert!(!registry.notify_user("u1", &json!({"message": "gone"})));
    }
}
