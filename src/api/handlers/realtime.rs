use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use crate::domain::services::notifier::ConnectionRegistry;
use crate::state::AppState;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Messages a client may send over the socket. Targeted delivery only works
/// after `register`; the other two are rebroadcast to every open socket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum ClientMessage {
    #[serde(rename_all = "camelCase")]
    Register { user_id: String },
    SendMessage { message: serde_json::Value },
    BookingConfirmed { booking: serde_json::Value },
}

pub async fn ws_upgrade(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> Response {
    let registry = state.registry.clone();
    ws.on_upgrade(move |socket| handle_socket(socket, registry))
}

async fn handle_socket(socket: WebSocket, registry: Arc<ConnectionRegistry>) {
    let conn_id = Uuid::new_v4();
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let mut broadcast_rx = registry.subscribe();
    let mut registered_user: Option<String> = None;

    debug!("Realtime connection opened: {}", conn_id);

    loop {
        tokio::select! {
            Some(payload) = rx.recv() => {
                if sink.send(Message::Text(payload.into())).await.is_err() {
                    break;
                }
            }
            result = broadcast_rx.recv() => {
                match result {
                    Ok(payload) => {
                        if sink.send(Message::Text(payload.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("Connection {} lagged, {} broadcasts dropped", conn_id, skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            incoming = stream.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ClientMessage>(text.as_str()) {
                            Ok(ClientMessage::Register { user_id }) => {
                                info!("User {} registered with connection {}", user_id, conn_id);
                                registry.register(&user_id, conn_id, tx.clone());
                                if let Some(previous) = registered_user.replace(user_id.clone()) {
                                    if previous != user_id {
                                        registry.unregister(&previous, conn_id);
                                    }
                                }
                            }
                            Ok(ClientMessage::SendMessage { message }) => {
                                registry.broadcast(&json!({
                                    "type": "receiveMessage",
                                    "message": message,
                                }));
                            }
                            Ok(ClientMessage::BookingConfirmed { booking }) => {
                                registry.broadcast(&json!({
                                    "type": "bookingNotification",
                                    "booking": booking,
                                }));
                            }
                            Err(e) => {
                                warn!("Ignoring malformed realtime message on {}: {}", conn_id, e);
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        debug!("Realtime connection {} errored: {}", conn_id, e);
                        break;
                    }
                }
            }
        }
    }

    if let Some(user_id) = registered_user {
        registry.unregister(&user_id, conn_id);
    }
    debug!("Realtime connection closed: {}", conn_id);
}
