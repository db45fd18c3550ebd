//! WebSocket Handler
//!
//! Upgrades `/api/v1/ws` requests and runs one connection until either side
//! closes it.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::hub::ConnectionHub;
use super::messages::{ClientMessage, ServerMessage};
use crate::api::AppState;

/// GET /api/v1/ws
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    let hub = Arc::clone(&state.ws_hub);
    ws.on_upgrade(move |socket| handle_socket(socket, hub))
}

fn encode(message: &ServerMessage) -> Option<Message> {
    match serde_json::to_string(message) {
        Ok(text) => Some(Message::Text(text)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize message");
            None
        }
    }
}

async fn handle_socket(socket: WebSocket, hub: Arc<ConnectionHub>) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    let connection_id = match hub.register(tx).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!(error = %e, "Failed to register WebSocket connection");
            if let Some(msg) = encode(&ServerMessage::Error {
                message: e.to_string(),
            }) {
                let _ = sender.send(msg).await;
            }
            return;
        }
    };

    let connected = encode(&ServerMessage::Connected {
        connection_id: connection_id.clone(),
    });
    let greeted = match connected {
        Some(msg) => sender.send(msg).await.is_ok(),
        None => false,
    };
    if !greeted {
        tracing::error!(connection_id = %connection_id, "Failed to send connected message");
        hub.unregister(&connection_id).await;
        return;
    }

    let send_id = connection_id.clone();
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let Some(frame) = encode(&msg) else { continue };
            if sender.send(frame).await.is_err() {
                tracing::debug!(connection_id = %send_id, "WebSocket send failed, closing connection");
                break;
            }
        }
    });

    let recv_hub = Arc::clone(&hub);
    let recv_id = connection_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(msg) => {
                    if !handle_ws_message(&recv_hub, &recv_id, msg).await {
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!(connection_id = %recv_id, error = %e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    hub.unregister(&connection_id).await;
}

/// Returns false when the connection should close
async fn handle_ws_message(hub: &ConnectionHub, connection_id: &str, message: Message) -> bool {
    match message {
        Message::Text(text) => {
            match serde_json::from_str::<ClientMessage>(&text) {
                Ok(client_msg) => {
                    let reply = handle_client_message(hub, connection_id, client_msg).await;
                    let _ = hub.send_to(connection_id, reply).await;
                }
                Err(e) => {
                    tracing::debug!(connection_id = %connection_id, error = %e, "Invalid client message");
                    let _ = hub
                        .send_to(
                            connection_id,
                            ServerMessage::Error {
                                message: format!("Invalid message format: {}", e),
                            },
                        )
                        .await;
                }
            }
            true
        }
        Message::Binary(_) => {
            let _ = hub
                .send_to(
                    connection_id,
                    ServerMessage::Error {
                        message: "Binary messages not supported".to_string(),
                    },
                )
                .await;
            true
        }
        // axum answers pings itself
        Message::Ping(_) | Message::Pong(_) => true,
        Message::Close(_) => {
            tracing::debug!(connection_id = %connection_id, "Client requested close");
            false
        }
    }
}

/// The reply to a parsed client message
async fn handle_client_message(
    hub: &ConnectionHub,
    connection_id: &str,
    message: ClientMessage,
) -> ServerMessage {
    let result = match message {
        ClientMessage::Subscribe { topics } => hub
            .subscribe(connection_id, topics)
            .await
            .map(|topics| ServerMessage::Subscribed { topics }),
        ClientMessage::Unsubscribe { topics } => hub
            .unsubscribe(connection_id, topics)
            .await
            .map(|topics| ServerMessage::Unsubscribed { topics }),
        ClientMessage::Ping => Ok(ServerMessage::Pong),
    };

    result.unwrap_or_else(|e| {
        tracing::warn!(connection_id = %connection_id, error = %e, "Subscription request failed");
        ServerMessage::Error {
            message: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::websocket::HubConfig;

    #[tokio::test]
    async fn test_subscribe_and_ping_replies() {
        let hub = ConnectionHub::new(HubConfig::default());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = hub.register(tx).await.unwrap();

        let open = handle_ws_message(
            &hub,
            &id,
            Message::Text(r#"{"type":"subscribe","topics":["activity","nope"]}"#.to_string()),
        )
        .await;
        assert!(open);
        match rx.try_recv().unwrap() {
            ServerMessage::Subscribed { topics } => assert_eq!(topics, vec!["activity"]),
            other => panic!("unexpected reply {:?}", other),
        }

        handle_ws_message(&hub, &id, Message::Text(r#"{"type":"ping"}"#.to_string())).await;
        assert!(matches!(rx.try_recv().unwrap(), ServerMessage::Pong));

        handle_ws_message(&hub, &id, Message::Text("garbage".to_string())).await;
        assert!(matches!(rx.try_recv().unwrap(), ServerMessage::Error { .. }));

        assert!(!handle_ws_message(&hub, &id, Message::Close(None)).await);
    }
}
