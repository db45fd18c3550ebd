//! WebSocket Connection Hub
//!
//! Tracks live connections and their topic subscriptions and fans events
//! out to them. A subscription to `challenge.*` receives every
//! `challenge.<id>` event.

use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, RwLock};
use uuid::Uuid;

use super::messages::{ServerMessage, WsEvent, CHALLENGE_TOPIC_PREFIX, TOPIC_ACTIVITY, TOPIC_WALLET};

pub type ConnectionId = String;

pub struct ConnectionHub {
    connections: RwLock<HashMap<ConnectionId, ConnectionHandle>>,
    /// Topic -> subscribed connections
    subscriptions: RwLock<HashMap<String, HashSet<ConnectionId>>>,
    /// Every published event, for in-process listeners
    broadcast_tx: broadcast::Sender<WsEvent>,
    config: HubConfig,
}

#[derive(Debug, Clone)]
pub struct HubConfig {
    pub max_connections: usize,
    pub broadcast_capacity: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            max_connections: 1000,
            broadcast_capacity: 1024,
        }
    }
}

pub struct ConnectionHandle {
    pub sender: mpsc::UnboundedSender<ServerMessage>,
    pub subscriptions: HashSet<String>,
}

impl ConnectionHub {
    pub fn new(config: HubConfig) -> Self {
        let (broadcast_tx, _) = broadcast::channel(config.broadcast_capacity);

        Self {
            connections: RwLock::new(HashMap::new()),
            subscriptions: RwLock::new(HashMap::new()),
            broadcast_tx,
            config,
        }
    }

    /// Register a connection; fails once the connection limit is reached
    pub async fn register(
        &self,
        sender: mpsc::UnboundedSender<ServerMessage>,
    ) -> Result<ConnectionId, HubError> {
        let mut connections = self.connections.write().await;
        if connections.len() >= self.config.max_connections {
            return Err(HubError::TooManyConnections(self.config.max_connections));
        }

        let id = Uuid::new_v4().to_string();
        connections.insert(
            id.clone(),
            ConnectionHandle {
                sender,
                subscriptions: HashSet::new(),
            },
        );

        tracing::info!(connection_id = %id, "WebSocket connected");
        Ok(id)
    }

    /// Drop a connection and all of its subscriptions
    pub async fn unregister(&self, id: &str) {
        let handle = self.connections.write().await.remove(id);

        if let Some(handle) = handle {
            let mut subs = self.subscriptions.write().await;
            for topic in handle.subscriptions {
                remove_subscriber(&mut subs, &topic, id);
            }
        }

        tracing::info!(connection_id = %id, "WebSocket disconnected");
    }

    /// Subscribe to topics. Unknown topics are skipped; the accepted ones are returned.
    pub async fn subscribe(&self, id: &str, topics: Vec<String>) -> Result<Vec<String>, HubError> {
        let mut connections = self.connections.write().await;
        let handle = connections.get_mut(id).ok_or(HubError::ConnectionNotFound)?;

        let mut subs = self.subscriptions.write().await;
        let mut subscribed = Vec::new();

        for topic in topics {
            if !is_valid_topic(&topic) {
                tracing::warn!(topic = %topic, "Invalid topic ignored");
                continue;
            }
            handle.subscriptions.insert(topic.clone());
            subs.entry(topic.clone()).or_default().insert(id.to_string());
            subscribed.push(topic);
        }

        tracing::debug!(connection_id = %id, topics = ?subscribed, "Subscribed to topics");
        Ok(subscribed)
    }

    pub async fn unsubscribe(
        &self,
        id: &str,
        topics: Vec<String>,
    ) -> Result<Vec<String>, HubError> {
        let mut connections = self.connections.write().await;
        let handle = connections.get_mut(id).ok_or(HubError::ConnectionNotFound)?;

        let mut subs = self.subscriptions.write().await;
        let mut unsubscribed = Vec::new();

        for topic in topics {
            if handle.subscriptions.remove(&topic) {
                remove_subscriber(&mut subs, &topic, id);
                unsubscribed.push(topic);
            }
        }

        tracing::debug!(connection_id = %id, topics = ?unsubscribed, "Unsubscribed from topics");
        Ok(unsubscribed)
    }

    /// Deliver an event to every subscriber of its topic. Returns the number reached.
    pub async fn broadcast(&self, event: &WsEvent) -> usize {
        // Same lock order as subscribe: connections, then subscriptions
        let connections = self.connections.read().await;
        let subs = self.subscriptions.read().await;

        let mut recipients: HashSet<&ConnectionId> = HashSet::new();
        if let Some(ids) = subs.get(&event.topic) {
            recipients.extend(ids);
        }
        if let Some(wildcard) = wildcard_for(&event.topic) {
            if let Some(ids) = subs.get(&wildcard) {
                recipients.extend(ids);
            }
        }

        let sent = recipients
            .into_iter()
            .filter_map(|id| connections.get(id))
            .filter(|handle| handle.sender.send(event.message.clone()).is_ok())
            .count();

        if sent > 0 {
            tracing::trace!(topic = %event.topic, subscribers = sent, "Broadcast event");
        }
        sent
    }

    /// Hand an event to in-process listeners and to subscribed connections
    pub async fn publish(&self, event: WsEvent) {
        // No receivers is not an error
        let _ = self.broadcast_tx.send(event.clone());
        self.broadcast(&event).await;
    }

    pub async fn send_to(&self, id: &str, message: ServerMessage) -> Result<(), HubError> {
        let connections = self.connections.read().await;
        let handle = connections.get(id).ok_or(HubError::ConnectionNotFound)?;

        handle.sender.send(message).map_err(|_| HubError::SendFailed)
    }

    /// Receive every published event regardless of topic
    pub fn subscribe_broadcast(&self) -> broadcast::Receiver<WsEvent> {
        self.broadcast_tx.subscribe()
    }

    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    pub async fn subscription_count(&self, topic: &str) -> usize {
        self.subscriptions
            .read()
            .await
            .get(topic)
            .map(|s| s.len())
            .unwrap_or(0)
    }
}

fn remove_subscriber(subs: &mut HashMap<String, HashSet<ConnectionId>>, topic: &str, id: &str) {
    if let Some(subscribers) = subs.get_mut(topic) {
        subscribers.remove(id);
        if subscribers.is_empty() {
            subs.remove(topic);
        }
    }
}

/// `activity`, `wallet`, `challenge.*` or `challenge.<id>`
fn is_valid_topic(topic: &str) -> bool {
    if topic == TOPIC_ACTIVITY || topic == TOPIC_WALLET {
        return true;
    }
    match topic.split_once('.') {
        Some((prefix, rest)) => prefix == CHALLENGE_TOPIC_PREFIX && !rest.is_empty(),
        None => false,
    }
}

fn wildcard_for(topic: &str) -> Option<String> {
    topic
        .split_once('.')
        .map(|(prefix, _)| format!("{}.*", prefix))
}

#[derive(Debug, Error)]
pub enum HubError {
    #[error("Too many connections (limit: {0})")]
    TooManyConnections(usize),

    #[error("Connection not found")]
    ConnectionNotFound,

    #[error("Failed to send message")]
    SendFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance_event() -> WsEvent {
        WsEvent::balance(42.0)
    }

    #[test]
    fn test_valid_topics() {
        assert!(is_valid_topic("activity"));
        assert!(is_valid_topic("wallet"));
        assert!(is_valid_topic("challenge.*"));
        assert!(is_valid_topic("challenge.12"));

        assert!(!is_valid_topic("challenge."));
        assert!(!is_valid_topic("challenge"));
        assert!(!is_valid_topic("metrics.mood"));
        assert!(!is_valid_topic(""));
    }

    #[tokio::test]
    async fn test_register_unregister() {
        let hub = ConnectionHub::new(HubConfig::default());
        let (tx, _rx) = mpsc::unbounded_channel();

        let id = hub.register(tx).await.unwrap();
        assert_eq!(hub.connection_count().await, 1);

        hub.subscribe(&id, vec!["wallet".to_string()]).await.unwrap();
        hub.unregister(&id).await;
        assert_eq!(hub.connection_count().await, 0);
        assert_eq!(hub.subscription_count("wallet").await, 0);
    }

    #[tokio::test]
    async fn test_subscribe_skips_invalid_topics() {
        let hub = ConnectionHub::new(HubConfig::default());
        let (tx, _rx) = mpsc::unbounded_channel();
        let id = hub.register(tx).await.unwrap();

        let subscribed = hub
            .subscribe(&id, vec!["activity".to_string(), "bogus".to_string()])
            .await
            .unwrap();
        assert_eq!(subscribed, vec!["activity"]);

        let unsubscribed = hub
            .unsubscribe(&id, vec!["activity".to_string(), "wallet".to_string()])
            .await
            .unwrap();
        assert_eq!(unsubscribed, vec!["activity"]);
        assert_eq!(hub.subscription_count("activity").await, 0);

        assert!(matches!(
            hub.subscribe("missing", vec!["wallet".to_string()]).await,
            Err(HubError::ConnectionNotFound)
        ));
    }

    #[tokio::test]
    async fn test_connection_limit() {
        let hub = ConnectionHub::new(HubConfig {
            max_connections: 1,
            broadcast_capacity: 16,
        });
        let (tx1, _) = mpsc::unbounded_channel();
        let (tx2, _) = mpsc::unbounded_channel();

        hub.register(tx1).await.unwrap();
        assert!(matches!(
            hub.register(tx2).await,
            Err(HubError::TooManyConnections(1))
        ));
    }

    #[tokio::test]
    async fn test_broadcast_reaches_only_subscribers() {
        let hub = ConnectionHub::new(HubConfig::default());
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let id1 = hub.register(tx1).await.unwrap();
        hub.register(tx2).await.unwrap();

        hub.subscribe(&id1, vec!["wallet".to_string()]).await.unwrap();
        assert_eq!(hub.broadcast(&balance_event()).await, 1);

        assert!(matches!(
            rx1.try_recv(),
            Ok(ServerMessage::BalanceChanged { .. })
        ));
        assert!(rx2.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_challenge_wildcard() {
        let hub = ConnectionHub::new(HubConfig::default());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = hub.register(tx).await.unwrap();

        hub.subscribe(&id, vec!["challenge.*".to_string(), "challenge.7".to_string()])
            .await
            .unwrap();

        let event = WsEvent {
            topic: "challenge.7".to_string(),
            message: ServerMessage::Pong,
        };
        // Direct and wildcard subscription deliver once
        assert_eq!(hub.broadcast(&event).await, 1);
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_publish_feeds_broadcast_listeners() {
        let hub = ConnectionHub::new(HubConfig::default());
        let mut listener = hub.subscribe_broadcast();

        hub.publish(balance_event()).await;
        let event = listener.recv().await.unwrap();
        assert_eq!(event.topic, "wallet");
    }
}
