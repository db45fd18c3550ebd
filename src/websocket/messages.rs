//! WebSocket Message Types
//!
//! Wire format between live clients (dashboard, CLI) and the server. Every
//! message is a JSON object tagged by `type`.

use serde::{Deserialize, Serialize};

use crate::domain::{Activity, Challenge};
use crate::wallet::WalletState;

/// Feed events
pub const TOPIC_ACTIVITY: &str = "activity";
/// Wallet connection and token balance changes
pub const TOPIC_WALLET: &str = "wallet";
/// Prefix of per-challenge topics, `challenge.<id>`
pub const CHALLENGE_TOPIC_PREFIX: &str = "challenge";

/// Topic carrying updates of one challenge
pub fn challenge_topic(challenge_id: &str) -> String {
    format!("{}.{}", CHALLENGE_TOPIC_PREFIX, challenge_id)
}

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Topics such as "activity", "wallet", "challenge.7" or "challenge.*"
    Subscribe { topics: Vec<String> },
    Unsubscribe { topics: Vec<String> },
    /// Keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// A new feed event
    ActivityCreated { activity: Activity },
    /// Participants, pot, photos or status of a challenge changed
    ChallengeUpdated { challenge: Challenge },
    /// The wallet connected or disconnected
    WalletChanged { wallet: WalletState },
    /// Token balance after a stake or payout
    BalanceChanged { balance: f64 },
    Subscribed { topics: Vec<String> },
    Unsubscribed { topics: Vec<String> },
    Pong,
    Error { message: String },
    Connected { connection_id: String },
}

/// An event routed through the hub
#[derive(Debug, Clone)]
pub struct WsEvent {
    pub topic: String,
    pub message: ServerMessage,
}

impl WsEvent {
    pub fn activity(activity: Activity) -> Self {
        Self {
            topic: TOPIC_ACTIVITY.to_string(),
            message: ServerMessage::ActivityCreated { activity },
        }
    }

    pub fn challenge(challenge: Challenge) -> Self {
        Self {
            topic: challenge_topic(&challenge.id),
            message: ServerMessage::ChallengeUpdated { challenge },
        }
    }

    pub fn wallet(wallet: WalletState) -> Self {
        Self {
            topic: TOPIC_WALLET.to_string(),
            message: ServerMessage::WalletChanged { wallet },
        }
    }

    pub fn balance(balance: f64) -> Self {
        Self {
            topic: TOPIC_WALLET.to_string(),
            message: ServerMessage::BalanceChanged { balance },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockDataset;
    use chrono::Utc;

    #[test]
    fn test_client_message_deserialize_subscribe() {
        let json = r#"{"type": "subscribe", "topics": ["activity", "challenge.3"]}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        match msg {
            ClientMessage::Subscribe { topics } => {
                assert_eq!(topics, vec!["activity", "challenge.3"]);
            }
            _ => panic!("Expected Subscribe"),
        }
    }

    #[test]
    fn test_client_message_deserialize_ping() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type": "ping"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));
    }

    #[test]
    fn test_server_message_tags() {
        let json = serde_json::to_string(&ServerMessage::BalanceChanged { balance: 90.0 }).unwrap();
        assert!(json.contains("\"type\":\"balance_changed\""));
        assert!(json.contains("\"balance\":90.0"));

        let json = serde_json::to_string(&ServerMessage::Connected {
            connection_id: "abc-123".to_string(),
        })
        .unwrap();
        assert!(json.contains("\"type\":\"connected\""));
    }

    #[test]
    fn test_event_topics() {
        let data = MockDataset::generate(5, Utc::now());

        let event = WsEvent::challenge(data.challenges[2].clone());
        assert_eq!(event.topic, format!("challenge.{}", data.challenges[2].id));

        let event = WsEvent::activity(data.activities[0].clone());
        assert_eq!(event.topic, "activity");
        let json = serde_json::to_string(&event.message).unwrap();
        assert!(json.contains("\"type\":\"activity_created\""));

        assert_eq!(WsEvent::wallet(WalletState::disconnected()).topic, "wallet");
    }
}
