//! WebSocket Live Feed
//!
//! Pushes feed events, challenge changes and wallet changes to connected
//! clients.
//!
//! - **hub**: connections, subscriptions and fan-out
//! - **handler**: upgrade and per-connection message loop
//! - **messages**: client and server message formats
//!
//! Clients connect to `/api/v1/ws` and subscribe to topics:
//! - `activity` - new feed events
//! - `challenge.{id}` - one challenge (`challenge.*` for all of them)
//! - `wallet` - connection state and token balance
//!
//! ```javascript
//! const ws = new WebSocket('ws://localhost:8090/api/v1/ws');
//! ws.onopen = () => ws.send(JSON.stringify({type: 'subscribe', topics: ['activity']}));
//! ws.onmessage = (event) => console.log(JSON.parse(event.data));
//! ```

mod handler;
mod hub;
mod messages;

pub use handler::websocket_handler;
pub use hub::{ConnectionHub, HubConfig, HubError};
pub use messages::{
    challenge_topic, ClientMessage, ServerMessage, WsEvent, CHALLENGE_TOPIC_PREFIX,
    TOPIC_ACTIVITY, TOPIC_WALLET,
};
