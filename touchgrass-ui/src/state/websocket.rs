//! WebSocket Client
//!
//! Live feed from the Touch Grass API: new activities, challenge updates,
//! wallet changes and token balance.

use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

use super::global::GlobalState;
use crate::api::{
    self,
    types::{Activity, Challenge},
};

/// Topics every client follows
const TOPICS: [&str; 3] = ["activity", "wallet", "challenge.*"];

const MAX_RECONNECT_ATTEMPTS: u32 = 5;

/// WebSocket message types from server
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    Connected { connection_id: String },
    ActivityCreated { activity: Activity },
    ChallengeUpdated { challenge: Challenge },
    /// Raw wallet state; the formatted view is refetched
    WalletChanged { wallet: serde_json::Value },
    BalanceChanged { balance: f64 },
    Subscribed { topics: Vec<String> },
    Unsubscribed { topics: Vec<String> },
    Pong,
    Error { message: String },
}

/// WebSocket client message types
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Subscribe { topics: Vec<String> },
    Unsubscribe { topics: Vec<String> },
    Ping,
}

/// Connection with exponential-backoff reconnects
#[derive(Clone)]
struct LiveFeed {
    url: String,
    reconnect_attempts: Rc<RefCell<u32>>,
}

impl LiveFeed {
    fn connect(&self, state: GlobalState) {
        match WebSocket::new(&self.url) {
            Ok(ws) => self.setup_handlers(&ws, state),
            Err(e) => {
                web_sys::console::error_1(&format!("WebSocket connection failed: {:?}", e).into());
                self.schedule_reconnect(state);
            }
        }
    }

    fn setup_handlers(&self, ws: &WebSocket, state: GlobalState) {
        // On open: subscribe
        let state_clone = state.clone();
        let attempts = Rc::clone(&self.reconnect_attempts);
        let ws_clone = ws.clone();
        let on_open = Closure::wrap(Box::new(move |_: JsValue| {
            web_sys::console::log_1(&"WebSocket connected".into());
            state_clone.ws_connected.set(true);
            *attempts.borrow_mut() = 0;

            let subscribe = ClientMessage::Subscribe {
                topics: TOPICS.iter().map(|t| t.to_string()).collect(),
            };
            if let Ok(json) = serde_json::to_string(&subscribe) {
                let _ = ws_clone.send_with_str(&json);
            }
        }) as Box<dyn FnMut(JsValue)>);
        ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        on_open.forget();

        // On message
        let state_clone = state.clone();
        let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
            if let Ok(text) = event.data().dyn_into::<js_sys::JsString>() {
                let text: String = text.into();
                handle_message(&text, &state_clone);
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        ws.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        on_message.forget();

        // On close: reconnect
        let feed = self.clone();
        let on_close = Closure::wrap(Box::new(move |event: CloseEvent| {
            web_sys::console::log_1(
                &format!("WebSocket closed: code={}, reason={}", event.code(), event.reason()).into(),
            );
            state.ws_connected.set(false);
            feed.schedule_reconnect(state.clone());
        }) as Box<dyn FnMut(CloseEvent)>);
        ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));
        on_close.forget();

        let on_error = Closure::wrap(Box::new(move |e: JsValue| {
            web_sys::console::error_1(&format!("WebSocket error: {:?}", e).into());
        }) as Box<dyn FnMut(JsValue)>);
        ws.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_error.forget();
    }

    fn schedule_reconnect(&self, state: GlobalState) {
        let attempts = *self.reconnect_attempts.borrow();
        if attempts >= MAX_RECONNECT_ATTEMPTS {
            web_sys::console::error_1(&"Max reconnect attempts reached".into());
            return;
        }

        let delay = (2_u32.pow(attempts) * 1000).min(30000);
        *self.reconnect_attempts.borrow_mut() = attempts + 1;

        let feed = self.clone();
        gloo_timers::callback::Timeout::new(delay, move || {
            web_sys::console::log_1(&format!("Attempting reconnect (attempt {})", attempts + 1).into());
            feed.connect(state);
        })
        .forget();
    }
}

/// Handle incoming WebSocket message
fn handle_message(text: &str, state: &GlobalState) {
    let message = match serde_json::from_str::<WsMessage>(text) {
        Ok(message) => message,
        Err(e) => {
            web_sys::console::error_1(&format!("Failed to parse WebSocket message: {}", e).into());
            return;
        }
    };

    match message {
        WsMessage::Connected { connection_id } => {
            web_sys::console::log_1(&format!("Connected with ID: {}", connection_id).into());
        }
        WsMessage::ActivityCreated { activity } => state.push_activity(activity),
        WsMessage::ChallengeUpdated { challenge } => state.challenge_update.set(Some(challenge)),
        WsMessage::WalletChanged { .. } => {
            let state = state.clone();
            spawn_local(async move {
                if let Ok(wallet) = api::fetch_wallet().await {
                    state.set_wallet(wallet);
                }
            });
        }
        WsMessage::BalanceChanged { balance } => state.token_balance.set(Some(balance)),
        WsMessage::Subscribed { topics } => {
            web_sys::console::log_1(&format!("Subscribed to: {:?}", topics).into());
        }
        WsMessage::Unsubscribed { topics } => {
            web_sys::console::log_1(&format!("Unsubscribed from: {:?}", topics).into());
        }
        WsMessage::Pong => {}
        WsMessage::Error { message } => {
            web_sys::console::error_1(&format!("Server error: {}", message).into());
            state.show_error(&message);
        }
    }
}

/// "http://host/api/v1" to "ws://host/api/v1/ws"
fn websocket_url(api_base: &str) -> String {
    let base = api_base
        .replacen("https://", "wss://", 1)
        .replacen("http://", "ws://", 1);
    format!("{}/ws", base.trim_end_matches('/'))
}

/// Open the live feed (call from app root)
pub fn init_websocket(state: GlobalState, api_base: &str) {
    let feed = LiveFeed {
        url: websocket_url(api_base),
        reconnect_attempts: Rc::new(RefCell::new(0)),
    };
    feed.connect(state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_websocket_url() {
        assert_eq!(
            websocket_url("http://localhost:8090/api/v1"),
            "ws://localhost:8090/api/v1/ws"
        );
        assert_eq!(websocket_url("https://grass.example/api/v1/"), "wss://grass.example/api/v1/ws");
    }

    #[test]
    fn test_parse_balance_message() {
        let message: WsMessage =
            serde_json::from_str(r#"{"type":"balance_changed","balance":88.5}"#).unwrap();
        assert!(matches!(message, WsMessage::BalanceChanged { balance } if balance == 88.5));
    }
}
