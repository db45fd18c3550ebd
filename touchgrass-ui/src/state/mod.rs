//! State Management
//!
//! Global application state and the live WebSocket feed.

pub mod global;
pub mod websocket;

pub use global::{provide_global_state, GlobalState};
