//! API Module
//!
//! HTTP client for the Touch Grass REST API.

pub mod client;
pub mod types;

pub use client::*;
