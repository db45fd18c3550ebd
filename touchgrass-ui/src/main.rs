//! Touch Grass Web App
//!
//! Client-side rendered Leptos front-end for the Touch Grass API.
//!
//! # Features
//!
//! - Simulated wallet connect
//! - Stake on a challenge, count down, upload proof, collect the payout
//! - Leaderboards, profiles and challenge pages
//! - Live activity feed over WebSocket
//!
//! # Architecture
//!
//! Compiles to WebAssembly and talks to the API over HTTP and WebSocket.
//! The API base URL is kept in browser local storage.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
