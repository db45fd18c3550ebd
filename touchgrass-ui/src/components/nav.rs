//! Navigation Component
//!
//! Header with links, wallet status and the wallet picker.

use leptos::*;
use leptos_router::*;

use super::card::Modal;
use crate::state::global::{format_money, GlobalState};

/// Wallet providers offered by the picker: (id, label, icon)
const PROVIDERS: [(&str, &str, &str); 3] = [
    ("metamask", "MetaMask", "🦊"),
    ("walletconnect", "WalletConnect", "🔗"),
    ("coinbase", "Coinbase Wallet", "🔵"),
];

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let connected = {
        let state = state.clone();
        move || state.is_connected()
    };

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-2xl">"🌱"</span>
                        <span class="text-xl font-bold text-white">"Touch Grass"</span>
                    </A>

                    <div class="flex items-center space-x-1">
                        <Show when=connected.clone()>
                            <NavLink href="/dashboard" label="Dashboard" />
                        </Show>
                        <NavLink href="/leaderboards" label="Leaderboards" />
                        <Show when=connected.clone()>
                            <NavLink href="/settings" label="Settings" />
                        </Show>
                    </div>

                    <WalletButton />
                </div>
            </div>
        </nav>
        <WalletModal />
    }
}

#[component]
fn NavLink(href: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            {label}
        </A>
    }
}

/// Address chip when connected, connect button otherwise
#[component]
fn WalletButton() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    move || {
        let wallet = state.wallet.get().filter(|w| w.is_connected);
        match wallet {
            Some(wallet) => {
                let state = state.clone();
                let balance = state
                    .token_balance
                    .get()
                    .map(format_money)
                    .unwrap_or(wallet.total_usd.clone());
                let profile = state
                    .me
                    .get()
                    .map(|me| format!("/profile/{}", me.username))
                    .unwrap_or_else(|| "/dashboard".to_string());
                view! {
                    <div class="flex items-center space-x-3">
                        <span class="text-sm text-green-400">{balance}</span>
                        <A href=profile class="px-3 py-1 bg-gray-700 rounded-lg text-sm font-mono">
                            {wallet.short_address.unwrap_or_default()}
                        </A>
                        <button
                            class="text-sm text-gray-400 hover:text-white"
                            on:click=move |_| state.disconnect()
                        >
                            "Disconnect"
                        </button>
                    </div>
                }
                .into_view()
            }
            None => {
                let state = state.clone();
                view! {
                    <button
                        class="px-4 py-2 bg-green-600 hover:bg-green-700 rounded-lg font-medium"
                        on:click=move |_| state.wallet_modal.set(true)
                    >
                        "Connect Wallet"
                    </button>
                }
                .into_view()
            }
        }
    }
}

#[component]
fn WalletModal() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let open = state.wallet_modal;

    view! {
        <Modal open=open title="Connect a wallet">
            <div class="space-y-3">
                {PROVIDERS.iter().map(|&(id, label, icon)| {
                    let state = state.clone();
                    let connecting = state.connecting;
                    view! {
                        <button
                            class="w-full flex items-center space-x-3 px-4 py-3 bg-gray-700 \
                                   hover:bg-gray-600 rounded-lg disabled:opacity-50"
                            disabled=move || connecting.get()
                            on:click=move |_| state.connect(id)
                        >
                            <span class="text-2xl">{icon}</span>
                            <span class="font-medium">{label}</span>
                        </button>
                    }
                }).collect_view()}
                <p class="text-xs text-gray-500">
                    "This is a simulated wallet. No real funds move."
                </p>
            </div>
        </Modal>
    }
}
