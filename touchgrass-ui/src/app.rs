//! App Root Component
//!
//! Routing, global providers and the wallet guard.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{Nav, Toast};
use crate::pages::{ChallengeDetail, Dashboard, Landing, Leaderboards, Settings, UserProfile};
use crate::state::global::{provide_global_state, GlobalState, FEED_CAPACITY};
use crate::state::websocket::init_websocket;

/// Routes reachable without a connected wallet
const PUBLIC_ROUTES: [&str; 2] = ["/", "/leaderboards"];

fn is_public(path: &str) -> bool {
    let path = path.trim_end_matches('/');
    PUBLIC_ROUTES.contains(&if path.is_empty() { "/" } else { path })
}

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    let state = expect_context::<GlobalState>();
    init_websocket(state.clone(), &api::get_api_base());

    // Initial wallet and feed
    let loader = state.clone();
    spawn_local(async move {
        match api::fetch_wallet().await {
            Ok(wallet) => loader.set_wallet(wallet),
            Err(e) => web_sys::console::error_1(&format!("Failed to load wallet: {}", e).into()),
        }
        match api::fetch_activities(FEED_CAPACITY).await {
            Ok(activities) => {
                // Oldest first so the newest ends up on top
                for activity in activities.into_iter().rev() {
                    loader.push_activity(activity);
                }
            }
            Err(e) => web_sys::console::error_1(&format!("Failed to load activity: {}", e).into()),
        }
    });

    view! {
        <Router>
            <WalletGuard />
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                <Nav />

                <main class="flex-1 container mx-auto px-4 py-8 pb-24">
                    <Routes>
                        <Route path="/" view=Landing />
                        <Route path="/dashboard" view=Dashboard />
                        <Route path="/leaderboards" view=Leaderboards />
                        <Route path="/challenge/:id" view=ChallengeDetail />
                        <Route path="/profile/:username" view=UserProfile />
                        <Route path="/settings" view=Settings />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Footer />
                <Toast />
            </div>
        </Router>
    }
}

/// Sends a disconnected wallet back to the landing page
#[component]
fn WalletGuard() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let location = use_location();
    let navigate = use_navigate();

    create_effect(move |_| {
        let path = location.pathname.get();
        // Unknown until the first wallet fetch returns
        let Some(wallet) = state.wallet.get() else {
            return;
        };
        if !wallet.is_connected && !is_public(&path) {
            navigate("/", Default::default());
        }
    });
}

/// Footer with the live feed status
#[component]
fn Footer() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm">
                <div class="flex items-center space-x-2">
                    {move || {
                        if state.ws_connected.get() {
                            view! {
                                <span class="flex items-center space-x-1 text-green-400">
                                    <span class="w-2 h-2 bg-green-400 rounded-full pulse" />
                                    <span>"Live"</span>
                                </span>
                            }.into_view()
                        } else {
                            view! {
                                <span class="flex items-center space-x-1 text-red-400">
                                    <span class="w-2 h-2 bg-red-400 rounded-full" />
                                    <span>"Offline"</span>
                                </span>
                            }.into_view()
                        }
                    }}
                </div>

                <div class="text-gray-400">
                    {move || state.token_balance.get()
                        .map(|b| format!("Staking balance: {:.2} SOL", b))
                        .unwrap_or_else(|| "Go outside today 🌱".to_string())}
                </div>
            </div>
        </footer>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🌾"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"Nothing grows here."</p>
            <A
                href="/"
                class="px-6 py-3 bg-green-600 hover:bg-green-700 rounded-lg font-medium transition-colors"
            >
                "Back to Touch Grass"
            </A>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_routes() {
        assert!(is_public("/"));
        assert!(is_public(""));
        assert!(is_public("/leaderboards/"));
        assert!(!is_public("/dashboard"));
        assert!(!is_public("/challenge/1"));
    }
}
