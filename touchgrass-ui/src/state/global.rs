//! Global Application State
//!
//! Reactive state shared by every page: the wallet, the logged-in user, the
//! live feed and toast messages.

use leptos::*;

use crate::api::{self, types::{Activity, Challenge, StakeResult, User, WalletInfo}};

/// Feed events kept in memory
pub const FEED_CAPACITY: usize = 50;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Wallet as last reported by the API
    pub wallet: RwSignal<Option<WalletInfo>>,
    /// A connect request is in flight
    pub connecting: RwSignal<bool>,
    /// Whether the wallet modal is open
    pub wallet_modal: RwSignal<bool>,
    /// The logged-in user, once the wallet is connected
    pub me: RwSignal<Option<User>>,
    /// Newest-first activity feed, fed by the WebSocket
    pub activities: RwSignal<Vec<Activity>>,
    /// Token balance of the staking wallet
    pub token_balance: RwSignal<Option<f64>>,
    /// Most recent live challenge update
    pub challenge_update: RwSignal<Option<Challenge>>,
    /// WebSocket connection status
    pub ws_connected: RwSignal<bool>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
    /// Last settled stake, shown as a payout or loss toast
    pub settlement: RwSignal<Option<StakeResult>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        wallet: create_rw_signal(None),
        connecting: create_rw_signal(false),
        wallet_modal: create_rw_signal(false),
        me: create_rw_signal(None),
        activities: create_rw_signal(Vec::new()),
        token_balance: create_rw_signal(None),
        challenge_update: create_rw_signal(None),
        ws_connected: create_rw_signal(false),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
        settlement: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    pub fn is_connected(&self) -> bool {
        self.wallet
            .get()
            .map(|w| w.is_connected)
            .unwrap_or(false)
    }

    /// Apply a wallet update and load or drop the user to match
    pub fn set_wallet(&self, wallet: WalletInfo) {
        let connected = wallet.is_connected;
        self.wallet.set(Some(wallet));
        if connected {
            self.refresh_me();
        } else {
            self.me.set(None);
            self.token_balance.set(None);
        }
    }

    pub fn refresh_me(&self) {
        let me = self.me;
        spawn_local(async move {
            match api::fetch_me().await {
                Ok(response) => me.set(Some(response.user)),
                Err(e) => web_sys::console::error_1(&format!("Failed to load user: {}", e).into()),
            }
        });
    }

    pub fn connect(&self, provider: &'static str) {
        let state = self.clone();
        self.connecting.set(true);
        spawn_local(async move {
            match api::connect_wallet(provider).await {
                Ok(wallet) => {
                    state.set_wallet(wallet);
                    state.wallet_modal.set(false);
                    state.show_success("Wallet connected");
                }
                Err(e) => state.show_error(&format!("Connection failed: {}", e)),
            }
            state.connecting.set(false);
        });
    }

    pub fn disconnect(&self) {
        let state = self.clone();
        spawn_local(async move {
            match api::disconnect_wallet().await {
                Ok(wallet) => state.set_wallet(wallet),
                Err(e) => state.show_error(&e),
            }
        });
    }

    /// Prepend a live event, dropping duplicates
    pub fn push_activity(&self, activity: Activity) {
        self.activities
            .update(|feed| merge_activity(feed, activity, FEED_CAPACITY));
    }

    /// Announce a settled stake (auto-clears after timeout)
    pub fn show_settlement(&self, result: StakeResult) {
        self.settlement.set(Some(result));

        let settlement_signal = self.settlement;
        gloo_timers::callback::Timeout::new(6000, move || {
            settlement_signal.set(None);
        })
        .forget();
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}

fn merge_activity(feed: &mut Vec<Activity>, activity: Activity, capacity: usize) {
    if feed.iter().any(|a| a.id == activity.id) {
        return;
    }
    feed.insert(0, activity);
    feed.truncate(capacity);
}

/// "$12.50"
pub fn format_money(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Dollar stablecoins as money, anything else as "0.5 ETH"
pub fn format_stake(amount: f64, currency: &str) -> String {
    match currency {
        "USDC" | "USDT" => format_money(amount),
        other => format!("{} {}", amount, other),
    }
}

/// "5m ago", "3h ago", "2d ago"
pub fn time_ago(time: chrono::DateTime<chrono::Utc>) -> String {
    let seconds = (chrono::Utc::now() - time).num_seconds().max(0);
    match seconds {
        s if s < 60 => "just now".to_string(),
        s if s < 3600 => format!("{}m ago", s / 60),
        s if s < 86400 => format!("{}h ago", s / 3600),
        s => format!("{}d ago", s / 86400),
    }
}

/// Countdown as "m:ss" or "h:mm:ss"
pub fn format_clock(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let (h, m, s) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn activity(id: &str) -> Activity {
        Activity {
            id: id.to_string(),
            kind: "challenge_joined".to_string(),
            user: "GrassToucher".to_string(),
            user_avatar: String::new(),
            challenge: None,
            challenge_title: None,
            amount: None,
            timestamp: Utc::now(),
            description: "joined".to_string(),
        }
    }

    #[test]
    fn test_merge_activity_dedupes_and_caps() {
        let mut feed = vec![activity("1")];
        merge_activity(&mut feed, activity("1"), 2);
        assert_eq!(feed.len(), 1);

        merge_activity(&mut feed, activity("2"), 2);
        merge_activity(&mut feed, activity("3"), 2);
        let ids: Vec<_> = feed.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["3", "2"]);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(59), "0:59");
        assert_eq!(format_clock(3600 + 61), "1:01:01");
        assert_eq!(format_clock(-5), "0:00");
    }

    #[test]
    fn test_format_stake() {
        assert_eq!(format_stake(12.5, "USDC"), "$12.50");
        assert_eq!(format_stake(100.0, "XP"), "100 XP");
    }

    #[test]
    fn test_time_ago() {
        assert_eq!(time_ago(Utc::now() - Duration::minutes(5)), "5m ago");
        assert_eq!(time_ago(Utc::now() - Duration::days(2)), "2d ago");
    }
}
