//! Stake Flow
//!
//! Three steps on one challenge: choose a stake and duration, count down
//! while outside, then submit a photo (or quit) and see the payout.

use chrono::{Duration, Utc};
use leptos::*;

use super::photo_upload::PhotoUpload;
use crate::api::{
    self,
    types::{Challenge, SettleResponse, StakeView},
};
use crate::state::global::{format_clock, format_money, GlobalState};

const MIN_STAKE: f64 = 1.0;
const MAX_STAKE: f64 = 50.0;
const PAYOUT_MULTIPLIER: f64 = 1.2;
const DURATION_PRESETS: [u32; 4] = [30, 60, 120, 240];
const WARNING_SECONDS: i64 = 5 * 60;

#[derive(Clone)]
enum Step {
    Setup,
    Active(StakeView),
    Done(SettleResponse),
}

/// Same wording as the server's stake validation
fn stake_error(amount: f64) -> Option<&'static str> {
    if !amount.is_finite() || amount < MIN_STAKE {
        Some("Minimum stake is $1")
    } else if amount > MAX_STAKE {
        Some("Maximum stake is $50")
    } else {
        None
    }
}

/// "45m", "2h", "1h 30m"
fn duration_label(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

#[component]
pub fn StakeFlow(challenge: Challenge, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let step = create_rw_signal(Step::Setup);
    let challenge_id = store_value(challenge.id.clone());

    // Resume a stake that is already running
    spawn_local(async move {
        if let Ok(view) = api::fetch_stake(&challenge_id.get_value()).await {
            step.set(Step::Active(view));
        }
    });

    view! {
        <div class="space-y-4">
            <h3 class="text-lg font-semibold">{challenge.title.clone()}</h3>
            {move || match step.get() {
                Step::Setup => view! { <StakeSetup challenge_id=challenge_id.get_value() step=step /> }.into_view(),
                Step::Active(view) => view! { <ActiveCountdown stake=view step=step /> }.into_view(),
                Step::Done(settled) => view! { <StakeSummary settled=settled on_close=on_close /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn StakeSetup(challenge_id: String, step: RwSignal<Step>) -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let amount = create_rw_signal(10.0);
    let minutes = create_rw_signal(60_u32);
    let submitting = create_rw_signal(false);

    let start = move |_: ev::MouseEvent| {
        let value = amount.get();
        if let Some(message) = stake_error(value) {
            state.show_error(message);
            return;
        }
        let state = state.clone();
        let challenge_id = challenge_id.clone();
        submitting.set(true);
        spawn_local(async move {
            match api::create_stake(&challenge_id, value, minutes.get()).await {
                Ok(created) => {
                    state.token_balance.set(Some(created.balance));
                    step.set(Step::Active(created.view));
                }
                Err(e) => state.show_error(&e),
            }
            submitting.set(false);
        });
    };

    view! {
        <div class="space-y-4">
            <label class="block text-sm text-gray-400">
                "Stake amount (SOL)"
                <input
                    type="number"
                    min="1"
                    max="50"
                    step="0.5"
                    class="w-full mt-1 bg-gray-700 border border-gray-600 rounded-lg px-3 py-2"
                    prop:value=move || amount.get().to_string()
                    on:input=move |ev| amount.set(event_target_value(&ev).parse().unwrap_or(f64::NAN))
                />
            </label>
            {move || stake_error(amount.get()).map(|e| view! { <p class="text-sm text-red-400">{e}</p> })}

            <div>
                <p class="text-sm text-gray-400 mb-2">
                    "Time outside: " <span class="text-white">{move || duration_label(minutes.get())}</span>
                </p>
                <div class="flex space-x-2 mb-2">
                    {DURATION_PRESETS.iter().map(|&m| view! {
                        <button
                            class={move || if minutes.get() == m {
                                "px-3 py-1 rounded bg-green-600 text-sm"
                            } else {
                                "px-3 py-1 rounded bg-gray-700 hover:bg-gray-600 text-sm"
                            }}
                            on:click=move |_| minutes.set(m)
                        >
                            {duration_label(m)}
                        </button>
                    }).collect_view()}
                </div>
                <input
                    type="range"
                    min="15"
                    max="480"
                    step="15"
                    class="w-full"
                    prop:value=move || minutes.get().to_string()
                    on:input=move |ev| {
                        if let Ok(m) = event_target_value(&ev).parse::<u32>() {
                            minutes.set(m);
                        }
                    }
                />
            </div>

            <div class="bg-gray-700/50 rounded-lg p-3 text-sm flex justify-between">
                <span class="text-gray-400">"Payout on success"</span>
                <span class="text-green-400 font-semibold">
                    {move || {
                        let a = amount.get();
                        if a.is_finite() { format!("{:.2} SOL", a * PAYOUT_MULTIPLIER) } else { "-".to_string() }
                    }}
                </span>
            </div>

            <button
                class="w-full px-4 py-2 bg-green-600 hover:bg-green-700 rounded-lg font-medium disabled:opacity-50"
                disabled=move || submitting.get() || stake_error(amount.get()).is_some()
                on:click=start
            >
                "Stake & Go Outside"
            </button>
        </div>
    }
}

#[component]
fn ActiveCountdown(stake: StakeView, step: RwSignal<Step>) -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let ends_at = stake.stake.started_at + Duration::minutes(stake.stake.duration_minutes as i64);
    let challenge_id = store_value(stake.stake.challenge_id.clone());
    let photo = create_rw_signal(stake.stake.photo_url.clone());
    let busy = create_rw_signal(false);

    let now = create_rw_signal(Utc::now());
    let ticker = gloo_timers::callback::Interval::new(1000, move || now.set(Utc::now()));
    on_cleanup(move || drop(ticker));

    let remaining = move || (ends_at - now.get()).num_seconds().max(0);
    let time_up = move || remaining() == 0;

    let on_photo = {
        let state = state.clone();
        move |url: Option<String>| {
            let Some(url) = url else {
                photo.set(None);
                return;
            };
            let state = state.clone();
            spawn_local(async move {
                match api::attach_proof(&challenge_id.get_value(), &url).await {
                    Ok(view) => photo.set(view.stake.photo_url),
                    Err(e) => state.show_error(&e),
                }
            });
        }
    };

    let settle = move |quit: bool| {
        let state = state.clone();
        busy.set(true);
        spawn_local(async move {
            let id = challenge_id.get_value();
            let result = if quit {
                api::quit_stake(&id).await
            } else {
                api::submit_proof(&id).await
            };
            match result {
                Ok(settled) => {
                    state.token_balance.set(Some(settled.balance));
                    state.show_settlement(settled.result.clone());
                    step.set(Step::Done(settled));
                }
                Err(e) => state.show_error(&e),
            }
            busy.set(false);
        });
    };
    let settle_quit = settle.clone();

    view! {
        <div class="space-y-4 text-center">
            <div class=move || {
                let color = match remaining() {
                    0 => "text-green-400",
                    r if r < WARNING_SECONDS => "text-yellow-400",
                    _ => "text-white",
                };
                format!("text-5xl font-mono font-bold {}", color)
            }>
                {move || format_clock(remaining())}
            </div>
            <p class="text-sm text-gray-400">
                {move || if time_up() {
                    "Time's up! Upload a photo of where you went.".to_string()
                } else {
                    format!("Staked {:.2} SOL. Potential payout {}", stake.stake.stake_amount, format_money(stake.potential_payout))
                }}
            </p>

            <Show when=time_up>
                <PhotoUpload on_change=on_photo.clone() label="Upload your outdoor photo" />
                <button
                    class="w-full px-4 py-2 bg-green-600 hover:bg-green-700 rounded-lg font-medium disabled:opacity-50"
                    disabled=move || busy.get() || photo.get().is_none()
                    on:click={
                        let settle = settle.clone();
                        move |_| settle(false)
                    }
                >
                    "Submit Proof"
                </button>
            </Show>

            <button
                class="w-full px-4 py-2 bg-gray-700 hover:bg-red-700 rounded-lg text-sm disabled:opacity-50"
                disabled=move || busy.get()
                on:click=move |_| settle_quit(true)
            >
                "Give up (lose stake)"
            </button>
        </div>
    }
}

#[component]
fn StakeSummary(settled: SettleResponse, on_close: Callback<()>) -> impl IntoView {
    let result = settled.result;
    let net = if result.success {
        result.payout - result.stake
    } else {
        -result.stake
    };

    view! {
        <div class="space-y-4 text-center">
            <div class="text-6xl">{if result.success { "🌳" } else { "📱" }}</div>
            <h3 class="text-2xl font-bold">
                {if result.success { "You touched grass!" } else { "Stake lost" }}
            </h3>
            <div class="grid grid-cols-3 gap-2 text-sm">
                <div class="bg-gray-700/50 rounded-lg p-2">
                    <p class="text-gray-400">"Staked"</p>
                    <p class="font-semibold">{format!("{:.2}", result.stake)}</p>
                </div>
                <div class="bg-gray-700/50 rounded-lg p-2">
                    <p class="text-gray-400">"Payout"</p>
                    <p class="font-semibold text-green-400">{format!("{:.2}", settled.payout.amount)}</p>
                </div>
                <div class="bg-gray-700/50 rounded-lg p-2">
                    <p class="text-gray-400">"Net"</p>
                    <p class={if net >= 0.0 { "font-semibold text-green-400" } else { "font-semibold text-red-400" }}>
                        {format!("{:+.2}", net)}
                    </p>
                </div>
            </div>
            <p class="text-sm text-gray-400">{format!("Balance: {:.2} SOL", settled.balance)}</p>
            <button
                class="w-full px-4 py-2 bg-green-600 hover:bg-green-700 rounded-lg font-medium"
                on:click=move |_| on_close.call(())
            >
                "Done"
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stake_error_bounds() {
        assert_eq!(stake_error(0.5), Some("Minimum stake is $1"));
        assert_eq!(stake_error(f64::NAN), Some("Minimum stake is $1"));
        assert_eq!(stake_error(51.0), Some("Maximum stake is $50"));
        assert_eq!(stake_error(50.0), None);
    }

    #[test]
    fn test_duration_label() {
        assert_eq!(duration_label(45), "45m");
        assert_eq!(duration_label(120), "2h");
        assert_eq!(duration_label(90), "1h 30m");
    }
}
