//! Dashboard Page
//!
//! The connected user's home: stats, their challenges, popular challenges,
//! the live feed and top earners.

use leptos::*;
use leptos_router::*;

use crate::api::{self, types::{Challenge, UserChallenge}};
use crate::components::{
    ActivityFeed, Card, CardSkeleton, ChallengeGrid, CreateChallenge, Leaderboard, Modal, StakeFlow,
};
use crate::state::global::{format_money, GlobalState};

const POPULAR_LIMIT: usize = 6;

#[derive(Clone, Copy, PartialEq)]
enum Tab {
    Active,
    Completed,
}

impl Tab {
    fn status(self) -> &'static str {
        match self {
            Tab::Active => "active",
            Tab::Completed => "completed",
        }
    }
}

#[component]
pub fn Dashboard() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    // Bumped after anything that changes the user's challenges
    let refresh = create_rw_signal(0_u32);

    let me = create_local_resource(move || refresh.get(), |_| async move { api::fetch_me().await.ok() });
    let popular = create_local_resource(
        move || refresh.get(),
        |_| async move {
            api::fetch_challenges(&format!("active=true&limit={}", POPULAR_LIMIT))
                .await
                .unwrap_or_default()
        },
    );
    let top_earners = create_local_resource(
        || (),
        |_| async move {
            api::fetch_leaderboard("earnings", "all-time", 5)
                .await
                .map(|board| board.entries)
                .unwrap_or_default()
        },
    );

    let create_open = create_rw_signal(false);
    let stake_open = create_rw_signal(false);
    let staking = create_rw_signal(None::<Challenge>);

    let on_stake = Callback::new(move |challenge: Challenge| {
        staking.set(Some(challenge));
        stake_open.set(true);
    });
    let on_created = Callback::new(move |_: Challenge| {
        create_open.set(false);
        refresh.update(|n| *n += 1);
    });
    let on_stake_closed = Callback::new(move |_: ()| {
        stake_open.set(false);
        staking.set(None);
        refresh.update(|n| *n += 1);
    });

    let popular_list = Signal::derive(move || popular.get().unwrap_or_default());
    let earners = Signal::derive(move || top_earners.get().unwrap_or_default());
    let activities = state.activities;

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">
                        {move || state.me.get().map(|u| format!("Hey, {}", u.username)).unwrap_or_else(|| "Dashboard".to_string())}
                    </h1>
                    <p class="text-gray-400 mt-1">"Pick a challenge and get outside"</p>
                </div>
                <button
                    class="px-4 py-2 bg-green-600 hover:bg-green-700 rounded-lg font-medium"
                    on:click=move |_| create_open.set(true)
                >
                    "+ New Challenge"
                </button>
            </div>

            <Suspense fallback=|| view! { <CardSkeleton count=4 /> }>
                {move || me.get().flatten().map(|me| {
                    let user = me.user;
                    view! {
                        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                            <StatCard icon="💰" label="Total earned" value=format_money(user.total_earned) />
                            <StatCard icon="🎯" label="Active stake" value=format_money(me.total_active_stake) />
                            <StatCard icon="🔥" label="Current streak" value=format!("{} days", user.current_streak) />
                            <StatCard icon="✅" label="Success rate" value=format!("{:.0}%", user.success_rate * 100.0) />
                        </div>
                    }
                })}
            </Suspense>

            <MyChallenges refresh=refresh />

            <Card title="Popular challenges">
                <Suspense fallback=|| view! { <CardSkeleton /> }>
                    <ChallengeGrid challenges=popular_list on_stake=on_stake />
                </Suspense>
            </Card>

            <div class="grid md:grid-cols-2 gap-8">
                <Card title="Live activity">
                    <ActivityFeed activities=activities />
                </Card>
                <Card title="Top earners">
                    <Leaderboard entries=earners compact=true />
                    <A href="/leaderboards" class="block mt-4 text-sm text-green-400 hover:underline">
                        "Full leaderboards →"
                    </A>
                </Card>
            </div>

            <Modal open=create_open title="Create a challenge">
                <CreateChallenge on_created=on_created />
            </Modal>

            <Modal open=stake_open title="Stake on a challenge">
                {move || staking.get().map(|challenge| view! {
                    <StakeFlow challenge=challenge on_close=on_stake_closed />
                })}
            </Modal>
        </div>
    }
}

#[component]
fn StatCard(icon: &'static str, label: &'static str, #[prop(into)] value: String) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-xl p-4">
            <div class="flex items-center justify-between text-gray-400 text-sm">
                <span>{label}</span>
                <span class="text-xl">{icon}</span>
            </div>
            <p class="text-2xl font-bold mt-2">{value}</p>
        </div>
    }
}

/// Active and completed participations, with the complete action
#[component]
fn MyChallenges(refresh: RwSignal<u32>) -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let tab = create_rw_signal(Tab::Active);

    let records = create_local_resource(
        move || (tab.get(), refresh.get()),
        |(tab, _)| async move { api::fetch_my_challenges(tab.status()).await.unwrap_or_default() },
    );

    let complete = Callback::new(move |id: String| {
        let state = state.clone();
        spawn_local(async move {
            match api::complete_challenge(&id).await {
                Ok(_) => {
                    state.show_success("Submitted for verification");
                    refresh.update(|n| *n += 1);
                }
                Err(e) => state.show_error(&e),
            }
        });
    });

    let tab_button = move |target: Tab, label: &'static str| {
        view! {
            <button
                class={move || if tab.get() == target {
                    "px-4 py-2 rounded-lg bg-gray-700 text-white"
                } else {
                    "px-4 py-2 rounded-lg text-gray-400 hover:text-white"
                }}
                on:click=move |_| tab.set(target)
            >
                {label}
            </button>
        }
    };

    view! {
        <Card title="My challenges">
            <div class="flex space-x-2 mb-4">
                {tab_button(Tab::Active, "Active")}
                {tab_button(Tab::Completed, "Completed")}
            </div>
            <Suspense fallback=|| view! { <CardSkeleton count=2 /> }>
                {move || records.get().map(|list| {
                    if list.is_empty() {
                        return view! { <p class="text-gray-500">"Nothing here. Join a challenge below."</p> }.into_view();
                    }
                    list.into_iter()
                        .map(|record| view! { <RecordRow record=record on_complete=complete /> })
                        .collect_view()
                })}
            </Suspense>
        </Card>
    }
}

#[component]
fn RecordRow(record: UserChallenge, on_complete: Callback<String>) -> impl IntoView {
    let id = record.challenge_id.clone();
    let can_complete = record.status == "active";
    let status = record.status.replace('_', " ");

    view! {
        <div class="flex items-center justify-between py-3 border-b border-gray-700">
            <div>
                <A href=format!("/challenge/{}", record.challenge_id) class="font-medium hover:text-green-400">
                    {format!("Challenge #{}", record.challenge_id)}
                </A>
                <p class="text-xs text-gray-500 capitalize">
                    {format!("{} · staked {} {}", status, record.stake_amount, record.stake_currency)}
                </p>
            </div>
            <div class="flex items-center space-x-3">
                {record.payout.map(|p| view! { <span class="text-green-400">{format!("+{:.2}", p)}</span> })}
                {can_complete.then(|| view! {
                    <button
                        class="px-3 py-1 bg-green-600 hover:bg-green-700 rounded text-sm"
                        on:click=move |_| on_complete.call(id.clone())
                    >
                        "Mark complete"
                    </button>
                })}
            </div>
        </div>
    }
}
