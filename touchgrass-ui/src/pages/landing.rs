//! Landing Page
//!
//! Pitch, how it works, pool stats, the live feed and a FAQ.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{ActivityFeed, Card};
use crate::state::global::{format_money, GlobalState};

const STEPS: [(&str, &str, &str); 4] = [
    ("🔗", "Connect", "Link a wallet to get started."),
    ("🎯", "Stake", "Put $1 to $50 on going outside."),
    ("🌳", "Touch grass", "Leave the screen until the timer runs out."),
    ("📷", "Prove it", "Upload a photo and collect 1.2x your stake."),
];

const FAQ: [(&str, &str); 4] = [
    (
        "What happens if I give up?",
        "Your stake goes to the pool and is shared with people who finished.",
    ),
    (
        "How is a challenge verified?",
        "Upload a photo once the timer ends. The community can vote on photos.",
    ),
    (
        "How much can I stake?",
        "Anything from $1 to $50 per challenge.",
    ),
    (
        "Is this real money?",
        "No. The wallet is a simulation for trying the idea out.",
    ),
];

#[component]
pub fn Landing() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let pool = create_local_resource(|| (), |_| async move { api::fetch_pool().await.ok() });
    let activities = state.activities;

    let cta = {
        let state = state.clone();
        move || {
            let state = state.clone();
            if state.is_connected() {
                view! {
                    <A href="/dashboard" class="px-8 py-3 bg-green-600 hover:bg-green-700 rounded-lg font-semibold text-lg">
                        "Go to Dashboard"
                    </A>
                }
                .into_view()
            } else {
                view! {
                    <button
                        class="px-8 py-3 bg-green-600 hover:bg-green-700 rounded-lg font-semibold text-lg"
                        on:click=move |_| state.wallet_modal.set(true)
                    >
                        "Connect Wallet to Start"
                    </button>
                }
                .into_view()
            }
        }
    };

    view! {
        <div class="space-y-16">
            <section class="text-center py-12">
                <div class="text-6xl mb-4">"🌱"</div>
                <h1 class="text-5xl font-bold mb-4">"Touch Grass"</h1>
                <p class="text-xl text-gray-400 max-w-2xl mx-auto mb-8">
                    "Put money on going outside. Finish the challenge, prove it with a photo, and earn 20% on top."
                </p>
                {cta.clone()}
            </section>

            <section>
                <h2 class="text-2xl font-bold text-center mb-8">"How it works"</h2>
                <div class="grid md:grid-cols-4 gap-4">
                    {STEPS.iter().enumerate().map(|(i, &(icon, title, text))| view! {
                        <Card class="text-center">
                            <div class="text-4xl mb-2">{icon}</div>
                            <p class="text-xs text-gray-500">{format!("Step {}", i + 1)}</p>
                            <h3 class="font-semibold text-lg">{title}</h3>
                            <p class="text-sm text-gray-400 mt-1">{text}</p>
                        </Card>
                    }).collect_view()}
                </div>
            </section>

            <section>
                <Suspense fallback=|| view! { <div class="h-24" /> }>
                    {move || pool.get().flatten().map(|pool| {
                        let stats = pool.stats;
                        view! {
                            <div class="grid grid-cols-2 md:grid-cols-4 gap-4 text-center">
                                <Stat label="Staked right now" value=format_money(stats.total_active_stakes) />
                                <Stat label="Success rate" value=format!("{:.0}%", stats.success_rate * 100.0) />
                                <Stat label="Average stake" value=format_money(stats.average_stake) />
                                <Stat label="Outside now" value=stats.active_participants.to_string() />
                            </div>
                        }
                    })}
                </Suspense>
            </section>

            <div class="grid md:grid-cols-2 gap-8">
                <Card title="Live activity">
                    <ActivityFeed activities=activities limit=5 />
                </Card>
                <Card title="FAQ">
                    <div class="space-y-2">
                        {FAQ.iter().map(|&(question, answer)| view! { <FaqItem question=question answer=answer /> }).collect_view()}
                    </div>
                </Card>
            </div>

            <section class="text-center bg-gradient-to-r from-green-800 to-emerald-700 rounded-xl py-12">
                <h2 class="text-3xl font-bold mb-4">"Your phone will still be here."</h2>
                <p class="text-gray-200 mb-6">"Go outside. Get paid for it."</p>
                {cta}
            </section>
        </div>
    }
}

#[component]
fn Stat(label: &'static str, #[prop(into)] value: String) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-xl p-4">
            <p class="text-2xl font-bold text-green-400">{value}</p>
            <p class="text-sm text-gray-400">{label}</p>
        </div>
    }
}

#[component]
fn FaqItem(question: &'static str, answer: &'static str) -> impl IntoView {
    let open = create_rw_signal(false);
    view! {
        <div class="border-b border-gray-700 pb-2">
            <button
                class="w-full flex justify-between text-left font-medium py-1"
                on:click=move |_| open.update(|o| *o = !*o)
            >
                {question}
                <span>{move || if open.get() { "−" } else { "+" }}</span>
            </button>
            <Show when=move || open.get()>
                <p class="text-sm text-gray-400">{answer}</p>
            </Show>
        </div>
    }
}
