//! Leaderboards Page

use leptos::*;

use crate::api;
use crate::components::{Card, Leaderboard, Loading};

const METRICS: [(&str, &str); 4] = [
    ("earnings", "💰 Earnings"),
    ("streaks", "🔥 Streaks"),
    ("success", "🎯 Success rate"),
    ("challenges", "✅ Challenges"),
];

const PERIODS: [(&str, &str); 4] = [
    ("daily", "Today"),
    ("weekly", "This week"),
    ("monthly", "This month"),
    ("all-time", "All time"),
];

#[component]
pub fn Leaderboards() -> impl IntoView {
    let metric = create_rw_signal("earnings");
    let period = create_rw_signal("all-time");

    let board = create_local_resource(
        move || (metric.get(), period.get()),
        |(metric, period)| async move { api::fetch_leaderboard(metric, period, 50).await },
    );

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Leaderboards"</h1>
                <p class="text-gray-400 mt-1">"Who touched the most grass"</p>
            </div>

            <div class="flex flex-wrap items-center justify-between gap-4">
                <div class="flex flex-wrap gap-2">
                    {METRICS.iter().map(|&(id, label)| view! {
                        <button
                            class={move || if metric.get() == id {
                                "px-4 py-2 rounded-lg bg-green-600 text-white"
                            } else {
                                "px-4 py-2 rounded-lg bg-gray-800 text-gray-300 hover:bg-gray-700"
                            }}
                            on:click=move |_| metric.set(id)
                        >
                            {label}
                        </button>
                    }).collect_view()}
                </div>
                <select
                    class="bg-gray-800 border border-gray-700 rounded-lg px-3 py-2"
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        if let Some(&(id, _)) = PERIODS.iter().find(|(id, _)| *id == value) {
                            period.set(id);
                        }
                    }
                >
                    {PERIODS.iter().map(|&(id, label)| view! {
                        <option value=id selected=move || period.get() == id>{label}</option>
                    }).collect_view()}
                </select>
            </div>

            <Suspense fallback=|| view! { <Loading /> }>
                {move || board.get().map(|result| match result {
                    Ok(response) => {
                        let title = format!("{} · {}", response.metric_label, response.period_label);
                        let entries = Signal::derive(move || response.entries.clone());
                        view! {
                            <Card title=title>
                                <Leaderboard entries=entries />
                            </Card>
                        }.into_view()
                    }
                    Err(e) => view! { <p class="text-red-400">{e}</p> }.into_view(),
                })}
            </Suspense>
        </div>
    }
}
