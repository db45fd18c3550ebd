//! Activity Feed Component

use leptos::*;
use leptos_router::*;

use crate::api::types::Activity;
use crate::state::global::{format_money, time_ago};

fn icon(kind: &str) -> &'static str {
    match kind {
        "challenge_completed" => "✅",
        "challenge_joined" => "🎯",
        "challenge_created" => "✨",
        "payout_received" => "💰",
        "achievement_unlocked" => "🏆",
        _ => "•",
    }
}

/// Newest-first list of events, at most `limit`
#[component]
pub fn ActivityFeed(
    #[prop(into)] activities: Signal<Vec<Activity>>,
    #[prop(default = 10)] limit: usize,
) -> impl IntoView {
    view! {
        <div class="space-y-3">
            {move || {
                let list = activities.get();
                if list.is_empty() {
                    return view! {
                        <p class="text-gray-500 text-sm">"Waiting for the first outdoor adventure..."</p>
                    }.into_view();
                }
                list.into_iter()
                    .take(limit)
                    .map(|activity| view! { <ActivityRow activity=activity /> })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
fn ActivityRow(activity: Activity) -> impl IntoView {
    let challenge_link = activity.challenge.clone().map(|id| {
        let title = activity.challenge_title.clone().unwrap_or_else(|| "a challenge".to_string());
        view! {
            <A href=format!("/challenge/{}", id) class="text-green-400 hover:underline">{title}</A>
        }
    });

    view! {
        <div class="flex items-start space-x-3 bg-gray-700/50 rounded-lg p-3">
            <span class="text-xl">{icon(&activity.kind)}</span>
            <div class="flex-1 min-w-0">
                <p class="text-sm">
                    <A href=format!("/profile/{}", activity.user) class="font-medium hover:underline">
                        {activity.user.clone()}
                    </A>
                    " "
                    {activity.description.clone()}
                    " "
                    {challenge_link}
                </p>
                <p class="text-xs text-gray-500">{time_ago(activity.timestamp)}</p>
            </div>
            {activity.amount.map(|amount| view! {
                <span class="text-sm text-green-400 font-medium">{format_money(amount)}</span>
            })}
        </div>
    }
}
