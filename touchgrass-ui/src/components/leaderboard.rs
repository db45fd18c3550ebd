//! Leaderboard table

use leptos::*;
use leptos_router::*;

use crate::api::types::LeaderboardEntry;

fn medal(rank: u32) -> String {
    match rank {
        1 => "🥇".to_string(),
        2 => "🥈".to_string(),
        3 => "🥉".to_string(),
        n => format!("#{}", n),
    }
}

#[component]
pub fn Leaderboard(
    #[prop(into)] entries: Signal<Vec<LeaderboardEntry>>,
    /// Hide streak and success columns
    #[prop(optional)]
    compact: bool,
) -> impl IntoView {
    view! {
        <div class="divide-y divide-gray-700">
            {move || {
                entries.get().into_iter().map(|entry| {
                    let user = entry.user;
                    view! {
                        <div class="flex items-center py-3 space-x-3">
                            <span class="w-10 text-center font-semibold">{medal(entry.rank)}</span>
                            <img src=user.avatar.clone() alt="" class="w-8 h-8 rounded-full bg-gray-700" />
                            <A href=format!("/profile/{}", user.username) class="flex-1 font-medium hover:text-green-400">
                                {user.username.clone()}
                                {user.is_verified.then(|| view! { <span class="ml-1 text-blue-400">"✓"</span> })}
                            </A>
                            {(!compact).then(|| view! {
                                <span class="hidden md:inline text-sm text-gray-400 w-24">
                                    {format!("🔥 {}", user.current_streak)}
                                </span>
                                <span class="hidden md:inline text-sm text-gray-400 w-24">
                                    {format!("{:.0}% success", user.success_rate * 100.0)}
                                </span>
                            })}
                            <span class="font-semibold text-green-400">{entry.display_value}</span>
                        </div>
                    }
                }).collect_view()
            }}
        </div>
    }
}
