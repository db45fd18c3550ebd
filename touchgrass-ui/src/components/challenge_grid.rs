//! Challenge cards

use leptos::*;
use leptos_router::*;

use crate::api::types::Challenge;
use crate::state::global::{format_money, format_stake};

/// Grid of challenge cards; `on_stake` adds a stake button to each
#[component]
pub fn ChallengeGrid(
    #[prop(into)] challenges: Signal<Vec<Challenge>>,
    #[prop(optional, into)] on_stake: Option<Callback<Challenge>>,
) -> impl IntoView {
    view! {
        {move || {
            let list = challenges.get();
            if list.is_empty() {
                view! { <p class="text-gray-500">"No challenges here yet."</p> }.into_view()
            } else {
                view! {
                    <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-4">
                        {list.into_iter()
                            .map(|challenge| view! { <ChallengeCard challenge=challenge on_stake=on_stake /> })
                            .collect_view()}
                    </div>
                }.into_view()
            }
        }}
    }
}

#[component]
pub fn ChallengeCard(challenge: Challenge, on_stake: Option<Callback<Challenge>>) -> impl IntoView {
    let href = format!("/challenge/{}", challenge.id);
    let stake = format_stake(challenge.stake_amount, &challenge.stake_currency);
    let spots = match challenge.max_participants {
        Some(max) => format!("{}/{} joined", challenge.participants, max),
        None => format!("{} joined", challenge.participants),
    };
    let is_active = challenge.is_active;
    let stake_button = on_stake.filter(|_| is_active).map(|cb| {
        let challenge = challenge.clone();
        view! {
            <button
                class="mt-3 w-full px-3 py-2 bg-green-600 hover:bg-green-700 rounded-lg text-sm font-medium"
                on:click=move |_| cb.call(challenge.clone())
            >
                "Stake & Start"
            </button>
        }
    });

    view! {
        <div class="bg-gray-800 rounded-lg p-4 border border-gray-700 hover:border-green-600 transition-colors">
            <div class="flex items-center justify-between text-xs text-gray-400 mb-2">
                <span class="capitalize">{challenge.category.clone()}</span>
                <DifficultyBadge difficulty=challenge.difficulty.clone() />
            </div>
            <A href=href class="block">
                <h3 class="font-semibold text-lg hover:text-green-400">{challenge.title.clone()}</h3>
                <p class="text-sm text-gray-400 mt-1 line-clamp-2">{challenge.description.clone()}</p>
            </A>
            <div class="flex items-center justify-between mt-4 text-sm">
                <span class="text-green-400 font-medium">{stake}</span>
                <span class="text-gray-400">{challenge.duration.clone()}</span>
            </div>
            <div class="flex items-center justify-between mt-1 text-xs text-gray-500">
                <span>{spots}</span>
                <span>{format!("Pot {}", format_money(challenge.total_pot))}</span>
            </div>
            {(!is_active).then(|| view! { <p class="mt-2 text-xs text-gray-500">"Ended"</p> })}
            {stake_button}
        </div>
    }
}

#[component]
pub fn DifficultyBadge(#[prop(into)] difficulty: String) -> impl IntoView {
    let color = match difficulty.as_str() {
        "easy" => "bg-green-900 text-green-300",
        "medium" => "bg-yellow-900 text-yellow-300",
        _ => "bg-red-900 text-red-300",
    };
    view! {
        <span class=format!("px-2 py-0.5 rounded capitalize {}", color)>{difficulty}</span>
    }
}
