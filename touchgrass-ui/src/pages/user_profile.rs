//! User Profile Page

use leptos::*;
use leptos_router::*;

use crate::api::{self, types::ProfileView};
use crate::components::{ActivityFeed, Card, ChallengeGrid, Loading};
use crate::state::global::{format_money, GlobalState};

#[component]
pub fn UserProfile() -> impl IntoView {
    let params = use_params_map();
    let username = move || params.with(|p| p.get("username").cloned().unwrap_or_default());
    let refresh = create_rw_signal(0_u32);

    let profile = create_local_resource(
        move || (username(), refresh.get()),
        |(username, _)| async move { api::fetch_profile(&username).await.ok() },
    );

    view! {
        <Suspense fallback=|| view! { <Loading /> }>
            {move || profile.get().map(|found| match found {
                Some(profile) => view! { <ProfileBody profile=profile refresh=refresh /> }.into_view(),
                None => view! {
                    <div class="text-center py-16">
                        <div class="text-6xl mb-4">"👻"</div>
                        <h1 class="text-2xl font-bold mb-2">"User not found"</h1>
                        <p class="text-gray-400 mb-6">{format!("Nobody goes by \"{}\" here.", username())}</p>
                        <A href="/leaderboards" class="text-green-400 hover:underline">"Browse the leaderboards"</A>
                    </div>
                }.into_view(),
            })}
        </Suspense>
    }
}

#[component]
fn ProfileBody(profile: ProfileView, refresh: RwSignal<u32>) -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let user = profile.user;
    let user_id = store_value(user.id.clone());
    let is_me = state.me.get_untracked().map(|me| me.id == user.id).unwrap_or(false);
    let following = user.is_following.unwrap_or(false);

    let toggle_follow = move |_: ev::MouseEvent| {
        let state = state.clone();
        spawn_local(async move {
            match api::follow(&user_id.get_value(), !following).await {
                Ok(_) => refresh.update(|n| *n += 1),
                Err(e) => state.show_error(&e),
            }
        });
    };

    let created = profile.created_challenges;
    let activities = profile.activities;
    let achievements = profile.achievements;

    view! {
        <div class="space-y-6">
            <div class="bg-gray-800 rounded-xl p-6 flex flex-col md:flex-row md:items-center gap-6">
                <img src=user.avatar.clone() alt="" class="w-24 h-24 rounded-full bg-gray-700" />
                <div class="flex-1">
                    <h1 class="text-3xl font-bold">
                        {user.username.clone()}
                        {user.is_verified.then(|| view! { <span class="ml-2 text-blue-400 text-xl">"✓"</span> })}
                    </h1>
                    <p class="text-gray-400 font-mono text-sm">{user.address.clone()}</p>
                    <p class="text-gray-400 text-sm mt-1">
                        {format!("Rank #{} · {} followers · {} following · joined {}",
                            user.rank, user.followers, user.following, user.joined_at.format("%b %Y"))}
                    </p>
                </div>
                {(!is_me).then(|| view! {
                    <button
                        class={if following {
                            "px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg"
                        } else {
                            "px-4 py-2 bg-green-600 hover:bg-green-700 rounded-lg"
                        }}
                        on:click=toggle_follow
                    >
                        {if following { "Unfollow" } else { "Follow" }}
                    </button>
                })}
            </div>

            <div class="grid grid-cols-2 md:grid-cols-4 gap-4 text-center">
                <Tile label="Earned" value=format_money(user.total_earned) />
                <Tile label="Completed" value=user.completed_challenges.to_string() />
                <Tile label="Longest streak" value=format!("{} days", user.longest_streak) />
                <Tile label="Success rate" value=format!("{:.0}%", user.success_rate * 100.0) />
            </div>

            <Card title="Achievements">
                {if achievements.is_empty() {
                    view! { <p class="text-gray-500">"No achievements yet."</p> }.into_view()
                } else {
                    view! {
                        <div class="grid grid-cols-2 md:grid-cols-4 gap-3">
                            {achievements.into_iter().map(|a| view! {
                                <div class="bg-gray-700/50 rounded-lg p-3 text-center" title=a.description.clone()>
                                    <div class="text-3xl">{a.icon}</div>
                                    <p class="font-medium text-sm">{a.title}</p>
                                    <p class="text-xs text-gray-400 capitalize">{a.rarity}</p>
                                </div>
                            }).collect_view()}
                        </div>
                    }.into_view()
                }}
            </Card>

            <Card title="Created challenges">
                <ChallengeGrid challenges=Signal::derive(move || created.clone()) />
            </Card>

            <Card title="Recent activity">
                <ActivityFeed activities=Signal::derive(move || activities.clone()) />
            </Card>
        </div>
    }
}

#[component]
fn Tile(label: &'static str, #[prop(into)] value: String) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-xl p-4">
            <p class="text-2xl font-bold">{value}</p>
            <p class="text-sm text-gray-400">{label}</p>
        </div>
    }
}
