//! Challenge Detail Page
//!
//! One challenge with its rules, proof photos, comments and the join flow.

use leptos::*;
use leptos_router::*;

use crate::api::{self, types::{ChallengeDetail as Detail, ChallengePhoto, Comment}};
use crate::components::{Card, DifficultyBadge, Loading, Modal, PhotoUpload, StakeFlow};
use crate::state::global::{format_money, format_stake, time_ago, GlobalState};

#[component]
pub fn ChallengeDetail() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let params = use_params_map();
    let id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());

    let refresh = create_rw_signal(0_u32);
    let detail = create_local_resource(
        move || (id(), refresh.get()),
        |(id, _)| async move { api::fetch_challenge(&id).await.ok() },
    );

    // Reload when the server pushes an update for this challenge
    create_effect(move |_| {
        if let Some(update) = state.challenge_update.get() {
            if update.id == id() {
                refresh.update(|n| *n += 1);
            }
        }
    });

    view! {
        <Suspense fallback=|| view! { <Loading /> }>
            {move || detail.get().map(|found| match found {
                Some(detail) => view! { <DetailView detail=detail refresh=refresh /> }.into_view(),
                None => view! {
                    <div class="text-center py-16">
                        <div class="text-6xl mb-4">"🤷"</div>
                        <h1 class="text-2xl font-bold mb-2">"Challenge not found"</h1>
                        <p class="text-gray-400 mb-6">"It may have been removed, or the link is wrong."</p>
                        <A href="/dashboard" class="text-green-400 hover:underline">"Back to the dashboard"</A>
                    </div>
                }.into_view(),
            })}
        </Suspense>
    }
}

#[component]
fn DetailView(detail: Detail, refresh: RwSignal<u32>) -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let challenge = detail.challenge;
    let id = store_value(challenge.id.clone());
    let joined = detail.participation.is_some();
    let stake_open = create_rw_signal(false);

    let join = {
        let state = state.clone();
        move |_: ev::MouseEvent| {
            let state = state.clone();
            spawn_local(async move {
                match api::join_challenge(&id.get_value()).await {
                    Ok(_) => {
                        state.show_success("You're in. Time to go outside!");
                        refresh.update(|n| *n += 1);
                    }
                    Err(e) => state.show_error(&e),
                }
            });
        }
    };

    let proof = create_rw_signal(None::<String>);
    let upload = {
        let state = state.clone();
        move |_: ev::MouseEvent| {
            let Some(url) = proof.get() else {
                return;
            };
            let state = state.clone();
            spawn_local(async move {
                match api::upload_photo(&id.get_value(), &url, "Proof from outside").await {
                    Ok(_) => {
                        proof.set(None);
                        state.show_success("Photo uploaded");
                        refresh.update(|n| *n += 1);
                    }
                    Err(e) => state.show_error(&e),
                }
            });
        }
    };

    let stake_challenge = challenge.clone();
    let photos = challenge.photos.clone();
    let rules = challenge.rules.clone();

    view! {
        <div class="space-y-6">
            <div class="bg-gray-800 rounded-xl p-6">
                <div class="flex items-center space-x-3 text-sm text-gray-400 mb-2">
                    <span class="capitalize">{challenge.category.clone()}</span>
                    <DifficultyBadge difficulty=challenge.difficulty.clone() />
                    <span>{detail.time_remaining.clone()}</span>
                </div>
                <h1 class="text-3xl font-bold">{challenge.title.clone()}</h1>
                <p class="text-gray-300 mt-2">{challenge.description.clone()}</p>

                <div class="grid grid-cols-2 md:grid-cols-4 gap-4 mt-6 text-center">
                    <Figure label="Stake" value=format_stake(challenge.stake_amount, &challenge.stake_currency) />
                    <Figure label="Duration" value=challenge.duration.clone() />
                    <Figure label="Participants" value=challenge.participants.to_string() />
                    <Figure label="Total pot" value=format_money(challenge.total_pot) />
                </div>

                <div class="flex space-x-3 mt-6">
                    {if !challenge.is_active {
                        view! { <span class="text-gray-500">"This challenge has ended."</span> }.into_view()
                    } else if joined {
                        let status = detail.participation.as_ref().map(|p| p.status.replace('_', " ")).unwrap_or_default();
                        view! { <span class="px-4 py-2 bg-gray-700 rounded-lg capitalize">{format!("Joined · {}", status)}</span> }.into_view()
                    } else {
                        view! {
                            <button class="px-4 py-2 bg-green-600 hover:bg-green-700 rounded-lg font-medium" on:click=join>
                                "Join Challenge"
                            </button>
                        }.into_view()
                    }}
                    {challenge.is_active.then(|| view! {
                        <button
                            class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg"
                            on:click=move |_| stake_open.set(true)
                        >
                            "Stake & Start timer"
                        </button>
                    })}
                </div>
            </div>

            {(!rules.is_empty()).then(|| view! {
                <Card title="Rules">
                    <ul class="list-disc list-inside space-y-1 text-gray-300">
                        {rules.into_iter().map(|rule| view! { <li>{rule}</li> }).collect_view()}
                    </ul>
                </Card>
            })}

            <Card title="Proof photos">
                <div class="grid md:grid-cols-3 gap-4 mb-4">
                    {if photos.is_empty() {
                        view! { <p class="text-gray-500">"No photos yet. Be the first!"</p> }.into_view()
                    } else {
                        photos.into_iter().map(|photo| view! { <PhotoCard photo=photo refresh=refresh /> }).collect_view()
                    }}
                </div>
                {joined.then(|| view! {
                    <div class="space-y-2">
                        <PhotoUpload on_change=move |url: Option<String>| proof.set(url) />
                        <button
                            class="px-4 py-2 bg-green-600 hover:bg-green-700 rounded-lg disabled:opacity-50"
                            disabled=move || proof.get().is_none()
                            on:click=upload
                        >
                            "Share photo"
                        </button>
                    </div>
                })}
            </Card>

            <Comments challenge_id=id.get_value() />

            <Modal open=stake_open title="Stake on this challenge">
                <StakeFlow
                    challenge=stake_challenge.clone()
                    on_close=move |_: ()| {
                        stake_open.set(false);
                        refresh.update(|n| *n += 1);
                    }
                />
            </Modal>
        </div>
    }
}

#[component]
fn Figure(label: &'static str, #[prop(into)] value: String) -> impl IntoView {
    view! {
        <div class="bg-gray-700/50 rounded-lg p-3">
            <p class="text-lg font-semibold">{value}</p>
            <p class="text-xs text-gray-400">{label}</p>
        </div>
    }
}

#[component]
fn PhotoCard(photo: ChallengePhoto, refresh: RwSignal<u32>) -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let photo_id = store_value(photo.id.clone());
    let user_vote = photo.user_vote.clone();

    let vote = move |direction: &'static str| {
        let state = state.clone();
        spawn_local(async move {
            match api::vote_photo(&photo_id.get_value(), direction).await {
                Ok(_) => refresh.update(|n| *n += 1),
                Err(e) => state.show_error(&e),
            }
        });
    };
    let vote_down = vote.clone();
    let highlight = |active: bool| {
        if active {
            "px-2 py-1 rounded bg-green-700"
        } else {
            "px-2 py-1 rounded bg-gray-700 hover:bg-gray-600"
        }
    };

    view! {
        <div class="bg-gray-700/50 rounded-lg overflow-hidden">
            <img src=photo.image_url.clone() alt=photo.description.clone() class="w-full h-40 object-cover" />
            <div class="p-3 space-y-2">
                <p class="text-sm">
                    <A href=format!("/profile/{}", photo.username) class="font-medium hover:underline">
                        {photo.username.clone()}
                    </A>
                    {photo.is_verified.then(|| view! { <span class="ml-1 text-green-400">"✓ verified"</span> })}
                </p>
                <p class="text-xs text-gray-400">{time_ago(photo.uploaded_at)}</p>
                <div class="flex items-center space-x-2 text-sm">
                    <button class=highlight(user_vote.as_deref() == Some("up")) on:click=move |_| vote("up")>"👍"</button>
                    <span class="font-semibold">{photo.votes}</span>
                    <button class=highlight(user_vote.as_deref() == Some("down")) on:click=move |_| vote_down("down")>"👎"</button>
                </div>
            </div>
        </div>
    }
}

#[component]
fn Comments(challenge_id: String) -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let challenge_id = store_value(challenge_id);
    let refresh = create_rw_signal(0_u32);
    let draft = create_rw_signal(String::new());

    let comments = create_local_resource(
        move || refresh.get(),
        move |_| async move { api::fetch_comments(&challenge_id.get_value()).await.unwrap_or_default() },
    );

    let post = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let content = draft.get();
        if content.trim().is_empty() {
            return;
        }
        let state = state.clone();
        spawn_local(async move {
            match api::add_comment(&challenge_id.get_value(), &content).await {
                Ok(_) => {
                    draft.set(String::new());
                    refresh.update(|n| *n += 1);
                }
                Err(e) => state.show_error(&e),
            }
        });
    };

    view! {
        <Card title="Comments">
            <form on:submit=post class="flex space-x-2 mb-4">
                <input
                    type="text"
                    placeholder="Say something encouraging"
                    class="flex-1 bg-gray-700 border border-gray-600 rounded-lg px-3 py-2"
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                />
                <button type="submit" class="px-4 py-2 bg-green-600 hover:bg-green-700 rounded-lg">"Post"</button>
            </form>
            <Suspense fallback=|| view! { <Loading /> }>
                {move || comments.get().map(|list: Vec<Comment>| {
                    list.into_iter().map(|comment| view! {
                        <div class="py-2 border-b border-gray-700">
                            <p class="text-sm">
                                <span class="font-medium">{comment.username}</span>
                                <span class="text-xs text-gray-500 ml-2">{time_ago(comment.timestamp)}</span>
                            </p>
                            <p class="text-gray-300">{comment.content}</p>
                            <p class="text-xs text-gray-500">{format!("♥ {}", comment.likes)}</p>
                        </div>
                    }).collect_view()
                })}
            </Suspense>
        </Card>
    }
}
