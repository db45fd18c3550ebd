//! Create Challenge Form

use leptos::*;

use crate::api::{self, types::{Challenge, NewChallenge}};
use crate::state::global::GlobalState;

const CATEGORIES: [&str; 6] = ["outdoor", "fitness", "detox", "social", "mindfulness", "adventure"];
const DIFFICULTIES: [&str; 3] = ["easy", "medium", "hard"];
const DURATIONS: [u32; 5] = [1, 2, 4, 8, 24];

/// Form for a new challenge; `on_created` receives the stored challenge
#[component]
pub fn CreateChallenge(#[prop(into)] on_created: Callback<Challenge>) -> impl IntoView {
    let state = expect_context::<GlobalState>();

    let title = create_rw_signal(String::new());
    let description = create_rw_signal(String::new());
    let stake = create_rw_signal(100.0);
    let duration = create_rw_signal(2_u32);
    let category = create_rw_signal("outdoor".to_string());
    let difficulty = create_rw_signal("easy".to_string());
    let rules = create_rw_signal(String::new());
    let submitting = create_rw_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if title.get().trim().is_empty() || description.get().trim().is_empty() {
            state.show_error("Title and description are required");
            return;
        }

        let form = NewChallenge {
            title: title.get(),
            description: description.get(),
            stake_amount: stake.get(),
            duration_hours: duration.get(),
            category: category.get(),
            difficulty: difficulty.get(),
            rules: rules.get(),
        };

        submitting.set(true);
        let state = state.clone();
        spawn_local(async move {
            match api::create_challenge(&form).await {
                Ok(challenge) => {
                    state.show_success(&format!("Created \"{}\"", challenge.title));
                    title.set(String::new());
                    description.set(String::new());
                    rules.set(String::new());
                    on_created.call(challenge);
                }
                Err(e) => state.show_error(&e),
            }
            submitting.set(false);
        });
    };

    let input_class = "w-full bg-gray-700 border border-gray-600 rounded-lg px-3 py-2 \
                       focus:outline-none focus:border-green-500";

    view! {
        <form on:submit=on_submit class="space-y-4">
            <input
                type="text"
                placeholder="Challenge title"
                class=input_class
                prop:value=move || title.get()
                on:input=move |ev| title.set(event_target_value(&ev))
            />
            <textarea
                placeholder="What do participants have to do?"
                rows="3"
                class=input_class
                prop:value=move || description.get()
                on:input=move |ev| description.set(event_target_value(&ev))
            />

            <div class="grid grid-cols-2 gap-4">
                <label class="text-sm text-gray-400">
                    "Stake (XP)"
                    <input
                        type="number"
                        min="1"
                        class=input_class
                        prop:value=move || stake.get().to_string()
                        on:input=move |ev| {
                            if let Ok(v) = event_target_value(&ev).parse::<f64>() {
                                stake.set(v);
                            }
                        }
                    />
                </label>
                <label class="text-sm text-gray-400">
                    "Duration"
                    <select
                        class=input_class
                        on:change=move |ev| {
                            if let Ok(v) = event_target_value(&ev).parse::<u32>() {
                                duration.set(v);
                            }
                        }
                    >
                        {DURATIONS.iter().map(|&h| view! {
                            <option value=h.to_string() selected=move || duration.get() == h>
                                {format!("{} hours", h)}
                            </option>
                        }).collect_view()}
                    </select>
                </label>
                <label class="text-sm text-gray-400">
                    "Category"
                    <select class=input_class on:change=move |ev| category.set(event_target_value(&ev))>
                        {CATEGORIES.iter().map(|&c| view! {
                            <option value=c selected=move || category.get() == c>{c}</option>
                        }).collect_view()}
                    </select>
                </label>
                <label class="text-sm text-gray-400">
                    "Difficulty"
                    <select class=input_class on:change=move |ev| difficulty.set(event_target_value(&ev))>
                        {DIFFICULTIES.iter().map(|&d| view! {
                            <option value=d selected=move || difficulty.get() == d>{d}</option>
                        }).collect_view()}
                    </select>
                </label>
            </div>

            <textarea
                placeholder="Rules, one per line"
                rows="3"
                class=input_class
                prop:value=move || rules.get()
                on:input=move |ev| rules.set(event_target_value(&ev))
            />

            <button
                type="submit"
                class="w-full px-4 py-2 bg-green-600 hover:bg-green-700 rounded-lg font-medium disabled:opacity-50"
                disabled=move || submitting.get()
            >
                {move || if submitting.get() { "Creating..." } else { "Create Challenge" }}
            </button>
        </form>
    }
}
