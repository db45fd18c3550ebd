//! Settings Page
//!
//! Profile settings and the API connection.

use leptos::*;

use crate::api::{self, types::SettingsUpdate};
use crate::components::{Button, ButtonVariant, Card};
use crate::state::global::GlobalState;

#[component]
pub fn Settings() -> impl IntoView {
    view! {
        <div class="space-y-8 max-w-2xl">
            <div>
                <h1 class="text-3xl font-bold">"Settings"</h1>
                <p class="text-gray-400 mt-1">"Your profile and connection"</p>
            </div>

            <ProfileSettings />
            <ApiSettings />
            <WalletSettings />
        </div>
    }
}

#[component]
fn ProfileSettings() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let current = state.me.get_untracked();

    let username = create_rw_signal(current.as_ref().map(|u| u.username.clone()).unwrap_or_default());
    let avatar = create_rw_signal(current.as_ref().map(|u| u.avatar.clone()).unwrap_or_default());
    let notifications = create_rw_signal(current.map(|u| u.notifications_enabled).unwrap_or(true));
    let saving = create_rw_signal(false);

    // The user may load after the page does
    let me_signal = state.me;
    create_effect(move |_| {
        if let Some(me) = me_signal.get() {
            username.set(me.username);
            avatar.set(me.avatar);
            notifications.set(me.notifications_enabled);
        }
    });

    let save = move |_: ev::MouseEvent| {
        let name = username.get();
        if name.trim().is_empty() {
            state.show_error("Username cannot be empty");
            return;
        }
        let update = SettingsUpdate {
            username: Some(name),
            avatar: Some(avatar.get()).filter(|a| !a.trim().is_empty()),
            notifications_enabled: Some(notifications.get()),
        };
        saving.set(true);
        let state = state.clone();
        spawn_local(async move {
            match api::update_settings(&update).await {
                Ok(user) => {
                    state.me.set(Some(user));
                    state.show_success("Settings saved");
                }
                Err(e) => state.show_error(&e),
            }
            saving.set(false);
        });
    };

    let input_class = "w-full mt-1 bg-gray-700 border border-gray-600 rounded-lg px-3 py-2 \
                       focus:outline-none focus:border-green-500";

    view! {
        <Card title="Profile">
            <div class="space-y-4">
                <label class="block text-sm text-gray-400">
                    "Username"
                    <input
                        type="text"
                        class=input_class
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                </label>
                <label class="block text-sm text-gray-400">
                    "Avatar URL"
                    <input
                        type="url"
                        class=input_class
                        prop:value=move || avatar.get()
                        on:input=move |ev| avatar.set(event_target_value(&ev))
                    />
                </label>
                <label class="flex items-center space-x-2 text-sm">
                    <input
                        type="checkbox"
                        prop:checked=move || notifications.get()
                        on:change=move |ev| notifications.set(event_target_checked(&ev))
                    />
                    <span>"Notify me about challenge activity"</span>
                </label>
                <Button on_click=save disabled=Signal::derive(move || saving.get())>
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </Button>
            </div>
        </Card>
    }
}

#[component]
fn ApiSettings() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let url = create_rw_signal(api::get_api_base());
    let status = create_rw_signal(None::<Result<String, String>>);

    let save = move |_: ev::MouseEvent| {
        api::set_api_base(&url.get());
        state.show_success("API URL saved. Reload to reconnect the live feed.");
    };

    let test = move |_: ev::MouseEvent| {
        status.set(None);
        spawn_local(async move {
            let result = api::check_health().await.map(|health| {
                format!(
                    "{} · {} challenges · up {}s",
                    health.status, health.challenges, health.uptime_seconds
                )
            });
            status.set(Some(result));
        });
    };

    view! {
        <Card title="API Connection">
            <div class="space-y-4">
                <input
                    type="url"
                    class="w-full bg-gray-700 border border-gray-600 rounded-lg px-3 py-2"
                    prop:value=move || url.get()
                    on:input=move |ev| url.set(event_target_value(&ev))
                />
                <div class="flex space-x-2">
                    <Button on_click=save>"Save"</Button>
                    <Button variant=ButtonVariant::Secondary on_click=test>"Test connection"</Button>
                    <Button
                        variant=ButtonVariant::Ghost
                        on_click=move |_: ev::MouseEvent| url.set(api::DEFAULT_API_BASE.to_string())
                    >
                        "Reset"
                    </Button>
                </div>
                {move || status.get().map(|result| match result {
                    Ok(text) => view! { <p class="text-sm text-green-400">{format!("✓ {}", text)}</p> },
                    Err(e) => view! { <p class="text-sm text-red-400">{format!("✕ {}", e)}</p> },
                })}
            </div>
        </Card>
    }
}

#[component]
fn WalletSettings() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let address = state.wallet;

    view! {
        <Card title="Wallet">
            <div class="flex items-center justify-between">
                <span class="font-mono text-sm text-gray-400">
                    {move || address.get().and_then(|w| w.address).unwrap_or_else(|| "Not connected".to_string())}
                </span>
                <Button variant=ButtonVariant::Danger on_click=move |_: ev::MouseEvent| state.disconnect()>
                    "Disconnect"
                </Button>
            </div>
        </Card>
    }
}
