//! Card, Button and Modal primitives

use leptos::*;

/// Rounded panel
#[component]
pub fn Card(
    #[prop(optional, into)] title: Option<String>,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    view! {
        <section class=format!("bg-gray-800 rounded-xl p-6 {}", class)>
            {title.map(|t| view! { <h2 class="text-xl font-semibold mb-4">{t}</h2> })}
            {children()}
        </section>
    }
}

#[derive(Clone, Copy, Default, PartialEq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Danger,
    Ghost,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "bg-green-600 hover:bg-green-700 text-white",
            ButtonVariant::Secondary => "bg-gray-700 hover:bg-gray-600 text-white",
            ButtonVariant::Danger => "bg-red-600 hover:bg-red-700 text-white",
            ButtonVariant::Ghost => "bg-transparent hover:bg-gray-700 text-gray-300",
        }
    }
}

#[component]
pub fn Button(
    #[prop(optional)] variant: ButtonVariant,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional, into)] class: String,
    #[prop(into)] on_click: Callback<ev::MouseEvent>,
    children: Children,
) -> impl IntoView {
    view! {
        <button
            class=format!(
                "px-4 py-2 rounded-lg font-medium transition-colors \
                 disabled:opacity-50 disabled:cursor-not-allowed {} {}",
                variant.class(),
                class
            )
            disabled=move || disabled.get()
            on:click=move |ev| on_click.call(ev)
        >
            {children()}
        </button>
    }
}

/// Overlay dialog; clicking the backdrop closes it
#[component]
pub fn Modal(
    open: RwSignal<bool>,
    #[prop(into)] title: String,
    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <Show when=move || open.get()>
            <div class="fixed inset-0 z-40 flex items-center justify-center">
                <div class="absolute inset-0 bg-black/60" on:click=move |_| open.set(false) />
                <div class="relative bg-gray-800 rounded-xl shadow-xl w-full max-w-lg mx-4 p-6 max-h-[90vh] overflow-y-auto">
                    <div class="flex items-center justify-between mb-4">
                        <h2 class="text-xl font-semibold">{title.clone()}</h2>
                        <button
                            class="text-gray-400 hover:text-white text-xl"
                            on:click=move |_| open.set(false)
                        >
                            "✕"
                        </button>
                    </div>
                    {children()}
                </div>
            </div>
        </Show>
    }
}
