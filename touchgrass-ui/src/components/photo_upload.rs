//! Photo Upload Component
//!
//! Picks an image, previews it as a data URL and reports it to the parent.

use leptos::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{FileReader, HtmlInputElement, ProgressEvent};

/// Image picker with preview and remove
#[component]
pub fn PhotoUpload(
    /// Called with the data URL, or `None` when the photo is removed
    #[prop(into)]
    on_change: Callback<Option<String>>,
    #[prop(optional, into)] label: Option<String>,
) -> impl IntoView {
    let preview = create_rw_signal(None::<String>);
    let input_ref = create_node_ref::<html::Input>();

    let on_file = move |ev: ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        if !file.type_().starts_with("image/") {
            web_sys::console::error_1(&"Selected file is not an image".into());
            return;
        }

        let reader = match FileReader::new() {
            Ok(reader) => reader,
            Err(e) => {
                web_sys::console::error_1(&e);
                return;
            }
        };
        let reader_clone = reader.clone();
        let on_load = Closure::wrap(Box::new(move |_: ProgressEvent| {
            if let Some(url) = reader_clone.result().ok().and_then(|r| r.as_string()) {
                preview.set(Some(url.clone()));
                on_change.call(Some(url));
            }
        }) as Box<dyn FnMut(ProgressEvent)>);
        reader.set_onload(Some(on_load.as_ref().unchecked_ref()));
        on_load.forget();

        if let Err(e) = reader.read_as_data_url(&file) {
            web_sys::console::error_1(&e);
        }
    };

    let remove = move |_: ev::MouseEvent| {
        preview.set(None);
        if let Some(input) = input_ref.get() {
            input.set_value("");
        }
        on_change.call(None);
    };

    let label = label.unwrap_or_else(|| "Upload proof photo".to_string());

    view! {
        <div class="space-y-3">
            {move || match preview.get() {
                Some(url) => view! {
                    <div class="relative">
                        <img src=url alt="Proof preview" class="w-full max-h-64 object-cover rounded-lg" />
                        <button
                            class="absolute top-2 right-2 px-2 py-1 bg-red-600 hover:bg-red-700 rounded text-sm"
                            on:click=remove
                        >
                            "Remove"
                        </button>
                    </div>
                }.into_view(),
                None => view! {
                    <div class="border-2 border-dashed border-gray-600 rounded-lg p-6 text-center text-gray-400">
                        "📷 " {label.clone()}
                    </div>
                }.into_view(),
            }}
            <input
                type="file"
                accept="image/*"
                node_ref=input_ref
                class="block w-full text-sm text-gray-400"
                on:change=on_file
            />
        </div>
    }
}
