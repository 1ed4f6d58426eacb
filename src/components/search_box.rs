//! Search Box Component

use leptos::prelude::*;

use crate::controller::use_controller;

/// Search input; every keystroke goes to the debounced channel
#[component]
pub fn SearchBox() -> impl IntoView {
    let ctrl = use_controller();
    let store = ctrl.store();

    view! {
        <div class="search-row">
            <input
                type="search"
                placeholder="Search todos..."
                prop:value=move || ctrl.search_input.get()
                on:input=move |ev| ctrl.on_search_input(event_target_value(&ev))
            />
            <Show when=move || store.is_loading()>
                <span class="loading">"Loading..."</span>
            </Show>
        </div>
    }
}
