//! Filter Bar Component
//!
//! Status filter buttons.

use leptos::prelude::*;

use crate::controller::use_controller;

/// Filter options (value, label)
pub const FILTER_OPTIONS: &[(&str, &str)] = &[
    ("all", "All"),
    ("active", "Active"),
    ("completed", "Completed"),
];

#[component]
pub fn FilterBar() -> impl IntoView {
    let ctrl = use_controller();
    let store = ctrl.store();

    view! {
        <div class="filter-bar">
            {FILTER_OPTIONS.iter().map(|(value, label)| {
                let value = *value;
                let is_selected = move || store.filter().as_str() == value;
                view! {
                    <button
                        type="button"
                        class=move || if is_selected() { "filter-btn active" } else { "filter-btn" }
                        on:click=move |_| ctrl.select_filter(value)
                    >
                        {*label}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
