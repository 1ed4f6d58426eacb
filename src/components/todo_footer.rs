//! Todo Footer Component
//!
//! Counts and bulk actions.

use leptos::prelude::*;

use crate::store::use_todo_store;

#[component]
pub fn TodoFooter() -> impl IntoView {
    let store = use_todo_store();

    view! {
        <footer class="todo-footer">
            <p class="todo-count">
                {move || format!(
                    "{} total, {} active, {} completed",
                    store.total_count(),
                    store.active_count(),
                    store.completed_count(),
                )}
            </p>
            <button
                type="button"
                class="clear-btn"
                disabled=move || store.completed_count() == 0
                on:click=move |_| store.clear_completed()
            >
                "Clear completed"
            </button>
            <button
                type="button"
                class="load-btn"
                disabled=move || store.is_loading()
                on:click=move |_| store.load_todos()
            >
                "Load sample todos"
            </button>
        </footer>
    }
}
