//! Todo List Component
//!
//! Renders the filtered view of the store.

use leptos::prelude::*;

use crate::components::TodoRow;
use crate::store::use_todo_store;

#[component]
pub fn TodoList() -> impl IntoView {
    let store = use_todo_store();

    view! {
        <Show
            when=move || !store.filtered_todos().is_empty()
            fallback=|| view! { <p class="empty">"Nothing to show"</p> }
        >
            <ul class="todo-list">
                <For
                    each=move || store.filtered_todos()
                    // completed/title in the key so a toggled row re-renders
                    key=|todo| (todo.id, todo.completed, todo.title.clone())
                    children=move |todo| view! { <TodoRow todo=todo /> }
                />
            </ul>
        </Show>
    }
}
