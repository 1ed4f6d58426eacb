//! Todo Row Component
//!
//! A single todo in the list.

use leptos::prelude::*;

use crate::models::Todo;
use crate::store::use_todo_store;

/// A single todo row with toggle and delete
#[component]
pub fn TodoRow(todo: Todo) -> impl IntoView {
    let store = use_todo_store();

    let id = todo.id;
    let completed = todo.completed;

    view! {
        <li class=if completed { "todo-row completed" } else { "todo-row" }>
            <input
                type="checkbox"
                checked=completed
                on:change=move |_| store.toggle_todo(id)
            />
            <span class="todo-title">{todo.title}</span>
            <button class="delete-btn" on:click=move |_| store.delete_todo(id)>"×"</button>
        </li>
    }
}
