//! New Todo Form Component
//!
//! Draft title input; submit adds a todo through the controller.

use leptos::prelude::*;

use crate::controller::use_controller;

/// Form for creating new todos
#[component]
pub fn NewTodoForm() -> impl IntoView {
    let ctrl = use_controller();

    let create_todo = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if !ctrl.submit_new_todo() {
            log::debug!("[FORM] Ignored blank title");
        }
    };

    view! {
        <form class="new-todo-form" on:submit=create_todo>
            <input
                type="text"
                placeholder="What needs to be done?"
                prop:value=move || ctrl.new_title.get()
                on:input=move |ev| ctrl.set_new_title(event_target_value(&ev))
            />
            <button type="submit">"Add"</button>
        </form>
    }
}
