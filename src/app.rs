//! Todo App
//!
//! Builds the store and controller and provides them to the view tree.

use std::rc::Rc;

use leptos::prelude::*;

use crate::components::{FilterBar, NewTodoForm, SearchBox, TodoFooter, TodoList};
use crate::config::StoreConfig;
use crate::controller::TodoController;
use crate::scheduler::{Scheduler, TimeoutScheduler};
use crate::storage::KeyValueStorage;
use crate::store::TodoStore;

#[component]
pub fn App(config: StoreConfig, storage: Rc<dyn KeyValueStorage>) -> impl IntoView {
    let scheduler: Rc<dyn Scheduler> = Rc::new(TimeoutScheduler);
    let store = TodoStore::new(config, scheduler, Some(storage));
    let controller = TodoController::new(store);

    // Provide context to all children
    provide_context(store);
    provide_context(controller);

    log::info!("[APP] Mounted with {} todos", store.todos().len());

    view! {
        <main class="todo-app">
            <h1>"Todos"</h1>
            <NewTodoForm />
            <SearchBox />
            <FilterBar />
            <TodoList />
            <TodoFooter />
        </main>
    }
}
