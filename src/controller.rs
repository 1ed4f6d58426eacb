//! View Controller
//!
//! Input drafts owned by the view, bridged to store operations.
//! Provided via Leptos context next to the store.

use leptos::prelude::*;

use crate::models::Filter;
use crate::store::TodoStore;

/// Draft input state plus the store it feeds
#[derive(Clone, Copy)]
pub struct TodoController {
    store: TodoStore,
    /// New todo title draft - read
    pub new_title: ReadSignal<String>,
    /// New todo title draft - write
    set_new_title: WriteSignal<String>,
    /// Raw search box text - read
    pub search_input: ReadSignal<String>,
    /// Raw search box text - write
    set_search_input: WriteSignal<String>,
}

impl TodoController {
    pub fn new(store: TodoStore) -> Self {
        let (new_title, set_new_title) = signal(String::new());
        let (search_input, set_search_input) = signal(String::new());
        Self {
            store,
            new_title,
            set_new_title,
            search_input,
            set_search_input,
        }
    }

    pub fn store(&self) -> TodoStore {
        self.store
    }

    pub fn set_new_title(&self, value: String) {
        self.set_new_title.set(value);
    }

    /// Add the trimmed draft as a todo and clear it.
    /// Blank drafts are left alone; returns whether a todo was added.
    pub fn submit_new_todo(&self) -> bool {
        let draft = self.new_title.get_untracked();
        let title = draft.trim();
        if title.is_empty() {
            return false;
        }
        self.store.add_todo(title);
        self.set_new_title.set(String::new());
        true
    }

    /// Track the search box and forward every change into the debounced channel
    pub fn on_search_input(&self, value: String) {
        self.set_search_input.set(value.clone());
        self.store.search_todos(value);
    }

    /// Apply a filter by name; unknown names are ignored
    pub fn select_filter(&self, name: &str) {
        if let Some(filter) = Filter::parse(name) {
            self.store.set_filter(filter);
        }
    }
}

/// Get the controller from context
pub fn use_controller() -> TodoController {
    expect_context::<TodoController>()
}
