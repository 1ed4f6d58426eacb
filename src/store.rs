//! Todo State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Derived views are
//! memos over the store fields; deferred work goes through a [`Scheduler`].

use std::collections::HashSet;
use std::rc::Rc;

use leptos::prelude::*;
use reactive_stores::Store;

use crate::config::StoreConfig;
use crate::debounce::Debouncer;
use crate::filtering::{visible_todos, TodoCounts};
use crate::models::{seed_todos, Filter, Todo};
use crate::scheduler::{ScheduledTask, Scheduler};
use crate::storage::{restore_todos, save_todos, KeyValueStorage};

/// Canonical todo state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct TodoState {
    /// All todos, insertion order
    pub todos: Vec<Todo>,
    /// Status filter
    pub filter: Filter,
    /// Settled (debounced) search term
    pub search_term: String,
    /// A search settle or load is outstanding
    pub is_loading: bool,
}

/// Non-reactive parts of the store: timers, storage, id allocation
struct StoreRuntime {
    config: StoreConfig,
    scheduler: Rc<dyn Scheduler>,
    storage: Option<Rc<dyn KeyValueStorage>>,
    settle: Option<ScheduledTask>,
    load: Option<ScheduledTask>,
    last_id: u64,
}

/// Handle to the todo store. Cheap to copy; provide it via context.
#[derive(Clone, Copy)]
pub struct TodoStore {
    state: Store<TodoState>,
    runtime: StoredValue<StoreRuntime, LocalStorage>,
    search: StoredValue<Debouncer<String>, LocalStorage>,
    filtered: Memo<Vec<Todo>>,
    counts: Memo<TodoCounts>,
}

impl TodoStore {
    /// Build the store, seeding todos from `storage` when persistence is on
    /// and the stored slot is well-formed.
    pub fn new(
        config: StoreConfig,
        scheduler: Rc<dyn Scheduler>,
        storage: Option<Rc<dyn KeyValueStorage>>,
    ) -> Self {
        let storage = storage.filter(|_| config.persist);
        let todos = storage
            .as_deref()
            .map(|storage| match restore_todos(storage, &config.storage_key) {
                Ok(Some(todos)) => {
                    log::info!("[STORE] Restored {} todos from '{}'", todos.len(), config.storage_key);
                    todos
                }
                Ok(None) => Vec::new(),
                Err(e) => {
                    log::warn!("[STORE] Ignoring stored todos: {}", e);
                    Vec::new()
                }
            })
            .unwrap_or_default();
        let last_id = todos.iter().map(|t| t.id).max().unwrap_or(0);

        let state = Store::new(TodoState {
            todos,
            ..Default::default()
        });

        let quiet = config.search_debounce();
        let runtime = StoredValue::new_local(StoreRuntime {
            config,
            scheduler: Rc::clone(&scheduler),
            storage,
            settle: None,
            load: None,
            last_id,
        });
        let search = StoredValue::new_local(Debouncer::new(scheduler, quiet, move |term: String| {
            apply_search_term(state, runtime, term)
        }));

        let filtered = Memo::new(move |_| {
            let filter = state.filter().get();
            let term = state.search_term().get();
            visible_todos(&state.todos().read(), filter, &term)
        });
        let counts = Memo::new(move |_| TodoCounts::tally(&state.todos().read()));

        Self {
            state,
            runtime,
            search,
            filtered,
            counts,
        }
    }

    // ========================
    // Mutations
    // ========================

    /// Append a todo. The caller rejects blank titles.
    pub fn add_todo(&self, title: &str) {
        let id = self.next_id();
        let mut next = self.state.todos().get_untracked();
        next.push(Todo::new(id, title));
        log::debug!("[STORE] Added todo #{}", id);
        self.commit(next);
    }

    /// Flip `completed` on the todo with `id`; unknown ids are ignored
    pub fn toggle_todo(&self, id: u64) {
        let todos = self.state.todos().get_untracked();
        if !todos.iter().any(|t| t.id == id) {
            return;
        }
        let next = todos
            .into_iter()
            .map(|mut todo| {
                if todo.id == id {
                    todo.completed = !todo.completed;
                }
                todo
            })
            .collect();
        self.commit(next);
    }

    /// Remove the todo with `id`; unknown ids are ignored
    pub fn delete_todo(&self, id: u64) {
        let todos = self.state.todos().get_untracked();
        if !todos.iter().any(|t| t.id == id) {
            return;
        }
        log::debug!("[STORE] Deleted todo #{}", id);
        self.commit(todos.into_iter().filter(|t| t.id != id).collect());
    }

    pub fn set_filter(&self, filter: Filter) {
        self.state.filter().set(filter);
    }

    /// Remove every completed todo
    pub fn clear_completed(&self) {
        let todos = self.state.todos().get_untracked();
        if !todos.iter().any(|t| t.completed) {
            return;
        }
        let next: Vec<Todo> = todos.into_iter().filter(|t| !t.completed).collect();
        log::debug!("[STORE] Cleared completed, {} left", next.len());
        self.commit(next);
    }

    /// Feed raw search input into the debounced channel.
    /// The settled term reaches the store after the quiet period.
    pub fn search_todos(&self, input: impl Into<String>) {
        let input = input.into();
        self.search.try_with_value(|search| search.push(input));
    }

    /// Simulated initial fetch: after `load_delay` the todo list is replaced
    /// by the seed set. A newer load supersedes a pending one.
    pub fn load_todos(&self) {
        let Some((scheduler, delay)) = self
            .runtime
            .try_with_value(|rt| (Rc::clone(&rt.scheduler), rt.config.load_delay()))
        else {
            return;
        };
        log::info!("[STORE] Loading todos...");
        let store = *self;
        let task = scheduler.schedule(delay, Box::new(move || store.finish_load()));
        self.runtime.update_value(|rt| rt.load = Some(task));
        sync_loading(self.state, self.runtime);
    }

    fn finish_load(&self) {
        if self.runtime.try_update_value(|rt| rt.load = None).is_none() {
            return;
        }
        let seeds = seed_todos();
        let max_seed = seeds.iter().map(|t| t.id).max().unwrap_or(0);
        self.runtime.update_value(|rt| rt.last_id = rt.last_id.max(max_seed));
        log::info!("[STORE] Loaded {} todos", seeds.len());
        self.commit(seeds);
        sync_loading(self.state, self.runtime);
    }

    /// Replace the todo list, then mirror it into storage
    fn commit(&self, next: Vec<Todo>) {
        self.state.todos().set(next);
        self.persist();
    }

    fn persist(&self) {
        let Some((storage, key)) = self
            .runtime
            .try_with_value(|rt| rt.storage.clone().map(|s| (s, rt.config.storage_key.clone())))
            .flatten()
        else {
            return;
        };
        let todos = self.state.todos().read_untracked();
        if let Err(e) = save_todos(&*storage, &key, &todos) {
            log::warn!("[STORE] Failed to persist todos: {}", e);
        }
    }

    /// Time-derived id, bumped past the largest id ever handed out.
    /// Once the id space is exhausted, the smallest id not in use is reused.
    fn next_id(&self) -> u64 {
        let now = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0);
        let bumped = self
            .runtime
            .try_update_value(|rt| {
                let next = rt.last_id.checked_add(1)?;
                rt.last_id = now.max(next);
                Some(rt.last_id)
            })
            .unwrap_or(Some(now));
        bumped.unwrap_or_else(|| {
            let used: HashSet<u64> = self.state.todos().read_untracked().iter().map(|t| t.id).collect();
            (0..=u64::MAX).find(|id| !used.contains(id)).unwrap_or(0)
        })
    }

    // ========================
    // Reads
    // ========================

    /// Todos after search and status filtering
    pub fn filtered_todos(&self) -> Vec<Todo> {
        self.filtered.get()
    }

    pub fn todos(&self) -> Vec<Todo> {
        self.state.todos().get()
    }

    pub fn total_count(&self) -> usize {
        self.counts.get().total
    }

    pub fn active_count(&self) -> usize {
        self.counts.get().active
    }

    pub fn completed_count(&self) -> usize {
        self.counts.get().completed
    }

    pub fn filter(&self) -> Filter {
        self.state.filter().get()
    }

    pub fn search_term(&self) -> String {
        self.state.search_term().get()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading().get()
    }
}

/// Settle a debounced search term: set it, mark loading, and clear the flag
/// after `search_settle`. A newer term replaces the pending settle.
fn apply_search_term(
    state: Store<TodoState>,
    runtime: StoredValue<StoreRuntime, LocalStorage>,
    term: String,
) {
    let Some((scheduler, delay)) =
        runtime.try_with_value(|rt| (Rc::clone(&rt.scheduler), rt.config.search_settle()))
    else {
        return;
    };
    log::debug!("[STORE] Search term settled: {:?}", term);
    state.search_term().set(term);

    let task = scheduler.schedule(
        delay,
        Box::new(move || {
            if runtime.try_update_value(|rt| rt.settle = None).is_none() {
                return;
            }
            sync_loading(state, runtime);
        }),
    );
    runtime.update_value(|rt| rt.settle = Some(task));
    sync_loading(state, runtime);
}

/// `is_loading` mirrors whether any deferred operation is pending
fn sync_loading(state: Store<TodoState>, runtime: StoredValue<StoreRuntime, LocalStorage>) {
    let Some(busy) = runtime.try_with_value(|rt| rt.settle.is_some() || rt.load.is_some()) else {
        return;
    };
    if state.is_loading().get_untracked() != busy {
        state.is_loading().set(busy);
    }
}

/// Get the todo store from context
pub fn use_todo_store() -> TodoStore {
    expect_context::<TodoStore>()
}
