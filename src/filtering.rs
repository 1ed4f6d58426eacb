//! Filtering Utilities
//!
//! Pure functions behind the store's derived views.

use crate::models::{Filter, Todo};

/// Todos matching the search term, then the status filter.
/// An empty term skips the search step.
pub fn visible_todos(todos: &[Todo], filter: Filter, search_term: &str) -> Vec<Todo> {
    let needle = search_term.to_lowercase();
    todos
        .iter()
        .filter(|todo| needle.is_empty() || todo.title.to_lowercase().contains(&needle))
        .filter(|todo| filter.admits(todo))
        .cloned()
        .collect()
}

/// Counts over the full, unfiltered list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoCounts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

impl TodoCounts {
    pub fn tally(todos: &[Todo]) -> Self {
        let completed = todos.iter().filter(|t| t.completed).count();
        Self {
            total: todos.len(),
            active: todos.len() - completed,
            completed,
        }
    }
}
