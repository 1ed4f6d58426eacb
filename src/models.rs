//! Frontend Models
//!
//! Todo entries and the status filter.

use serde::{Deserialize, Serialize};

/// A single todo entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

impl Todo {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
        }
    }
}

/// Status filter applied after search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }

    /// Parse a filter name; anything outside the closed set is `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Filter::All),
            "active" => Some(Filter::Active),
            "completed" => Some(Filter::Completed),
            _ => None,
        }
    }

    /// Whether a todo passes this status filter
    pub fn admits(&self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !todo.completed,
            Filter::Completed => todo.completed,
        }
    }
}

/// Canned result of the simulated initial fetch
pub fn seed_todos() -> Vec<Todo> {
    vec![
        Todo { id: 1, title: "Learn Leptos signals".to_string(), completed: false },
        Todo { id: 2, title: "Explore reactive stores".to_string(), completed: false },
        Todo { id: 3, title: "Build a demo project".to_string(), completed: true },
    ]
}
